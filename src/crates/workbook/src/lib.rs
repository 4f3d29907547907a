//! Spreadsheet adapter and scoped document sessions for sheetgate.
//!
//! This crate owns everything that touches an actual spreadsheet document:
//!
//! - [`address`] - A1-style cell and range reference parsing
//! - [`book`] - the in-memory model of one open document
//! - [`xlsx`] - XLSX load/save behind the model
//! - [`adapter`] - executes one validated [`Action`] against an open book
//! - [`session`] - scoped open → act → save → release with per-path locking
//! - [`pool`] - optional cross-request document cache with idle eviction
//!
//! # Example
//!
//! ```rust,ignore
//! use actions::Action;
//! use workbook::{adapter, session};
//!
//! let action = Action::ReadCell {
//!     workbook_name: None,
//!     sheet_name: "Sheet1".into(),
//!     cell_address: "C1".into(),
//! };
//!
//! let result = session::with_document("test.xlsx".as_ref(), |book| {
//!     adapter::execute(book, &action)
//! })
//! .await?;
//!
//! println!("{result}");
//! ```
//!
//! [`Action`]: actions::Action

pub mod adapter;
pub mod address;
pub mod book;
pub mod error;
pub mod pool;
pub mod session;
pub mod xlsx;

pub use adapter::{execute, ActionResult};
pub use book::{Book, Sheet};
pub use error::WorkbookError;
pub use pool::DocumentPool;
pub use session::with_document;
