//! Spreadsheet action vocabulary for sheetgate.
//!
//! This crate defines the closed set of spreadsheet operations the system can
//! perform, as a single tagged [`Action`] enum whose JSON serialization is a
//! stable wire contract consumed by an external front end. It also carries the
//! tool schemas offered to the intent resolver and the validation that turns a
//! raw `(tool name, argument object)` pair into a well-formed `Action`.
//!
//! # Wire contract
//!
//! Serializing an [`Action`] with `serde_json` yields an action descriptor:
//!
//! ```rust,ignore
//! use actions::Action;
//!
//! let action = Action::WriteCell {
//!     workbook_name: Some("Budget.xlsx".into()),
//!     sheet_name: "Sheet1".into(),
//!     cell_address: "C1".into(),
//!     value: "Done".into(),
//! };
//!
//! // {"action":"write_cell","workbook_name":"Budget.xlsx",
//! //  "sheet_name":"Sheet1","cell_address":"C1","value":"Done"}
//! let descriptor = serde_json::to_value(&action)?;
//! ```
//!
//! The `action` tag strings and field names must never be renamed; an external
//! renderer executes these descriptors verbatim.
//!
//! # Validation
//!
//! [`validate::from_tool_call`] rejects unknown tags with
//! [`ActionError::UnknownAction`] and malformed arguments with
//! [`ActionError::InvalidParameters`], always before any document I/O happens
//! downstream.

pub mod action;
pub mod error;
pub mod schema;
pub mod validate;

pub use action::Action;
pub use error::ActionError;
pub use schema::{is_known_tool, tool_specs, SchemaMode, ToolSpec};
pub use validate::from_tool_call;
