//! HTTP API layer.
//!
//! One command endpoint, a health check, permissive CORS for the add-in
//! front end, and request tracing. Every failure in the taxonomy is recovered
//! here into a user-facing body; nothing propagates as an unhandled fault.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use response::CommandResponse;
pub use routes::{create_router, AppState};
