//! Front boundary for sheetgate.
//!
//! Two faces over one core: an HTTP service (`POST /excel-command`) and an
//! interactive REPL. Both forward free text through the intent resolver; what
//! happens to the resolved action depends on the configured execution mode:
//! run it against the local document, or return it verbatim as a JSON
//! descriptor for a remote front end.

pub mod api;
pub mod config;
pub mod repl;

pub use config::{ExecutionMode, GatewayConfig};
