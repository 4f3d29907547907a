//! Request/response body types for the command endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /excel-command`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// The free-text command.
    pub command: String,

    /// Target workbook; required in delegated mode, ignored in local mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workbook_name: Option<String>,
}

/// Success body in local (direct-execution) mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The textual outcome shown to the user.
    pub response: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
}
