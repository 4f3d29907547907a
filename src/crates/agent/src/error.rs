//! Error types for intent resolution.

use std::time::Duration;

use actions::ActionError;
use llm::LlmError;
use thiserror::Error;

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Why a command could not be resolved to an action.
///
/// A timeout is its own variant so the boundary can report "the model took
/// too long" distinctly from "the model call failed". The resolver never
/// hangs silently.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The model did not answer within the configured budget.
    #[error("Intent resolution timed out after {0:?}")]
    Timeout(Duration),

    /// The model call itself failed (network, auth, provider fault).
    #[error("Language model call failed: {0}")]
    Model(#[from] LlmError),

    /// The model selected a tool, but the call did not validate against the
    /// vocabulary.
    #[error("{0}")]
    InvalidAction(#[from] ActionError),

    /// The model produced neither a tool call nor usable text.
    #[error("The model produced no usable action or response")]
    EmptyResponse,
}

impl ResolverError {
    /// True when the failure stems from the user's command rather than the
    /// system (so the boundary can answer with a correctable message).
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, ResolverError::InvalidAction(_))
    }
}
