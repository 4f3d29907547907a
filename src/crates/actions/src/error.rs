//! Error types for action validation.

use thiserror::Error;

/// Result type for vocabulary operations.
pub type Result<T> = std::result::Result<T, ActionError>;

/// Errors raised while turning a raw tool call into a validated [`Action`].
///
/// Both variants are user-correctable and are reported before any document
/// I/O is attempted.
///
/// [`Action`]: crate::Action
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    /// The tool/tag name is not part of the vocabulary.
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    /// A required field is missing, has the wrong type, or a values payload
    /// is not a JSON array-of-arrays.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}
