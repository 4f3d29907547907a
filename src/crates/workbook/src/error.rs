//! Error types for document access and action execution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for workbook operations.
pub type Result<T> = std::result::Result<T, WorkbookError>;

/// Errors raised while opening, reading, writing, or saving a document.
///
/// `DocumentNotFound`, `SheetNotFound`, and `InvalidAddress` are deliberately
/// separate variants: all three are user-correctable and the distinction is
/// what makes the failure actionable.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The spreadsheet file does not exist at the given path.
    #[error("Spreadsheet file not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// No sheet with this name in the open document. Matching is
    /// case-sensitive against the document as it is right now.
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// The cell or range reference could not be parsed.
    #[error("Invalid cell or range address '{0}'")]
    InvalidAddress(String),

    /// The action is descriptor-only and is never executed server-side.
    #[error("Action '{0}' cannot be executed against a local document")]
    UnsupportedAction(&'static str),

    /// The document could not be opened or read.
    #[error("Failed to load '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// The document could not be persisted.
    #[error("Failed to save '{}': {message}", path.display())]
    Save { path: PathBuf, message: String },
}

impl WorkbookError {
    /// True for failures the end user can correct by rephrasing the command
    /// (as opposed to I/O-level faults).
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            WorkbookError::SheetNotFound(_)
                | WorkbookError::InvalidAddress(_)
                | WorkbookError::UnsupportedAction(_)
        )
    }
}
