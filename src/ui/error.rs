//! UI error types

use thiserror::Error;

/// Errors that can occur in terminal UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// Requested gallery position does not exist
    #[error("No image at position {position} (gallery has {available})")]
    NoSuchImage {
        /// 1-based position that was requested
        position: usize,
        /// Number of images currently in the viewer
        available: usize,
    },

    /// The system viewer could not be launched
    #[error("Failed to open image: {0}")]
    OpenError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
