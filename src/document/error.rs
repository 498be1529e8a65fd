//! Error types for floor documents

use thiserror::Error;

/// Errors raised while loading or validating a floor document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read floor document: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid floor document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two elements share an id
    #[error("duplicate element id '{id}'")]
    DuplicateId { id: String },

    /// An element with zero or negative width or height
    #[error("element '{id}' has invalid size {w}x{h}")]
    InvalidSize { id: String, w: f64, h: f64 },
}

impl DocumentError {
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    pub fn invalid_size(id: impl Into<String>, w: f64, h: f64) -> Self {
        Self::InvalidSize { id: id.into(), w, h }
    }
}
