//! Error types for the element factory

use thiserror::Error;

/// Errors that can occur while building new elements
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    /// An add request named a kind the floor plan has no element for.
    /// Only raised under [`UnknownKindPolicy::Reject`](super::UnknownKindPolicy::Reject).
    #[error("unsupported element kind '{kind}'")]
    UnsupportedElementKind { kind: String },
}

impl FactoryError {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedElementKind { kind: kind.into() }
    }
}
