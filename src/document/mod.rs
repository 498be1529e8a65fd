//! Floor document model
//!
//! A floor document is one venue's floor plan: canvas dimensions plus the
//! tables, zones, bars, walls and entrances placed on it. Documents travel as
//! JSON in the same camelCase shape the venue API stores.

pub mod error;
pub mod lint;
pub mod types;

pub use error::DocumentError;
pub use lint::{LintCategory, LintWarning};
pub use types::*;

use std::collections::HashSet;
use std::path::Path;

impl FloorDocument {
    /// Parse a document from JSON
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the hard invariants: ids are unique and every element has a
    /// positive size.
    ///
    /// Softer defects (overlaps, elements off the canvas) are reported by
    /// [`lint::check`] instead.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for el in &self.elements {
            if !seen.insert(el.id.as_str()) {
                return Err(DocumentError::duplicate(el.id.as_str()));
            }
            if !(el.bounds.w > 0.0 && el.bounds.h > 0.0) {
                return Err(DocumentError::invalid_size(
                    el.id.as_str(),
                    el.bounds.w,
                    el.bounds.h,
                ));
            }
        }
        Ok(())
    }
}
