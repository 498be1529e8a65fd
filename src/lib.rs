//! Floor Editor - an undoable editor for venue floor plans
//!
//! This library provides the floor document model, a bounded-history
//! reducer, pointer helpers for interactive canvases, and a small edit-script
//! language that replays editor operations against a document.
//!
//! # Example
//!
//! ```rust
//! use floor_editor::{apply_script_with_config, EditorConfig, FloorDocument, SequentialIds};
//!
//! let doc = FloorDocument::new("venue-1", "Main hall", 800.0, 600.0);
//! let state = apply_script_with_config(
//!     doc,
//!     r#"add table t1 [number: "1", seats: 4] at 100, 100"#,
//!     &EditorConfig::default(),
//!     SequentialIds::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(state.layout().elements.len(), 1);
//! assert_eq!(state.layout().elements[0].id.as_str(), "el-1");
//! ```

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod parser;
pub mod script;

pub use config::{ConfigError, EditorConfig};
pub use document::{
    Bounds, DocumentError, ElementId, ElementKind, FloorDocument, FloorElement, Point, Size,
};
pub use editor::{
    reduce, Action, Editor, EditorState, ElementFactory, ElementPatch, ElementToAdd, FactoryError,
    IdGenerator, SequentialIds, TimestampIds,
};
pub use error::ParseError;
pub use interaction::{DragTracker, GridSnap, ResizeTracker, Viewport};
pub use parser::{parse, Script};
pub use script::{Interpreter, ScriptError};

use thiserror::Error;

/// Errors that can occur while applying an edit script
#[derive(Debug, Error)]
pub enum EditError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error while replaying a statement
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

impl From<Vec<ParseError>> for EditError {
    fn from(errors: Vec<ParseError>) -> Self {
        EditError::Parse(errors)
    }
}

impl EditError {
    /// Render the error against the script it came from. Script and parse
    /// errors get ariadne source snippets, everything else its message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            EditError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            EditError::Script(e) => e.format(source, filename),
            other => other.to_string(),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Apply a script to `layout` with default settings and timestamp ids
pub fn apply_script(layout: FloorDocument, source: &str) -> Result<EditorState, EditError> {
    apply_script_with_config(layout, source, &EditorConfig::default(), TimestampIds::new())
}

/// Apply a script to `layout` with custom settings and id source
///
/// The returned state carries the full undo history of the replay, starting
/// from `layout` as its oldest snapshot.
pub fn apply_script_with_config<G: IdGenerator>(
    layout: FloorDocument,
    source: &str,
    config: &EditorConfig,
    ids: G,
) -> Result<EditorState, EditError> {
    config.validate()?;
    let script = parse(source)?;

    let mut editor = Editor::from_config(layout, config, ids);
    Interpreter::new(&mut editor)
        .with_snap(config.grid_snap()?)
        .with_min_size(config.resize.min_width, config.resize.min_height)
        .run(&script)?;

    Ok(editor.into_state())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> FloorDocument {
        FloorDocument::new("v1", "Main hall", 800.0, 600.0)
    }

    #[test]
    fn test_apply_script_builds_history() {
        let state = apply_script(doc(), "add wall\nadd bar\nundo").unwrap();
        assert_eq!(state.layout().elements.len(), 1);
        assert_eq!(state.history().len(), 3);
        assert!(state.can_redo());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = apply_script(doc(), "add wall at 1,").unwrap_err();
        assert!(matches!(err, EditError::Parse(_)));
        let rendered = err.format("add wall at 1,", "edit.floor");
        assert!(rendered.contains("edit.floor"));
    }

    #[test]
    fn test_script_error_is_reported() {
        let err = apply_script(doc(), "remove ghost").unwrap_err();
        assert!(matches!(err, EditError::Script(ScriptError::UnknownReference { .. })));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EditorConfig::new().with_max_history(0);
        let err = apply_script_with_config(doc(), "undo", &config, SequentialIds::default())
            .unwrap_err();
        assert!(matches!(err, EditError::Config(_)));
    }

    #[test]
    fn test_config_snaps_positions() {
        let config = EditorConfig::new().with_grid_snap(20.0);
        let state =
            apply_script_with_config(doc(), "add wall at 33, 9", &config, SequentialIds::default())
                .unwrap();
        assert_eq!(state.layout().elements[0].bounds.origin(), Point::new(40.0, 0.0));
    }
}
