//! Editor configuration
//!
//! Every setting has a default, so a TOML file only needs the values it
//! changes:
//!
//! ```toml
//! [history]
//! max_entries = 100
//!
//! [factory]
//! unknown_kind = "reject"
//!
//! [grid]
//! snap = true
//! cell_size = 40
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::editor::{ElementSizes, HistoryOptions, UnknownKindPolicy};
use crate::interaction::{GridSnap, PanZoomOptions, DEFAULT_MIN_SIZE};

/// Errors that can occur when loading or checking a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// `[factory]` section
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub unknown_kind: UnknownKindPolicy,
    pub sizes: ElementSizes,
}

/// `[grid]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell_size: f64,
    /// Snap positions and sizes coming from edit scripts
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            snap: false,
        }
    }
}

/// `[resize]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
        }
    }
}

/// Configuration for an editing session
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history: HistoryOptions,
    pub factory: FactoryConfig,
    pub grid: GridConfig,
    pub viewport: PanZoomOptions,
    pub resize: ResizeConfig,
}

impl EditorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the editor cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_entries == 0 {
            return Err(ConfigError::invalid(
                "history.max_entries",
                "must keep at least one entry",
            ));
        }
        GridSnap::new(self.grid.cell_size)?;

        let vp = &self.viewport;
        if !(vp.min_zoom > 0.0 && vp.min_zoom.is_finite()) {
            return Err(ConfigError::invalid(
                "viewport.min_zoom",
                format!("must be positive, got {}", vp.min_zoom),
            ));
        }
        if !(vp.max_zoom >= vp.min_zoom && vp.max_zoom.is_finite()) {
            return Err(ConfigError::invalid(
                "viewport.max_zoom",
                format!("must be at least min_zoom ({}), got {}", vp.min_zoom, vp.max_zoom),
            ));
        }
        if !(vp.zoom_step > 0.0 && vp.zoom_step.is_finite()) {
            return Err(ConfigError::invalid(
                "viewport.zoom_step",
                format!("must be positive, got {}", vp.zoom_step),
            ));
        }

        if !(self.resize.min_width > 0.0 && self.resize.min_height > 0.0) {
            return Err(ConfigError::invalid(
                "resize",
                "minimum width and height must be positive",
            ));
        }

        let sizes = &self.factory.sizes;
        for (field, size) in [
            ("factory.sizes.table", sizes.table),
            ("factory.sizes.table_group", sizes.table_group),
            ("factory.sizes.bar", sizes.bar),
            ("factory.sizes.zone", sizes.zone),
            ("factory.sizes.wall", sizes.wall),
            ("factory.sizes.entrance", sizes.entrance),
        ] {
            if !(size.w > 0.0 && size.h > 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("default size must be positive, got {}x{}", size.w, size.h),
                ));
            }
        }
        Ok(())
    }

    /// The grid used for snapping, if snapping is on
    pub fn grid_snap(&self) -> Result<Option<GridSnap>, ConfigError> {
        if self.grid.snap {
            GridSnap::new(self.grid.cell_size).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Set the history capacity
    pub fn with_max_history(mut self, max_entries: usize) -> Self {
        self.history.max_entries = max_entries;
        self
    }

    /// Set whether edits that match no element still record history
    pub fn with_record_noop_edits(mut self, record: bool) -> Self {
        self.history.record_noop_edits = record;
        self
    }

    /// Set the unknown-kind policy
    pub fn with_unknown_kind_policy(mut self, policy: UnknownKindPolicy) -> Self {
        self.factory.unknown_kind = policy;
        self
    }

    /// Turn on grid snapping with the given cell size
    pub fn with_grid_snap(mut self, cell_size: f64) -> Self {
        self.grid.snap = true;
        self.grid.cell_size = cell_size;
        self
    }

    /// Set the minimum size reachable by resizing
    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.resize = ResizeConfig {
            min_width,
            min_height,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Size;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.history.max_entries, 50);
        assert!(config.history.record_noop_edits);
        assert_eq!(config.factory.unknown_kind, UnknownKindPolicy::Wall);
        assert_eq!(config.grid.cell_size, 20.0);
        assert!(!config.grid.snap);
        assert_eq!(config.viewport, PanZoomOptions::default());
        assert_eq!(config.resize.min_width, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EditorConfig::from_str("").expect("Should parse");
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
[history]
max_entries = 10
record_noop_edits = false

[factory]
unknown_kind = "reject"

[factory.sizes]
bar = { w = 160, h = 40 }

[grid]
snap = true
cell_size = 40

[viewport]
max_zoom = 4.0
"#;
        let config = EditorConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.history.max_entries, 10);
        assert!(!config.history.record_noop_edits);
        assert_eq!(config.factory.unknown_kind, UnknownKindPolicy::Reject);
        assert_eq!(config.factory.sizes.bar, Size::new(160.0, 40.0));
        assert_eq!(config.factory.sizes.wall, Size::new(60.0, 20.0));
        assert_eq!(config.grid_snap().unwrap().map(|g| g.cell_size()), Some(40.0));
        assert_eq!(config.viewport.max_zoom, 4.0);
        assert_eq!(config.viewport.min_zoom, 0.25);
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = EditorConfig::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_rejects_inverted_zoom_limits() {
        let result = EditorConfig::from_str("[viewport]\nmin_zoom = 3.0\nmax_zoom = 2.0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "viewport.max_zoom",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_history() {
        let err = EditorConfig::new().with_max_history(0).validate().unwrap_err();
        assert!(err.to_string().contains("history.max_entries"));
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let err = EditorConfig::new().with_grid_snap(0.0).validate().unwrap_err();
        assert!(err.to_string().contains("grid.cell_size"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = EditorConfig::new()
            .with_max_history(5)
            .with_record_noop_edits(false)
            .with_unknown_kind_policy(UnknownKindPolicy::Reject)
            .with_grid_snap(10.0)
            .with_min_size(20.0, 30.0);
        assert_eq!(config.history.max_entries, 5);
        assert!(!config.history.record_noop_edits);
        assert_eq!(config.factory.unknown_kind, UnknownKindPolicy::Reject);
        assert!(config.grid.snap);
        assert_eq!(config.resize.min_height, 30.0);
    }
}
