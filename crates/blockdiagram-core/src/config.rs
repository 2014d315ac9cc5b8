//! Editor configuration.

use crate::charset::{ArrowHeads, CharacterSet};
use crate::shapes::DEFAULT_JUNCTION_GLYPH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Parse(String),
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Canvas settings. Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Rows allocated when a canvas or loaded document is created.
    pub initial_rows: usize,
    /// Columns allocated when a canvas or loaded document is created.
    pub initial_cols: usize,
    /// Cursor blink period in milliseconds.
    pub cursor_blink_ms: u64,
    /// Glyph drawn where a horizontal and a vertical run cross.
    pub junction_glyph: char,
    /// Glyphs used by tools activated without their own set.
    pub char_set: CharacterSet,
    /// Arrowheads used by arrows activated without their own set.
    pub arrow_heads: ArrowHeads,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            initial_rows: 50,
            initial_cols: 120,
            cursor_blink_ms: 500,
            junction_glyph: DEFAULT_JUNCTION_GLYPH,
            char_set: CharacterSet::default(),
            arrow_heads: ArrowHeads::default(),
        }
    }
}

impl CanvasConfig {
    /// `<config dir>/blockdiagram/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("blockdiagram").join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, or defaults if there is no file.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&Self::default_path()?)
    }

    /// Load from `path`. Returns defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
