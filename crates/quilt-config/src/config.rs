/// Designer configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use quilt_mod_history::MAX_HISTORY_SIZE;
use serde::{Deserialize, Serialize};

/// Upper bound for `max_block_grid_size`.
const BLOCK_GRID_CEILING: usize = 32;

/// Upper bound for `max_pattern_dimension`.
const PATTERN_DIMENSION_CEILING: usize = 200;

/// Upper bound for `history_size`.
const HISTORY_SIZE_CEILING: usize = MAX_HISTORY_SIZE;

/// Settings shared by the block and pattern designers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Rows and columns of a new block (blocks are square).
    pub block_grid_size: usize,
    /// Largest block grid the block designer accepts on resize.
    pub max_block_grid_size: usize,
    /// Rows of a new quilt layout.
    pub pattern_rows: usize,
    /// Columns of a new quilt layout.
    pub pattern_cols: usize,
    /// Largest row or column count the pattern designer accepts.
    pub max_pattern_dimension: usize,
    /// Undo entries kept per document.
    pub history_size: usize,
    /// Fabric used when a piece is placed without one.
    pub default_fabric: String,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            block_grid_size: 4,
            max_block_grid_size: 12,
            pattern_rows: 5,
            pattern_cols: 5,
            max_pattern_dimension: 40,
            history_size: MAX_HISTORY_SIZE,
            default_fabric: "background".to_string(),
        }
    }
}

impl DesignerConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `QUILT_CONFIG` environment variable
    /// 2. `quilt/quilt.json` under the platform config directory
    /// 3. `quilt.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("QUILT_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("quilt").join("quilt.json"))
            .unwrap_or_else(|| PathBuf::from("quilt.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<DesignerConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Don't overwrite a broken file
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.max_block_grid_size = self.max_block_grid_size.clamp(1, BLOCK_GRID_CEILING);
        self.block_grid_size = self.block_grid_size.clamp(1, self.max_block_grid_size);

        self.max_pattern_dimension = self
            .max_pattern_dimension
            .clamp(1, PATTERN_DIMENSION_CEILING);
        self.pattern_rows = self.pattern_rows.clamp(1, self.max_pattern_dimension);
        self.pattern_cols = self.pattern_cols.clamp(1, self.max_pattern_dimension);

        self.history_size = self.history_size.clamp(1, HISTORY_SIZE_CEILING);

        if self.default_fabric.trim().is_empty() {
            self.default_fabric = "background".to_string();
        }
    }
}
