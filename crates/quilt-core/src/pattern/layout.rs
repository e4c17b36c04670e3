/// Quilt layout document: placed blocks, sashing, and borders.
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridSize};
use crate::rotation::Rotation;

/// A saved block placed in one layout cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPlacement {
    /// Identifier of the block design.
    pub block_id: String,
    #[serde(default)]
    pub rotation: Rotation,
}

impl BlockPlacement {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            rotation: Rotation::default(),
        }
    }

    /// Copy turned a quarter clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.clockwise(),
            ..self.clone()
        }
    }
}

/// Strips sewn between blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sashing {
    /// Finished width in inches.
    pub width: f64,
    pub fabric: String,
}

/// A border around the whole quilt, innermost first in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Finished width in inches.
    pub width: f64,
    pub fabric: String,
}

/// Everything the pattern designer edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternLayout {
    pub grid: Grid<BlockPlacement>,
    #[serde(default)]
    pub sashing: Option<Sashing>,
    #[serde(default)]
    pub borders: Vec<Border>,
}

impl PatternLayout {
    /// Empty layout of `size` with no sashing or borders.
    pub fn new(size: GridSize) -> Self {
        Self {
            grid: Grid::new(size),
            sashing: None,
            borders: Vec::new(),
        }
    }
}

/// Checks a sashing or border width.
pub(crate) fn check_width(width: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        bail!("Width must be a positive number of inches, got {width}");
    }
    Ok(())
}
