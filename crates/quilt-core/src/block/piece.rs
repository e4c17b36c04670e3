/// Geometric pieces placed on a block grid.
use serde::{Deserialize, Serialize};

use crate::rotation::Rotation;

/// Shape of a single block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Full square.
    Square,
    /// Square split on one diagonal (HST).
    HalfSquareTriangle,
    /// Square split on both diagonals (QST).
    QuarterSquareTriangle,
    /// Half-height rectangle.
    Rectangle,
    /// Appliqué circle.
    Circle,
}

impl ShapeKind {
    /// Whether rotating the shape changes how it looks.
    pub fn is_rotatable(self) -> bool {
        !matches!(self, ShapeKind::Square | ShapeKind::Circle)
    }
}

/// A shape cut from a fabric, at a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub shape: ShapeKind,
    #[serde(default)]
    pub rotation: Rotation,
    /// Fabric identifier (swatch id or palette role).
    pub fabric: String,
}

impl Piece {
    /// Creates an unrotated piece.
    pub fn new(shape: ShapeKind, fabric: impl Into<String>) -> Self {
        Self {
            shape,
            rotation: Rotation::default(),
            fabric: fabric.into(),
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Copy turned a quarter clockwise.
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.clockwise(),
            ..self.clone()
        }
    }
}
