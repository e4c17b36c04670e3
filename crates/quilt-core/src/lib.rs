//! Document model for the quilt block and pattern designers.
//!
//! Both designers keep their document on a [`grid::Grid`] and route every
//! edit through an invertible operation recorded in a per-document
//! [`history::UndoManagerState`].

pub mod block;
pub mod grid;
pub mod history;
pub mod pattern;
pub mod rotation;

pub use block::{BlockDesigner, BlockOperation, Piece, ShapeKind};
pub use grid::{get_rectangular_range, CellChange, Grid, GridPosition, GridResize, GridSize};
pub use pattern::{
    BlockPlacement, Border, PatternDesigner, PatternLayout, PatternOperation, Sashing,
};
pub use rotation::Rotation;
