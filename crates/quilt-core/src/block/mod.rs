//! Block designer: a single quilt block drawn on a small grid of pieces.
//!
//! `BlockDesigner` owns the block's [`Grid`] and its undo history. Every
//! edit becomes a [`BlockOperation`] that is recorded first and then
//! applied; undo applies the operation's inverse and redo re-applies the
//! original. Replayed operations are never re-recorded.

mod piece;

pub use piece::{Piece, ShapeKind};

use anyhow::{bail, Result};
use quilt_config::DesignerConfig;
use serde::{Deserialize, Serialize};

use crate::grid::{get_rectangular_range, CellChange, Grid, GridPosition, GridResize, GridSize};
use crate::history::{
    clear_history, history_config, record_operation_with_capacity, redo, undo, HistoryConfig,
    UndoManagerState,
};

/// Largest block grid accepted when no config is supplied.
const DEFAULT_MAX_GRID_SIZE: usize = 12;

/// An undoable edit to a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockOperation {
    /// One or more cells changed contents.
    SetCells(Vec<CellChange<Piece>>),
    /// The grid changed size.
    Resize(GridResize<Piece>),
}

impl BlockOperation {
    /// The operation that exactly undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            BlockOperation::SetCells(changes) => {
                BlockOperation::SetCells(changes.iter().rev().map(CellChange::inverse).collect())
            }
            BlockOperation::Resize(resize) => BlockOperation::Resize(resize.inverse()),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockOperation::SetCells(_) => "set_cells",
            BlockOperation::Resize(_) => "resize",
        }
    }
}

/// A block document with its undo/redo history.
pub struct BlockDesigner {
    /// Piece layout.
    grid: Grid<Piece>,
    /// Undo/redo stacks.
    history: UndoManagerState<BlockOperation>,
    history_config: HistoryConfig,
    /// Largest row or column count accepted on resize.
    max_grid_size: usize,
    /// Fabric for pieces placed without an explicit one.
    default_fabric: String,
    /// Bumped on every document mutation, including undo/redo.
    version: u64,
}

impl std::fmt::Debug for BlockDesigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockDesigner")
            .field("size", &self.grid.size())
            .field("pieces", &self.grid.occupied_count())
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl BlockDesigner {
    /// Creates an empty block of `size` with default limits and history.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the default
    /// maximum block size.
    pub fn new(size: GridSize) -> Result<Self> {
        check_size(size, DEFAULT_MAX_GRID_SIZE)?;
        Ok(Self {
            grid: Grid::new(size),
            history: UndoManagerState::new(),
            history_config: HistoryConfig::default(),
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            default_fabric: DesignerConfig::default().default_fabric,
            version: 0,
        })
    }

    /// Creates an empty block using the sizes and limits from `config`.
    pub fn from_config(config: &DesignerConfig) -> Self {
        let mut config = config.clone();
        config.sanitize();
        Self {
            grid: Grid::new(GridSize::square(config.block_grid_size)),
            history: UndoManagerState::new(),
            history_config: history_config(&config),
            max_grid_size: config.max_block_grid_size,
            default_fabric: config.default_fabric,
            version: 0,
        }
    }

    pub fn grid(&self) -> &Grid<Piece> {
        &self.grid
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn history(&self) -> &UndoManagerState<BlockOperation> {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn default_fabric(&self) -> &str {
        &self.default_fabric
    }

    /// Piece at `pos`, if any.
    pub fn piece_at(&self, pos: GridPosition) -> Option<&Piece> {
        self.grid.get(pos)
    }

    /// Places `piece` at `pos`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the block.
    pub fn place_piece(&mut self, pos: GridPosition, piece: Piece) -> Result<()> {
        self.ensure_in_bounds(pos)?;
        let changes = self.grid.diff_fill([pos], Some(&piece));
        self.commit_cells(changes);
        Ok(())
    }

    /// Removes the piece at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the block.
    pub fn erase(&mut self, pos: GridPosition) -> Result<()> {
        self.ensure_in_bounds(pos)?;
        let changes = self.grid.diff_fill([pos], None);
        self.commit_cells(changes);
        Ok(())
    }

    /// Fills the rectangle between two corners with `piece` as one undo step.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner is outside the block.
    pub fn paint_range(
        &mut self,
        start: GridPosition,
        end: GridPosition,
        piece: Piece,
    ) -> Result<()> {
        self.ensure_in_bounds(start)?;
        self.ensure_in_bounds(end)?;
        let changes = self
            .grid
            .diff_fill(get_rectangular_range(start, end), Some(&piece));
        self.commit_cells(changes);
        Ok(())
    }

    /// Clears the rectangle between two corners as one undo step.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner is outside the block.
    pub fn erase_range(&mut self, start: GridPosition, end: GridPosition) -> Result<()> {
        self.ensure_in_bounds(start)?;
        self.ensure_in_bounds(end)?;
        let changes = self.grid.diff_fill(get_rectangular_range(start, end), None);
        self.commit_cells(changes);
        Ok(())
    }

    /// Turns the piece at `pos` a quarter clockwise.
    ///
    /// Empty cells and symmetric shapes are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the block.
    pub fn rotate_piece(&mut self, pos: GridPosition) -> Result<()> {
        self.ensure_in_bounds(pos)?;
        let Some(piece) = self.grid.get(pos) else {
            return Ok(());
        };
        if !piece.shape.is_rotatable() {
            return Ok(());
        }
        let change = CellChange {
            position: pos,
            before: Some(piece.clone()),
            after: Some(piece.rotated()),
        };
        self.commit_cells(vec![change]);
        Ok(())
    }

    /// Resizes the block, keeping pieces in the overlapping area.
    ///
    /// Pieces cropped by a shrink come back on undo.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or above the maximum.
    pub fn resize(&mut self, size: GridSize) -> Result<()> {
        check_size(size, self.max_grid_size)?;
        if size == self.grid.size() {
            return Ok(());
        }
        let plan = self.grid.plan_resize(size);
        self.commit(BlockOperation::Resize(plan));
        Ok(())
    }

    /// Undoes the last edit. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(step) = undo(&self.history, BlockOperation::inverse) else {
            return false;
        };
        let (history, op) = step.into_parts();
        self.history = history;
        tracing::debug!(kind = op.kind(), "Undo block edit");
        self.apply(&op);
        true
    }

    /// Redoes the last undone edit. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(step) = redo(&self.history) else {
            return false;
        };
        let (history, op) = step.into_parts();
        self.history = history;
        tracing::debug!(kind = op.kind(), "Redo block edit");
        self.apply(&op);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Discards all undo/redo history, keeping the document.
    pub fn clear_history(&mut self) {
        self.history = clear_history();
    }

    /// Replaces the document with `grid` and starts a fresh history.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid's size is outside the allowed range.
    pub fn load(&mut self, grid: Grid<Piece>) -> Result<()> {
        check_size(grid.size(), self.max_grid_size)?;
        self.grid = grid;
        self.history = clear_history();
        self.version += 1;
        Ok(())
    }

    fn ensure_in_bounds(&self, pos: GridPosition) -> Result<()> {
        if !self.grid.contains(pos) {
            tracing::warn!("Rejected block edit at {pos}: outside {} grid", self.grid.size());
            bail!("Position {pos} is outside the {} block grid", self.grid.size());
        }
        Ok(())
    }

    fn commit_cells(&mut self, changes: Vec<CellChange<Piece>>) {
        if changes.is_empty() {
            return;
        }
        self.commit(BlockOperation::SetCells(changes));
    }

    /// Records `op` and applies it.
    fn commit(&mut self, op: BlockOperation) {
        self.history =
            record_operation_with_capacity(&self.history, op.clone(), self.history_config.capacity);
        self.apply(&op);
    }

    /// Applies `op` to the document without touching history.
    fn apply(&mut self, op: &BlockOperation) {
        match op {
            BlockOperation::SetCells(changes) => self.grid.apply_changes(changes),
            BlockOperation::Resize(resize) => self.grid.apply_resize(resize),
        }
        self.version += 1;
    }
}

fn check_size(size: GridSize, max: usize) -> Result<()> {
    if size.rows == 0 || size.cols == 0 || size.rows > max || size.cols > max {
        bail!("Block grid size {size} must be between 1x1 and {max}x{max}");
    }
    Ok(())
}
