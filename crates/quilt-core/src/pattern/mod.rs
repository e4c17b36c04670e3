//! Pattern designer: arranges saved blocks into a full quilt layout.
//!
//! Works like the block designer: edits become [`PatternOperation`]s that
//! are recorded then applied, with inverses computed at undo time.

mod layout;

pub use layout::{BlockPlacement, Border, PatternLayout, Sashing};

use anyhow::{bail, Result};
use quilt_config::DesignerConfig;
use serde::{Deserialize, Serialize};

use crate::grid::{get_rectangular_range, CellChange, GridPosition, GridResize, GridSize};
use crate::history::{
    clear_history, history_config, record_operation_with_capacity, redo, undo, HistoryConfig,
    UndoManagerState,
};
use layout::check_width;

/// Largest row or column count accepted when no config is supplied.
const DEFAULT_MAX_DIMENSION: usize = 40;

/// An undoable edit to a quilt layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatternOperation {
    /// One or more layout cells changed.
    SetCells(Vec<CellChange<BlockPlacement>>),
    /// The layout changed size.
    Resize(GridResize<BlockPlacement>),
    /// Sashing added, removed, or changed.
    SetSashing {
        before: Option<Sashing>,
        after: Option<Sashing>,
    },
    /// The border list changed.
    SetBorders {
        before: Vec<Border>,
        after: Vec<Border>,
    },
}

impl PatternOperation {
    /// The operation that exactly undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            PatternOperation::SetCells(changes) => PatternOperation::SetCells(
                changes.iter().rev().map(CellChange::inverse).collect(),
            ),
            PatternOperation::Resize(resize) => PatternOperation::Resize(resize.inverse()),
            PatternOperation::SetSashing { before, after } => PatternOperation::SetSashing {
                before: after.clone(),
                after: before.clone(),
            },
            PatternOperation::SetBorders { before, after } => PatternOperation::SetBorders {
                before: after.clone(),
                after: before.clone(),
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PatternOperation::SetCells(_) => "set_cells",
            PatternOperation::Resize(_) => "resize",
            PatternOperation::SetSashing { .. } => "set_sashing",
            PatternOperation::SetBorders { .. } => "set_borders",
        }
    }
}

/// A quilt layout with its undo/redo history.
pub struct PatternDesigner {
    layout: PatternLayout,
    history: UndoManagerState<PatternOperation>,
    history_config: HistoryConfig,
    max_dimension: usize,
    version: u64,
}

impl std::fmt::Debug for PatternDesigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDesigner")
            .field("size", &self.layout.grid.size())
            .field("blocks", &self.layout.grid.occupied_count())
            .field("borders", &self.layout.borders.len())
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl PatternDesigner {
    /// Creates an empty layout of `size` with default limits and history.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or above the default maximum.
    pub fn new(size: GridSize) -> Result<Self> {
        check_size(size, DEFAULT_MAX_DIMENSION)?;
        Ok(Self {
            layout: PatternLayout::new(size),
            history: UndoManagerState::new(),
            history_config: HistoryConfig::default(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            version: 0,
        })
    }

    /// Creates an empty layout using the sizes and limits from `config`.
    pub fn from_config(config: &DesignerConfig) -> Self {
        let mut config = config.clone();
        config.sanitize();
        Self {
            layout: PatternLayout::new(GridSize::new(config.pattern_rows, config.pattern_cols)),
            history: UndoManagerState::new(),
            history_config: history_config(&config),
            max_dimension: config.max_pattern_dimension,
            version: 0,
        }
    }

    pub fn layout(&self) -> &PatternLayout {
        &self.layout
    }

    pub fn size(&self) -> GridSize {
        self.layout.grid.size()
    }

    pub fn history(&self) -> &UndoManagerState<PatternOperation> {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn placement_at(&self, pos: GridPosition) -> Option<&BlockPlacement> {
        self.layout.grid.get(pos)
    }

    pub fn sashing(&self) -> Option<&Sashing> {
        self.layout.sashing.as_ref()
    }

    pub fn borders(&self) -> &[Border] {
        &self.layout.borders
    }

    /// Places a block at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the layout.
    pub fn place_block(&mut self, pos: GridPosition, placement: BlockPlacement) -> Result<()> {
        self.ensure_in_bounds(pos)?;
        let changes = self.layout.grid.diff_fill([pos], Some(&placement));
        self.commit_cells(changes);
        Ok(())
    }

    /// Removes the block at `pos`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the layout.
    pub fn remove_block(&mut self, pos: GridPosition) -> Result<()> {
        self.ensure_in_bounds(pos)?;
        let changes = self.layout.grid.diff_fill([pos], None);
        self.commit_cells(changes);
        Ok(())
    }

    /// Places `placement` in every cell between two corners as one undo step.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner is outside the layout.
    pub fn fill_range(
        &mut self,
        start: GridPosition,
        end: GridPosition,
        placement: BlockPlacement,
    ) -> Result<()> {
        self.ensure_in_bounds(start)?;
        self.ensure_in_bounds(end)?;
        let changes = self
            .layout
            .grid
            .diff_fill(get_rectangular_range(start, end), Some(&placement));
        self.commit_cells(changes);
        Ok(())
    }

    /// Empties every cell between two corners as one undo step.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner is outside the layout.
    pub fn clear_range(&mut self, start: GridPosition, end: GridPosition) -> Result<()> {
        self.ensure_in_bounds(start)?;
        self.ensure_in_bounds(end)?;
        let changes = self
            .layout
            .grid
            .diff_fill(get_rectangular_range(start, end), None);
        self.commit_cells(changes);
        Ok(())
    }

    /// Turns the block at `pos` a quarter clockwise. Empty cells are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `pos` is outside the layout.
    pub fn rotate_block(&mut self, pos: GridPosition) -> Result<()> {
        self.ensure_in_bounds(pos)?;
        let Some(placement) = self.layout.grid.get(pos) else {
            return Ok(());
        };
        let change = CellChange {
            position: pos,
            before: Some(placement.clone()),
            after: Some(placement.rotated()),
        };
        self.commit_cells(vec![change]);
        Ok(())
    }

    /// Resizes the layout, keeping blocks in the overlapping area.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or above the maximum.
    pub fn resize(&mut self, size: GridSize) -> Result<()> {
        check_size(size, self.max_dimension)?;
        if size == self.size() {
            return Ok(());
        }
        let plan = self.layout.grid.plan_resize(size);
        self.commit(PatternOperation::Resize(plan));
        Ok(())
    }

    /// Sets or removes the sashing.
    ///
    /// # Errors
    ///
    /// Returns an error if the sashing width is not a positive number.
    pub fn set_sashing(&mut self, sashing: Option<Sashing>) -> Result<()> {
        if let Some(s) = &sashing {
            check_width(s.width)?;
        }
        if sashing == self.layout.sashing {
            return Ok(());
        }
        self.commit(PatternOperation::SetSashing {
            before: self.layout.sashing.clone(),
            after: sashing,
        });
        Ok(())
    }

    /// Adds a border outside the existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the border width is not a positive number.
    pub fn add_border(&mut self, border: Border) -> Result<()> {
        check_width(border.width)?;
        let mut after = self.layout.borders.clone();
        after.push(border);
        self.commit(PatternOperation::SetBorders {
            before: self.layout.borders.clone(),
            after,
        });
        Ok(())
    }

    /// Removes the border at `index` (0 = innermost).
    ///
    /// # Errors
    ///
    /// Returns an error if there is no border at `index`.
    pub fn remove_border(&mut self, index: usize) -> Result<()> {
        if index >= self.layout.borders.len() {
            bail!(
                "No border at index {index}; the quilt has {} border(s)",
                self.layout.borders.len()
            );
        }
        let mut after = self.layout.borders.clone();
        after.remove(index);
        self.commit(PatternOperation::SetBorders {
            before: self.layout.borders.clone(),
            after,
        });
        Ok(())
    }

    /// Undoes the last edit. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(step) = undo(&self.history, PatternOperation::inverse) else {
            return false;
        };
        let (history, op) = step.into_parts();
        self.history = history;
        tracing::debug!(kind = op.kind(), "Undo pattern edit");
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
        tracing::debug!(kind = op.kind(), "Redo pattern edit");
        self.apply(&op);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Discards all undo/redo history, keeping the layout.
    pub fn clear_history(&mut self) {
        self.history = clear_history();
    }

    /// Replaces the layout and starts a fresh history.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout's size is outside the allowed range
    /// or a sashing/border width is invalid.
    pub fn load(&mut self, layout: PatternLayout) -> Result<()> {
        check_size(layout.grid.size(), self.max_dimension)?;
        if let Some(s) = &layout.sashing {
            check_width(s.width)?;
        }
        for border in &layout.borders {
            check_width(border.width)?;
        }
        self.layout = layout;
        self.history = clear_history();
        self.version += 1;
        Ok(())
    }

    fn ensure_in_bounds(&self, pos: GridPosition) -> Result<()> {
        if !self.layout.grid.contains(pos) {
            tracing::warn!("Rejected pattern edit at {pos}: outside {} layout", self.size());
            bail!("Position {pos} is outside the {} quilt layout", self.size());
        }
        Ok(())
    }

    fn commit_cells(&mut self, changes: Vec<CellChange<BlockPlacement>>) {
        if changes.is_empty() {
            return;
        }
        self.commit(PatternOperation::SetCells(changes));
    }

    fn commit(&mut self, op: PatternOperation) {
        self.history =
            record_operation_with_capacity(&self.history, op.clone(), self.history_config.capacity);
        self.apply(&op);
    }

    fn apply(&mut self, op: &PatternOperation) {
        match op {
            PatternOperation::SetCells(changes) => self.layout.grid.apply_changes(changes),
            PatternOperation::Resize(resize) => self.layout.grid.apply_resize(resize),
            PatternOperation::SetSashing { after, .. } => self.layout.sashing = after.clone(),
            PatternOperation::SetBorders { after, .. } => self.layout.borders = after.clone(),
        }
        self.version += 1;
    }
}

fn check_size(size: GridSize, max: usize) -> Result<()> {
    if size.rows == 0 || size.cols == 0 || size.rows > max || size.cols > max {
        bail!("Quilt layout size {size} must be between 1x1 and {max}x{max}");
    }
    Ok(())
}
