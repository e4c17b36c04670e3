//! Grid geometry and storage shared by the designers.
//!
//! [`get_rectangular_range`] resolves a two-corner selection into cells.
//! [`Grid`] stores optional cell contents row-major and produces the
//! invertible deltas ([`CellChange`], [`GridResize`]) the designers record
//! in their history.

use serde::{Deserialize, Serialize};

/// A cell address on a design grid.
///
/// Coordinates are signed and unvalidated: callers check them against the
/// document's [`GridSize`] before mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// 0-indexed row.
    pub row: i32,
    /// 0-indexed column.
    pub col: i32,
}

impl GridPosition {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Returns every cell in the rectangle spanned by two corners, inclusive.
///
/// Cells come back in row-major order. The corners may be given in any
/// order; all orderings of the same rectangle yield the same result.
/// Coordinates are not clamped, so negative or out-of-bounds corners are
/// computed on as given.
pub fn get_rectangular_range(start: GridPosition, end: GridPosition) -> Vec<GridPosition> {
    let (min_row, max_row) = (start.row.min(end.row), start.row.max(end.row));
    let (min_col, max_col) = (start.col.min(end.col), start.col.max(end.col));

    let width = (i64::from(max_col) - i64::from(min_col) + 1) as usize;
    let height = (i64::from(max_row) - i64::from(min_row) + 1) as usize;
    let mut cells = Vec::with_capacity(width.saturating_mul(height));

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            cells.push(GridPosition { row, col });
        }
    }
    cells
}

/// Dimensions of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Square grid of `n` by `n`.
    pub const fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `pos` addresses a cell inside this size.
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A change to one cell, recorded as before/after contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange<T> {
    pub position: GridPosition,
    pub before: Option<T>,
    pub after: Option<T>,
}

impl<T: Clone> CellChange<T> {
    /// The change that restores `before`.
    pub fn inverse(&self) -> Self {
        Self {
            position: self.position,
            before: self.after.clone(),
            after: self.before.clone(),
        }
    }
}

/// An invertible grid resize.
///
/// `outside` holds the occupied cells of the larger document that fall
/// outside the smaller size. Applying the resize re-places whichever of
/// them land inside `after`, so swapping `before` and `after` undoes a crop
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridResize<T> {
    pub before: GridSize,
    pub after: GridSize,
    pub outside: Vec<(GridPosition, T)>,
}

impl<T: Clone> GridResize<T> {
    /// The resize back to the original size, restoring cropped cells.
    pub fn inverse(&self) -> Self {
        Self {
            before: self.after,
            after: self.before,
            outside: self.outside.clone(),
        }
    }
}

/// Row-major storage of optional cell contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "GridData<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T> {
    size: GridSize,
    cells: Vec<Option<T>>,
}

/// Unchecked wire form of [`Grid`].
#[derive(Deserialize)]
struct GridData<T> {
    size: GridSize,
    cells: Vec<Option<T>>,
}

impl<T> TryFrom<GridData<T>> for Grid<T> {
    type Error = String;

    fn try_from(data: GridData<T>) -> Result<Self, Self::Error> {
        let needed = data
            .size
            .rows
            .checked_mul(data.size.cols)
            .ok_or_else(|| format!("grid of size {} is too large", data.size))?;
        if data.cells.len() != needed {
            return Err(format!(
                "grid of size {} needs {needed} cells, got {}",
                data.size,
                data.cells.len()
            ));
        }
        Ok(Self {
            size: data.size,
            cells: data.cells,
        })
    }
}

impl<T> Grid<T> {
    /// Creates an empty grid.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: (0..size.cell_count()).map(|_| None).collect(),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: GridPosition) -> bool {
        self.size.contains(pos)
    }

    fn index(&self, pos: GridPosition) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.row as usize * self.size.cols + pos.col as usize)
    }

    /// Contents of the cell at `pos`, or `None` if empty or out of bounds.
    pub fn get(&self, pos: GridPosition) -> Option<&T> {
        let idx = self.index(pos)?;
        self.cells.get(idx)?.as_ref()
    }

    /// Replaces the cell at `pos`, returning its previous contents.
    ///
    /// Out-of-bounds positions are ignored.
    pub fn set(&mut self, pos: GridPosition, value: Option<T>) -> Option<T> {
        let idx = self.index(pos)?;
        let slot = self.cells.get_mut(idx)?;
        std::mem::replace(slot, value)
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridPosition, &T)> + '_ {
        let cols = self.size.cols.max(1);
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            let pos = GridPosition::new((idx / cols) as i32, (idx % cols) as i32);
            cell.as_ref().map(|value| (pos, value))
        })
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

impl<T: Clone> Grid<T> {
    /// Returns a copy resized to `size`.
    ///
    /// The grid is anchored at the top-left: cells in the overlap keep their
    /// contents, cells outside it are dropped, new cells are empty.
    pub fn resized(&self, size: GridSize) -> Self {
        let mut grid = Self::new(size);
        for (pos, value) in self.occupied() {
            grid.set(pos, Some(value.clone()));
        }
        grid
    }

    /// Builds the resize delta to `size`, capturing cells that would be cropped.
    pub fn plan_resize(&self, size: GridSize) -> GridResize<T> {
        let outside = self
            .occupied()
            .filter(|(pos, _)| !size.contains(*pos))
            .map(|(pos, value)| (pos, value.clone()))
            .collect();
        GridResize {
            before: self.size,
            after: size,
            outside,
        }
    }

    /// Applies the `after` side of each change.
    pub fn apply_changes(&mut self, changes: &[CellChange<T>]) {
        for change in changes {
            self.set(change.position, change.after.clone());
        }
    }

    /// Resizes to `resize.after` and restores any `outside` cells that fit.
    pub fn apply_resize(&mut self, resize: &GridResize<T>) {
        *self = self.resized(resize.after);
        for (pos, value) in &resize.outside {
            if self.contains(*pos) {
                self.set(*pos, Some(value.clone()));
            }
        }
    }
}

impl<T: Clone + PartialEq> Grid<T> {
    /// Changes that would set every position in `positions` to `value`.
    ///
    /// Cells already holding `value` and out-of-bounds positions are skipped.
    pub fn diff_fill(
        &self,
        positions: impl IntoIterator<Item = GridPosition>,
        value: Option<&T>,
    ) -> Vec<CellChange<T>> {
        positions
            .into_iter()
            .filter(|pos| self.contains(*pos))
            .filter_map(|pos| {
                let before = self.get(pos);
                if before == value {
                    return None;
                }
                Some(CellChange {
                    position: pos,
                    before: before.cloned(),
                    after: value.cloned(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> GridPosition {
        GridPosition::new(row, col)
    }

    fn filled(size: GridSize) -> Grid<u32> {
        let mut grid = Grid::new(size);
        for row in 0..size.rows {
            for col in 0..size.cols {
                grid.set(pos(row as i32, col as i32), Some((row * 10 + col) as u32));
            }
        }
        grid
    }

    // --- Rectangular range ---

    #[test]
    fn test_range_row_major_scenario() {
        let cells = get_rectangular_range(pos(1, 0), pos(2, 4));
        let expected: Vec<GridPosition> = vec![
            pos(1, 0),
            pos(1, 1),
            pos(1, 2),
            pos(1, 3),
            pos(1, 4),
            pos(2, 0),
            pos(2, 1),
            pos(2, 2),
            pos(2, 3),
            pos(2, 4),
        ];
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_range_single_cell() {
        assert_eq!(get_rectangular_range(pos(3, 7), pos(3, 7)), vec![pos(3, 7)]);
    }

    #[test]
    fn test_range_all_corner_orderings_match() {
        let reference = get_rectangular_range(pos(1, 2), pos(4, 5));
        assert_eq!(get_rectangular_range(pos(4, 5), pos(1, 2)), reference);
        assert_eq!(get_rectangular_range(pos(1, 5), pos(4, 2)), reference);
        assert_eq!(get_rectangular_range(pos(4, 2), pos(1, 5)), reference);
        assert_eq!(reference.len(), 16);
    }

    #[test]
    fn test_range_accepts_negative_coordinates() {
        let cells = get_rectangular_range(pos(-1, -1), pos(0, 0));
        assert_eq!(cells, vec![pos(-1, -1), pos(-1, 0), pos(0, -1), pos(0, 0)]);
    }

    #[test]
    fn test_range_single_row_and_column() {
        assert_eq!(get_rectangular_range(pos(2, 5), pos(2, 1)).len(), 5);
        assert_eq!(get_rectangular_range(pos(0, 3), pos(6, 3)).len(), 7);
    }

    // --- GridSize ---

    #[test]
    fn test_size_contains() {
        let size = GridSize::new(2, 3);
        assert!(size.contains(pos(0, 0)));
        assert!(size.contains(pos(1, 2)));
        assert!(!size.contains(pos(2, 0)));
        assert!(!size.contains(pos(0, 3)));
        assert!(!size.contains(pos(-1, 0)));
        assert_eq!(size.cell_count(), 6);
        assert_eq!(size.to_string(), "2x3");
    }

    // --- Grid storage ---

    #[test]
    fn test_new_grid_is_empty() {
        let grid: Grid<u32> = Grid::new(GridSize::square(4));
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.get(pos(0, 0)), None);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut grid = Grid::new(GridSize::square(2));
        assert_eq!(grid.set(pos(1, 1), Some("a")), None);
        assert_eq!(grid.set(pos(1, 1), Some("b")), Some("a"));
        assert_eq!(grid.get(pos(1, 1)), Some(&"b"));
        assert_eq!(grid.set(pos(1, 1), None), Some("b"));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = Grid::new(GridSize::square(2));
        assert_eq!(grid.set(pos(5, 0), Some(1)), None);
        assert_eq!(grid.set(pos(0, -1), Some(1)), None);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_occupied_row_major() {
        let mut grid = Grid::new(GridSize::new(2, 3));
        grid.set(pos(1, 0), Some('c'));
        grid.set(pos(0, 2), Some('b'));
        grid.set(pos(0, 0), Some('a'));
        let cells: Vec<_> = grid.occupied().map(|(p, v)| (p, *v)).collect();
        assert_eq!(cells, vec![(pos(0, 0), 'a'), (pos(0, 2), 'b'), (pos(1, 0), 'c')]);
    }

    // --- Resize ---

    #[test]
    fn test_resized_grow_preserves_data() {
        let grid = filled(GridSize::square(2));
        let grown = grid.resized(GridSize::new(3, 4));
        assert_eq!(grown.size(), GridSize::new(3, 4));
        assert_eq!(grown.get(pos(1, 1)), Some(&11));
        assert_eq!(grown.get(pos(2, 3)), None);
        assert_eq!(grown.occupied_count(), 4);
    }

    #[test]
    fn test_resized_shrink_crops() {
        let grid = filled(GridSize::square(3));
        let shrunk = grid.resized(GridSize::new(2, 1));
        assert_eq!(shrunk.occupied_count(), 2);
        assert_eq!(shrunk.get(pos(0, 0)), Some(&0));
        assert_eq!(shrunk.get(pos(1, 0)), Some(&10));
    }

    #[test]
    fn test_plan_resize_captures_cropped_cells() {
        let grid = filled(GridSize::square(3));
        let plan = grid.plan_resize(GridSize::square(2));
        assert_eq!(plan.before, GridSize::square(3));
        assert_eq!(plan.after, GridSize::square(2));
        let cropped: Vec<GridPosition> = plan.outside.iter().map(|(p, _)| *p).collect();
        assert_eq!(cropped, vec![pos(0, 2), pos(1, 2), pos(2, 0), pos(2, 1), pos(2, 2)]);
    }

    #[test]
    fn test_resize_inverse_restores_shrink() {
        let original = filled(GridSize::square(3));
        let plan = original.plan_resize(GridSize::new(1, 2));

        let mut grid = original.clone();
        grid.apply_resize(&plan);
        assert_eq!(grid.size(), GridSize::new(1, 2));

        grid.apply_resize(&plan.inverse());
        assert_eq!(grid, original);
    }

    #[test]
    fn test_resize_inverse_mixed_axes() {
        let original = filled(GridSize::new(3, 2));
        let plan = original.plan_resize(GridSize::new(2, 4));

        let mut grid = original.clone();
        grid.apply_resize(&plan);
        assert_eq!(grid.get(pos(2, 0)), None);
        assert_eq!(grid.get(pos(1, 3)), None);

        grid.apply_resize(&plan.inverse());
        assert_eq!(grid, original);

        // Redo after undo lands on the same cropped grid
        grid.apply_resize(&plan);
        assert_eq!(grid, original.resized(GridSize::new(2, 4)));
    }

    // --- Cell changes ---

    #[test]
    fn test_deserialize_checks_cell_count() {
        let ok = r#"{"size": {"rows": 1, "cols": 2}, "cells": [null, 3]}"#;
        let grid: Grid<u32> = serde_json::from_str(ok).unwrap();
        assert_eq!(grid.get(pos(0, 1)), Some(&3));

        let short = r#"{"size": {"rows": 2, "cols": 2}, "cells": [null]}"#;
        assert!(serde_json::from_str::<Grid<u32>>(short).is_err());

        let huge = r#"{"size": {"rows": 9223372036854775808, "cols": 2}, "cells": []}"#;
        assert!(serde_json::from_str::<Grid<u32>>(huge).is_err());
    }

    #[test]
    fn test_cell_change_inverse() {
        let change = CellChange {
            position: pos(0, 1),
            before: None,
            after: Some(5),
        };
        let inverse = change.inverse();
        assert_eq!(inverse.before, Some(5));
        assert_eq!(inverse.after, None);
        assert_eq!(inverse.inverse(), change);
    }

    #[test]
    fn test_diff_fill_skips_unchanged_and_out_of_bounds() {
        let mut grid = Grid::new(GridSize::square(2));
        grid.set(pos(0, 0), Some(1));

        let changes = grid.diff_fill(get_rectangular_range(pos(0, 0), pos(2, 1)), Some(&1));
        let positions: Vec<GridPosition> = changes.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![pos(0, 1), pos(1, 0), pos(1, 1)]);
    }

    #[test]
    fn test_apply_changes_and_inverse() {
        let original = filled(GridSize::square(2));
        let changes = original.diff_fill(get_rectangular_range(pos(0, 0), pos(1, 0)), None);

        let mut grid = original.clone();
        grid.apply_changes(&changes);
        assert_eq!(grid.occupied_count(), 2);

        let inverse: Vec<CellChange<u32>> = changes.iter().map(CellChange::inverse).collect();
        grid.apply_changes(&inverse);
        assert_eq!(grid, original);
    }
}
