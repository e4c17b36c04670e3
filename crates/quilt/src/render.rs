//! Plain-text preview of a block grid.

use quilt_core::{Grid, GridPosition, Piece, Rotation, ShapeKind};

/// Character drawn for an empty cell.
const EMPTY: char = '.';

fn glyph(piece: &Piece) -> char {
    let turned = matches!(piece.rotation, Rotation::R90 | Rotation::R270);
    match piece.shape {
        ShapeKind::Square => '#',
        ShapeKind::HalfSquareTriangle if turned => '\\',
        ShapeKind::HalfSquareTriangle => '/',
        ShapeKind::QuarterSquareTriangle => 'X',
        ShapeKind::Rectangle if turned => '|',
        ShapeKind::Rectangle => '=',
        ShapeKind::Circle => 'o',
    }
}

/// Renders one line per row, one character per cell.
pub fn render_grid(grid: &Grid<Piece>) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size.rows * (size.cols + 1));
    for row in 0..size.rows {
        for col in 0..size.cols {
            let pos = GridPosition::new(row as i32, col as i32);
            out.push(grid.get(pos).map_or(EMPTY, glyph));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_core::GridSize;

    #[test]
    fn test_render_empty() {
        let grid: Grid<Piece> = Grid::new(GridSize::new(2, 3));
        assert_eq!(render_grid(&grid), "...\n...\n");
    }

    #[test]
    fn test_render_shapes_and_rotation() {
        let mut grid = Grid::new(GridSize::new(1, 4));
        grid.set(GridPosition::new(0, 0), Some(Piece::new(ShapeKind::Square, "a")));
        grid.set(
            GridPosition::new(0, 1),
            Some(Piece::new(ShapeKind::HalfSquareTriangle, "a")),
        );
        grid.set(
            GridPosition::new(0, 2),
            Some(Piece::new(ShapeKind::HalfSquareTriangle, "a").with_rotation(Rotation::R90)),
        );
        grid.set(
            GridPosition::new(0, 3),
            Some(Piece::new(ShapeKind::Rectangle, "a").with_rotation(Rotation::R270)),
        );
        assert_eq!(render_grid(&grid), "#/\\|\n");
    }
}
