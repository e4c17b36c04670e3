//! JSON edit scripts replayed against a block designer.
//!
//! A script is an array of steps, each tagged by `action`:
//!
//! ```json
//! [
//!   { "action": "paint", "from": {"row": 0, "col": 0}, "to": {"row": 1, "col": 1}, "shape": "square" },
//!   { "action": "rotate", "at": {"row": 0, "col": 0} },
//!   { "action": "undo" }
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use quilt_core::{BlockDesigner, GridPosition, GridSize, Piece, Rotation, ShapeKind};
use serde::Deserialize;

/// One scripted block edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Place {
        at: GridPosition,
        #[serde(flatten)]
        piece: PieceSpec,
    },
    Erase {
        at: GridPosition,
    },
    Paint {
        from: GridPosition,
        to: GridPosition,
        #[serde(flatten)]
        piece: PieceSpec,
    },
    EraseRange {
        from: GridPosition,
        to: GridPosition,
    },
    Rotate {
        at: GridPosition,
    },
    Resize {
        rows: usize,
        cols: usize,
    },
    Undo,
    Redo,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Place { .. } => "place",
            Step::Erase { .. } => "erase",
            Step::Paint { .. } => "paint",
            Step::EraseRange { .. } => "erase_range",
            Step::Rotate { .. } => "rotate",
            Step::Resize { .. } => "resize",
            Step::Undo => "undo",
            Step::Redo => "redo",
        }
    }
}

/// Piece fields of a step; the fabric falls back to the designer default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PieceSpec {
    pub shape: ShapeKind,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub fabric: Option<String>,
}

impl PieceSpec {
    fn to_piece(&self, default_fabric: &str) -> Piece {
        let fabric = self.fabric.as_deref().unwrap_or(default_fabric);
        Piece::new(self.shape, fabric).with_rotation(self.rotation)
    }
}

/// Parses a script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).context("Failed to parse edit script")
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read edit script: {}", path.display()))?;
    parse_script(&json).with_context(|| format!("Invalid edit script: {}", path.display()))
}

/// Applies every step in order, stopping at the first rejected edit.
pub fn run(block: &mut BlockDesigner, steps: &[Step]) -> Result<()> {
    for (i, step) in steps.iter().enumerate() {
        apply_step(block, step)
            .with_context(|| format!("Step {} ({}) failed", i + 1, step.name()))?;
    }
    tracing::debug!(steps = steps.len(), "Replayed edit script");
    Ok(())
}

fn apply_step(block: &mut BlockDesigner, step: &Step) -> Result<()> {
    match step {
        Step::Place { at, piece } => {
            let piece = piece.to_piece(block.default_fabric());
            block.place_piece(*at, piece)
        }
        Step::Erase { at } => block.erase(*at),
        Step::Paint { from, to, piece } => {
            let piece = piece.to_piece(block.default_fabric());
            block.paint_range(*from, *to, piece)
        }
        Step::EraseRange { from, to } => block.erase_range(*from, *to),
        Step::Rotate { at } => block.rotate_piece(*at),
        Step::Resize { rows, cols } => block.resize(GridSize::new(*rows, *cols)),
        Step::Undo => {
            if !block.undo() {
                tracing::info!("Nothing to undo");
            }
            Ok(())
        }
        Step::Redo => {
            if !block.redo() {
                tracing::info!("Nothing to redo");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> BlockDesigner {
        BlockDesigner::new(GridSize::square(3)).unwrap()
    }

    #[test]
    fn test_parse_all_actions() {
        let json = r#"[
            {"action": "place", "at": {"row": 0, "col": 0}, "shape": "circle", "fabric": "gold"},
            {"action": "erase", "at": {"row": 0, "col": 0}},
            {"action": "paint", "from": {"row": 0, "col": 0}, "to": {"row": 1, "col": 1},
             "shape": "half_square_triangle", "rotation": 90},
            {"action": "erase_range", "from": {"row": 0, "col": 0}, "to": {"row": 0, "col": 1}},
            {"action": "rotate", "at": {"row": 1, "col": 1}},
            {"action": "resize", "rows": 2, "cols": 5},
            {"action": "undo"},
            {"action": "redo"}
        ]"#;
        let steps = parse_script(json).unwrap();
        let names: Vec<&str> = steps.iter().map(Step::name).collect();
        assert_eq!(
            names,
            ["place", "erase", "paint", "erase_range", "rotate", "resize", "undo", "redo"]
        );
        assert_eq!(
            steps[2],
            Step::Paint {
                from: GridPosition::new(0, 0),
                to: GridPosition::new(1, 1),
                piece: PieceSpec {
                    shape: ShapeKind::HalfSquareTriangle,
                    rotation: Rotation::R90,
                    fabric: None,
                },
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_action() {
        assert!(parse_script(r#"[{"action": "explode"}]"#).is_err());
    }

    #[test]
    fn test_run_applies_steps() {
        let steps = parse_script(
            r#"[
                {"action": "paint", "from": {"row": 0, "col": 0}, "to": {"row": 2, "col": 2}, "shape": "square"},
                {"action": "erase", "at": {"row": 1, "col": 1}},
                {"action": "undo"},
                {"action": "undo"},
                {"action": "redo"}
            ]"#,
        )
        .unwrap();
        let mut block = block();
        run(&mut block, &steps).unwrap();
        assert_eq!(block.grid().occupied_count(), 9);
        assert!(block.can_redo());
        assert_eq!(
            block.piece_at(GridPosition::new(1, 1)).unwrap().fabric,
            "background"
        );
    }

    #[test]
    fn test_run_stops_at_rejected_step() {
        let steps = parse_script(
            r#"[
                {"action": "place", "at": {"row": 0, "col": 0}, "shape": "square"},
                {"action": "place", "at": {"row": 9, "col": 0}, "shape": "square"},
                {"action": "place", "at": {"row": 1, "col": 0}, "shape": "square"}
            ]"#,
        )
        .unwrap();
        let mut block = block();
        let err = run(&mut block, &steps).unwrap_err();
        assert!(err.to_string().contains("Step 2 (place)"));
        assert_eq!(block.grid().occupied_count(), 1);
    }

    #[test]
    fn test_undo_on_empty_history_is_not_an_error() {
        let steps = parse_script(r#"[{"action": "undo"}, {"action": "redo"}]"#).unwrap();
        run(&mut block(), &steps).unwrap();
    }

    #[test]
    fn test_load_script_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edits.json");
        std::fs::write(&path, r#"[{"action": "resize", "rows": 2, "cols": 2}]"#).unwrap();
        let steps = load_script(&path).unwrap();
        assert_eq!(steps, vec![Step::Resize { rows: 2, cols: 2 }]);

        assert!(load_script(&dir.path().join("missing.json")).is_err());
    }
}
