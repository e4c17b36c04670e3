/// Result type returned by undo and redo transitions.
use serde::{Deserialize, Serialize};

use crate::manager::UndoManagerState;

/// The outcome of a successful undo or redo.
///
/// `operation` is what the caller must apply to its document: the inverse
/// of the undone operation for undo, the original operation for redo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStep<Op> {
    /// History after the transition.
    pub state: UndoManagerState<Op>,
    /// Operation to apply to the document.
    pub operation: Op,
}

impl<Op> HistoryStep<Op> {
    /// Splits the step into its state and operation.
    pub fn into_parts(self) -> (UndoManagerState<Op>, Op) {
        (self.state, self.operation)
    }
}
