/// Core undo/redo state with bounded history.
///
/// Operations are opaque to the manager. Recording appends to the undo
/// stack and voids the redo stack; undo hands back the caller-computed
/// inverse and moves the original onto the redo stack; redo replays the
/// original. Every transition borrows the current state and returns a new
/// one, so callers can compare states to detect changes.
use serde::{Deserialize, Serialize};

use crate::config::MAX_HISTORY_SIZE;
use crate::operation::HistoryStep;

/// Undo/redo stacks for a single document.
///
/// Each document owns one state value. Both stacks are ordered oldest first;
/// the tail is the top of the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoManagerState<Op> {
    /// Applied operations, oldest first.
    undo_stack: Vec<Op>,
    /// Undone operations, most-recently-undone last.
    redo_stack: Vec<Op>,
}

impl<Op> Default for UndoManagerState<Op> {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }
}

impl<Op> UndoManagerState<Op> {
    /// Creates a state with both stacks empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations that can be undone, oldest first.
    pub fn undo_stack(&self) -> &[Op] {
        &self.undo_stack
    }

    /// Operations that can be redone, most-recently-undone last.
    pub fn redo_stack(&self) -> &[Op] {
        &self.redo_stack
    }

    /// Number of operations on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of operations on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl<Op: Clone> UndoManagerState<Op> {
    /// Records an operation with the default capacity.
    ///
    /// See [`record_with_capacity`](Self::record_with_capacity).
    pub fn record(&self, op: Op) -> Self {
        self.record_with_capacity(op, MAX_HISTORY_SIZE)
    }

    /// Records an operation, keeping at most `capacity` entries.
    ///
    /// The oldest entries are dropped so the new undo stack holds exactly
    /// `capacity` operations when it would otherwise overflow. The redo
    /// stack is always emptied. `capacity` is clamped to
    /// `1..=MAX_HISTORY_SIZE`.
    pub fn record_with_capacity(&self, op: Op, capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_SIZE);
        let skip = (self.undo_stack.len() + 1).saturating_sub(capacity);
        if skip > 0 {
            tracing::debug!(evicted = skip, capacity, "History full, evicting oldest operations");
        }

        let mut undo_stack = Vec::with_capacity(self.undo_stack.len() + 1 - skip);
        undo_stack.extend(self.undo_stack[skip..].iter().cloned());
        undo_stack.push(op);

        Self {
            undo_stack,
            redo_stack: Vec::new(),
        }
    }

    /// Undoes the most recent operation.
    ///
    /// Returns the inverse computed by `invert` for the caller to apply,
    /// together with the new state. The original operation (not the
    /// inverse) goes onto the redo stack. Returns `None` if there's nothing
    /// to undo.
    pub fn undo<F>(&self, invert: F) -> Option<HistoryStep<Op>>
    where
        F: FnOnce(&Op) -> Op,
    {
        let (op, remaining) = self.undo_stack.split_last()?;
        let inverse = invert(op);

        let mut redo_stack = Vec::with_capacity(self.redo_stack.len() + 1);
        redo_stack.extend(self.redo_stack.iter().cloned());
        redo_stack.push(op.clone());

        Some(HistoryStep {
            state: Self {
                undo_stack: remaining.to_vec(),
                redo_stack,
            },
            operation: inverse,
        })
    }

    /// Redoes the most recently undone operation.
    ///
    /// Returns the original operation for the caller to re-apply verbatim.
    /// Returns `None` if there's nothing to redo.
    pub fn redo(&self) -> Option<HistoryStep<Op>> {
        let (op, remaining) = self.redo_stack.split_last()?;

        let mut undo_stack = Vec::with_capacity(self.undo_stack.len() + 1);
        undo_stack.extend(self.undo_stack.iter().cloned());
        undo_stack.push(op.clone());

        Some(HistoryStep {
            state: Self {
                undo_stack,
                redo_stack: remaining.to_vec(),
            },
            operation: op.clone(),
        })
    }
}

/// Returns a state with both stacks empty.
pub fn create_undo_manager_state<Op>() -> UndoManagerState<Op> {
    UndoManagerState::new()
}

/// Records `operation`, capped at [`MAX_HISTORY_SIZE`], and clears redo.
pub fn record_operation<Op: Clone>(
    state: &UndoManagerState<Op>,
    operation: Op,
) -> UndoManagerState<Op> {
    state.record(operation)
}

/// Records `operation` with a caller-chosen capacity, and clears redo.
pub fn record_operation_with_capacity<Op: Clone>(
    state: &UndoManagerState<Op>,
    operation: Op,
    capacity: usize,
) -> UndoManagerState<Op> {
    state.record_with_capacity(operation, capacity)
}

/// Undoes the latest operation; `None` when the undo stack is empty.
pub fn undo<Op, F>(state: &UndoManagerState<Op>, invert: F) -> Option<HistoryStep<Op>>
where
    Op: Clone,
    F: FnOnce(&Op) -> Op,
{
    state.undo(invert)
}

/// Redoes the latest undone operation; `None` when the redo stack is empty.
pub fn redo<Op: Clone>(state: &UndoManagerState<Op>) -> Option<HistoryStep<Op>> {
    state.redo()
}

/// Whether `state` has anything to undo.
pub fn can_undo<Op>(state: &UndoManagerState<Op>) -> bool {
    state.can_undo()
}

/// Whether `state` has anything to redo.
pub fn can_redo<Op>(state: &UndoManagerState<Op>) -> bool {
    state.can_redo()
}

/// Discards all history. Equivalent to [`create_undo_manager_state`].
pub fn clear_history<Op>() -> UndoManagerState<Op> {
    UndoManagerState::new()
}
