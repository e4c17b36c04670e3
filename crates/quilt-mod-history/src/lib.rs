/// Generic undo/redo history for design documents.
///
/// Provides an `UndoManagerState` that keeps bounded undo/redo stacks of
/// opaque, domain-defined operations. Every transition returns a new state;
/// inversion of an operation is supplied by the caller at undo time.
pub mod config;
pub mod manager;
pub mod operation;

pub use config::{HistoryConfig, MAX_HISTORY_SIZE};
pub use manager::{
    can_redo, can_undo, clear_history, create_undo_manager_state, record_operation,
    record_operation_with_capacity, redo, undo, UndoManagerState,
};
pub use operation::HistoryStep;
