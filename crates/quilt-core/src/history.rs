// Re-exports from quilt-mod-history used by the designers.
pub use quilt_mod_history::{
    clear_history, record_operation_with_capacity, redo, undo, HistoryConfig, HistoryStep,
    UndoManagerState, MAX_HISTORY_SIZE,
};

use quilt_config::DesignerConfig;

/// History settings derived from the designer config.
pub fn history_config(config: &DesignerConfig) -> HistoryConfig {
    HistoryConfig::with_capacity(config.history_size)
}
