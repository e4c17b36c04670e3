//! Capacity settings for the history system.

use serde::{Deserialize, Serialize};

/// Maximum number of operations retained on the undo stack.
/// Oldest operations are evicted when this limit is exceeded.
pub const MAX_HISTORY_SIZE: usize = 100;

/// Configuration for a document's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Max operations kept on the undo stack.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_HISTORY_SIZE,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with the given capacity, clamped to
    /// `1..=MAX_HISTORY_SIZE`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.clamp(1, MAX_HISTORY_SIZE),
        }
    }
}
