//! Configuration for an editing session.

use serde::{Deserialize, Serialize};

/// Default number of undo steps retained.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 50;

fn default_max_history_depth() -> usize {
    DEFAULT_MAX_HISTORY_DEPTH
}

/// Top-level timeline configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Maximum number of undo entries kept. When exceeded, the oldest entry is
    /// dropped.
    #[serde(default = "default_max_history_depth")]
    pub max_history_depth: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl TimelineConfig {
    pub fn with_max_history_depth(mut self, depth: usize) -> Self {
        self.max_history_depth = depth;
        self
    }
}
