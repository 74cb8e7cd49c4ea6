//! Snapshot-based undo/redo history for the kept-segment set.
//!
//! - Undo/redo stacks of `SegmentSet` snapshots, each with a label
//! - Pushing a new entry clears the redo stack (no branching)
//! - Configurable maximum depth; the oldest entry is dropped silently
//! - Undo/redo on an empty stack hands the current state straight back
//!
//! # Usage
//!
//! ```
//! use kc_common::TimeOffset;
//! use kc_timeline::{EditHistory, SegmentSet};
//!
//! let mut history = EditHistory::new(50);
//! let mut current = SegmentSet::full(TimeOffset::from_whole_secs(60));
//!
//! // Before an edit, store a copy of the state being replaced
//! history.push("Delete", current.clone());
//! current
//!     .delete(TimeOffset::from_whole_secs(10), TimeOffset::from_whole_secs(20))
//!     .unwrap();
//!
//! // Undo swaps the live state for the stored one
//! current = history.undo(current);
//! assert_eq!(current.total_duration(), TimeOffset::from_whole_secs(60));
//! assert!(history.can_redo());
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use crate::segments::SegmentSet;

/// A single entry in the undo/redo history.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Human-readable label of the action this entry reverts or reapplies.
    pub label: String,
    /// The segment set at this point in history.
    pub snapshot: SegmentSet,
    /// When this entry was created.
    pub timestamp: Instant,
}

impl HistoryEntry {
    fn new(label: impl Into<String>, snapshot: SegmentSet) -> Self {
        Self {
            label: label.into(),
            snapshot,
            timestamp: Instant::now(),
        }
    }
}

/// Bounded undo/redo stacks of segment-set snapshots.
///
/// Both stacks keep their most recent entry at the back.
#[derive(Debug)]
pub struct EditHistory {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(kc_common::DEFAULT_MAX_HISTORY_DEPTH)
    }
}

impl EditHistory {
    /// Create an empty history keeping at most `max_depth` undo entries.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth,
        }
    }

    /// Record the state *before* an edit.
    ///
    /// Clears the redo stack unconditionally. If the undo stack grows past
    /// `max_depth`, the oldest entry is discarded.
    pub fn push(&mut self, label: &str, snapshot: SegmentSet) {
        self.redo_stack.clear();
        self.undo_stack.push_back(HistoryEntry::new(label, snapshot));
        Self::enforce_depth(&mut self.undo_stack, self.max_depth);

        tracing::debug!(
            label,
            undo_depth = self.undo_stack.len(),
            "History entry pushed"
        );
    }

    /// Step back one edit.
    ///
    /// Moves `current` onto the redo stack and returns the most recent undo
    /// snapshot. With nothing to undo, `current` is returned unchanged.
    pub fn undo(&mut self, current: SegmentSet) -> SegmentSet {
        let Some(entry) = self.undo_stack.pop_back() else {
            return current;
        };

        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.undo_stack.len(),
            "Undo"
        );

        self.redo_stack
            .push_back(HistoryEntry::new(entry.label, current));
        Self::enforce_depth(&mut self.redo_stack, self.max_depth);
        entry.snapshot
    }

    /// Step forward one undone edit.
    ///
    /// Moves `current` onto the undo stack and returns the most recent redo
    /// snapshot. With nothing to redo, `current` is returned unchanged.
    pub fn redo(&mut self, current: SegmentSet) -> SegmentSet {
        let Some(entry) = self.redo_stack.pop_back() else {
            return current;
        };

        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.redo_stack.len(),
            "Redo"
        );

        self.undo_stack
            .push_back(HistoryEntry::new(entry.label, current));
        Self::enforce_depth(&mut self.undo_stack, self.max_depth);
        entry.snapshot
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the action that would be undone next.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    /// Label of the action that would be redone next.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.label.as_str())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Empty both stacks (a new source was loaded).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        tracing::debug!("History cleared");
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the depth limit, dropping the oldest entries if needed.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        Self::enforce_depth(&mut self.undo_stack, max_depth);
        Self::enforce_depth(&mut self.redo_stack, max_depth);
    }

    fn enforce_depth(stack: &mut VecDeque<HistoryEntry>, max_depth: usize) {
        while stack.len() > max_depth {
            stack.pop_front();
        }
    }
}
