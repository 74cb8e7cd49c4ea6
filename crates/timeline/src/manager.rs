//! Editing session façade: the live segment set plus its undo history.
//!
//! `TimelineManager` is the only mutator of the kept-segment state. Playback,
//! rendering, and export read through its query methods; the command layer
//! calls `delete_segment`, `undo`, and `redo`.

use kc_common::{TimeOffset, TimelineConfig, TimelineResult};
use tracing::{debug, info, warn};

use crate::cut_list::CutList;
use crate::history::EditHistory;
use crate::interval::Interval;
use crate::segments::SegmentSet;

/// One editing session over a single source recording.
#[derive(Debug)]
pub struct TimelineManager {
    current: SegmentSet,
    history: EditHistory,
    source_duration: TimeOffset,
}

impl Default for TimelineManager {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl TimelineManager {
    /// Create a manager with nothing loaded.
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            current: SegmentSet::new(),
            history: EditHistory::new(config.max_history_depth),
            source_duration: TimeOffset::ZERO,
        }
    }

    /// Start editing a source of the given duration: one full-span interval,
    /// empty history.
    pub fn initialize(&mut self, source_duration: TimeOffset) {
        self.current = SegmentSet::full(source_duration);
        self.source_duration = source_duration;
        self.history.clear();
        info!(duration = %source_duration, "Timeline initialized");
    }

    /// Remove `[virtual_start, virtual_end)` from the virtual timeline.
    ///
    /// The pre-edit state goes onto the undo stack only when the edit
    /// succeeds; an `InvalidRange` leaves state and history untouched.
    pub fn delete_segment(
        &mut self,
        virtual_start: TimeOffset,
        virtual_end: TimeOffset,
    ) -> TimelineResult<()> {
        let mut edited = self.current.clone();
        if let Err(err) = edited.delete(virtual_start, virtual_end) {
            warn!(error = %err, "Delete rejected");
            return Err(err);
        }

        let label = format!("Delete {virtual_start}-{virtual_end}");
        let previous = std::mem::replace(&mut self.current, edited);
        self.history.push(&label, previous);

        debug!(
            segments = self.current.len(),
            remaining = %self.current.total_duration(),
            "Segment deleted"
        );
        Ok(())
    }

    /// Revert the last edit. Returns `false` (and changes nothing) when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = std::mem::take(&mut self.current);
        self.current = self.history.undo(current);
        true
    }

    /// Reapply the last undone edit. Returns `false` (and changes nothing)
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = std::mem::take(&mut self.current);
        self.current = self.history.redo(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    /// Read-only access to the undo/redo stacks.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn set_max_history_depth(&mut self, depth: usize) {
        self.history.set_max_depth(depth);
    }

    /// The live kept-segment set.
    pub fn current_segments(&self) -> &SegmentSet {
        &self.current
    }

    /// Duration of the unedited source.
    pub fn source_duration(&self) -> TimeOffset {
        self.source_duration
    }

    /// Length of the virtual timeline.
    pub fn total_duration(&self) -> TimeOffset {
        self.current.total_duration()
    }

    pub fn virtual_to_source(&self, virtual_time: TimeOffset) -> TimeOffset {
        self.current.virtual_to_source(virtual_time)
    }

    pub fn source_to_virtual(&self, source_time: TimeOffset) -> Option<TimeOffset> {
        self.current.source_to_virtual(source_time)
    }

    pub fn segment_at_virtual(&self, virtual_time: TimeOffset) -> Option<Interval> {
        self.current.segment_at_virtual(virtual_time).copied()
    }

    pub fn segment_at_source(&self, source_time: TimeOffset) -> Option<Interval> {
        self.current.segment_at_source(source_time).copied()
    }

    pub fn next_segment_after(&self, source_time: TimeOffset) -> Option<Interval> {
        self.current.next_segment_after(source_time).copied()
    }

    /// Where playback should continue from for a decoder at `source_time`.
    ///
    /// A kept time resolves to itself; a time in a deleted region resolves to
    /// the start of the next kept interval; `None` means no kept material
    /// remains ahead.
    pub fn resolve_playhead(&self, source_time: TimeOffset) -> Option<TimeOffset> {
        if self.current.segment_at_source(source_time).is_some() {
            return Some(source_time);
        }
        self.current
            .next_segment_after(source_time)
            .map(Interval::start)
    }

    /// Export the current edit in its persisted shape.
    pub fn cut_list(&self) -> CutList {
        CutList::new(self.source_duration, &self.current)
    }

    /// Replace the session with a saved edit, bypassing `initialize`.
    ///
    /// History is cleared. On validation failure nothing changes.
    pub fn load_cut_list(&mut self, cut_list: &CutList) -> TimelineResult<()> {
        let segments = match cut_list.to_segment_set() {
            Ok(segments) => segments,
            Err(err) => {
                warn!(error = %err, "Cut list rejected");
                return Err(err);
            }
        };

        self.current = segments;
        self.source_duration = cut_list.source_duration;
        self.history.clear();

        info!(
            duration = %self.source_duration,
            segments = self.current.len(),
            "Cut list loaded"
        );
        Ok(())
    }
}
