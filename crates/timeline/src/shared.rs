//! Thread-safe handle around a [`TimelineManager`].
//!
//! One `parking_lot::RwLock` guards the whole session: queries (playback
//! polling, rendering) take the shared lock, edits take the exclusive lock,
//! so a reader never observes a segment set mid-mutation. Every operation is
//! short and non-blocking apart from lock acquisition, so the handle is safe
//! to call from synchronous code inside an async runtime.

use std::sync::Arc;

use kc_common::{TimeOffset, TimelineConfig, TimelineResult};
use parking_lot::RwLock;

use crate::cut_list::CutList;
use crate::interval::Interval;
use crate::manager::TimelineManager;
use crate::segments::SegmentSet;

/// Cloneable, `Send + Sync` handle to one editing session.
#[derive(Clone, Debug, Default)]
pub struct SharedTimeline {
    inner: Arc<RwLock<TimelineManager>>,
}

impl SharedTimeline {
    pub fn new(config: TimelineConfig) -> Self {
        Self::from_manager(TimelineManager::new(config))
    }

    pub fn from_manager(manager: TimelineManager) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    /// Run several queries against one consistent state.
    pub fn read<R>(&self, f: impl FnOnce(&TimelineManager) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run several mutations as one atomic step.
    pub fn write<R>(&self, f: impl FnOnce(&mut TimelineManager) -> R) -> R {
        f(&mut self.inner.write())
    }

    // --- Commands (exclusive lock) ---

    pub fn initialize(&self, source_duration: TimeOffset) {
        self.inner.write().initialize(source_duration);
    }

    pub fn delete_segment(
        &self,
        virtual_start: TimeOffset,
        virtual_end: TimeOffset,
    ) -> TimelineResult<()> {
        self.inner.write().delete_segment(virtual_start, virtual_end)
    }

    pub fn undo(&self) -> bool {
        self.inner.write().undo()
    }

    pub fn redo(&self) -> bool {
        self.inner.write().redo()
    }

    pub fn load_cut_list(&self, cut_list: &CutList) -> TimelineResult<()> {
        self.inner.write().load_cut_list(cut_list)
    }

    // --- Queries (shared lock) ---

    pub fn can_undo(&self) -> bool {
        self.inner.read().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.read().can_redo()
    }

    /// Owned copy of the live segment set.
    pub fn current_segments(&self) -> SegmentSet {
        self.inner.read().current_segments().clone()
    }

    pub fn total_duration(&self) -> TimeOffset {
        self.inner.read().total_duration()
    }

    pub fn virtual_to_source(&self, virtual_time: TimeOffset) -> TimeOffset {
        self.inner.read().virtual_to_source(virtual_time)
    }

    pub fn source_to_virtual(&self, source_time: TimeOffset) -> Option<TimeOffset> {
        self.inner.read().source_to_virtual(source_time)
    }

    pub fn segment_at_virtual(&self, virtual_time: TimeOffset) -> Option<Interval> {
        self.inner.read().segment_at_virtual(virtual_time)
    }

    pub fn segment_at_source(&self, source_time: TimeOffset) -> Option<Interval> {
        self.inner.read().segment_at_source(source_time)
    }

    pub fn resolve_playhead(&self, source_time: TimeOffset) -> Option<TimeOffset> {
        self.inner.read().resolve_playhead(source_time)
    }

    pub fn cut_list(&self) -> CutList {
        self.inner.read().cut_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn secs(s: i64) -> TimeOffset {
        TimeOffset::from_whole_secs(s)
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedTimeline>();
    }

    #[test]
    fn clones_share_state() {
        let a = SharedTimeline::default();
        let b = a.clone();
        a.initialize(secs(60));
        b.delete_segment(secs(10), secs(20)).unwrap();
        assert_eq!(a.total_duration(), secs(50));
        assert!(a.can_undo());
    }

    #[test]
    fn readers_never_see_partial_edits() {
        let timeline = SharedTimeline::default();
        timeline.initialize(secs(600));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let timeline = timeline.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        timeline.read(|m| {
                            let set = m.current_segments();
                            let summed: TimeOffset = set.iter().map(Interval::length).sum();
                            assert_eq!(set.total_duration(), summed);
                            assert!(set
                                .intervals()
                                .windows(2)
                                .all(|w| w[0].end() <= w[1].start()));
                        });
                    }
                })
            })
            .collect();

        for _ in 0..100 {
            timeline.delete_segment(secs(1), secs(2)).unwrap();
            timeline.undo();
            timeline.redo();
        }

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(timeline.total_duration(), secs(500));
    }

    #[test]
    fn write_closure_is_atomic() {
        let timeline = SharedTimeline::new(TimelineConfig::default());
        let undone = timeline.write(|m| {
            m.initialize(secs(30));
            m.delete_segment(secs(0), secs(10)).unwrap();
            m.undo()
        });
        assert!(undone);
        assert_eq!(timeline.total_duration(), secs(30));
        assert!(timeline.can_redo());
    }
}
