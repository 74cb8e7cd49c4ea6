//! `kc-timeline` -- Non-destructive editing core for the keepcut trimmer.
//!
//! This crate tracks which parts of a source recording are kept after the user
//! removes ranges, maps between the contracted virtual timeline and the
//! source timeline, and provides bounded undo/redo:
//!
//! - **`Interval`**: one contiguous kept source range.
//! - **`SegmentSet`**: ordered, non-overlapping kept intervals; time mapping and deletion.
//! - **`EditHistory`**: snapshot-based undo/redo stacks with a depth limit.
//! - **`TimelineManager`**: the session façade used by playback, rendering, and commands.
//! - **`SharedTimeline`**: `RwLock`-guarded handle for multi-threaded callers.
//! - **`CutList`**: the persisted `(start, end)` shape, with JSON helpers.
//!
//! # Architecture
//!
//! ```text
//! TimelineManager
//! ├── current: SegmentSet             (live kept intervals)
//! ├── history: EditHistory
//! │   ├── undo_stack: [HistoryEntry]  (past snapshots)
//! │   └── redo_stack: [HistoryEntry]  (undone snapshots)
//! └── source_duration
//! ```
//!
//! # Usage
//!
//! ```rust
//! use kc_common::TimeOffset;
//! use kc_timeline::TimelineManager;
//!
//! let secs = TimeOffset::from_whole_secs;
//! let mut timeline = TimelineManager::default();
//! timeline.initialize(secs(60));
//!
//! timeline.delete_segment(secs(10), secs(20)).unwrap();
//! assert_eq!(timeline.total_duration(), secs(50));
//! assert_eq!(timeline.source_to_virtual(secs(15)), None);
//! assert_eq!(timeline.virtual_to_source(secs(10)), secs(20));
//!
//! timeline.undo();
//! assert_eq!(timeline.total_duration(), secs(60));
//! ```

pub mod cut_list;
pub mod history;
pub mod interval;
pub mod manager;
pub mod segments;
pub mod shared;

// Re-export primary types at crate root for convenience.
pub use cut_list::{from_json_string, to_json_string, CutList};
pub use history::{EditHistory, HistoryEntry};
pub use interval::Interval;
pub use manager::TimelineManager;
pub use segments::SegmentSet;
pub use shared::SharedTimeline;
