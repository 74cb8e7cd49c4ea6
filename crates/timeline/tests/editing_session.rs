//! End-to-end editing sessions driven through the public API.

use kc_common::{TimeOffset, TimelineConfig, TimelineError};
use kc_timeline::{from_json_string, to_json_string, SegmentSet, TimelineManager};

fn secs(s: i64) -> TimeOffset {
    TimeOffset::from_whole_secs(s)
}

fn kept(timeline: &TimelineManager) -> Vec<(TimeOffset, TimeOffset)> {
    timeline.current_segments().to_pairs()
}

fn session(duration: i64) -> TimelineManager {
    let mut timeline = TimelineManager::default();
    timeline.initialize(secs(duration));
    timeline
}

#[test]
fn single_cut_from_full_source() {
    let mut timeline = session(60);
    timeline.delete_segment(secs(10), secs(20)).unwrap();

    assert_eq!(kept(&timeline), vec![(secs(0), secs(10)), (secs(20), secs(60))]);
    assert_eq!(timeline.total_duration(), secs(50));
}

#[test]
fn cut_across_a_deleted_gap() {
    let mut timeline = TimelineManager::default();
    let saved = kc_timeline::CutList {
        source_duration: secs(50),
        segments: vec![(secs(0), secs(10)), (secs(20), secs(30)), (secs(40), secs(50))],
    };
    timeline.load_cut_list(&saved).unwrap();
    assert_eq!(timeline.total_duration(), secs(30));

    timeline.delete_segment(secs(5), secs(15)).unwrap();
    assert_eq!(
        kept(&timeline),
        vec![(secs(0), secs(5)), (secs(25), secs(30)), (secs(40), secs(50))]
    );

    assert!(timeline.undo());
    timeline.delete_segment(secs(5), secs(25)).unwrap();
    assert_eq!(kept(&timeline), vec![(secs(0), secs(5)), (secs(45), secs(50))]);
}

#[test]
fn playback_detects_deleted_regions() {
    let mut timeline = session(60);
    timeline.delete_segment(secs(10), secs(20)).unwrap();

    // Inside the gap.
    assert_eq!(timeline.source_to_virtual(secs(15)), None);
    assert!(timeline.segment_at_source(secs(15)).is_none());
    assert_eq!(timeline.resolve_playhead(secs(15)), Some(secs(20)));

    // Boundaries are inclusive.
    assert_eq!(timeline.source_to_virtual(secs(10)), Some(secs(10)));
    assert_eq!(timeline.source_to_virtual(secs(20)), Some(secs(10)));
}

#[test]
fn reversed_range_is_rejected_without_side_effects() {
    let mut timeline = session(60);
    assert!(!timeline.can_undo());

    let err = timeline.delete_segment(secs(30), secs(10)).unwrap_err();
    assert_eq!(
        err,
        TimelineError::InvalidRange {
            start: secs(30),
            end: secs(10),
            total: secs(60),
        }
    );
    assert!(!timeline.can_undo());
    assert!(!timeline.can_redo());
    assert_eq!(kept(&timeline), vec![(secs(0), secs(60))]);
}

#[test]
fn deleting_whole_timeline_collapses_to_nothing() {
    let mut timeline = session(42);
    let total = timeline.total_duration();
    timeline.delete_segment(TimeOffset::ZERO, total).unwrap();

    assert!(timeline.current_segments().is_empty());
    assert_eq!(timeline.total_duration(), TimeOffset::ZERO);
    assert_eq!(timeline.virtual_to_source(secs(5)), TimeOffset::ZERO);
}

#[test]
fn every_undo_restores_the_exact_prior_state() {
    let mut timeline = session(120);
    let cuts = [(10, 20), (0, 5), (50, 70), (30, 31), (40, 60)];

    let mut states: Vec<SegmentSet> = vec![timeline.current_segments().clone()];
    for (start, end) in cuts {
        timeline.delete_segment(secs(start), secs(end)).unwrap();
        states.push(timeline.current_segments().clone());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(timeline.undo());
        assert_eq!(timeline.current_segments(), expected);
    }
    assert!(!timeline.undo());

    for expected in states.iter().skip(1) {
        assert!(timeline.redo());
        assert_eq!(timeline.current_segments(), expected);
    }
    assert!(!timeline.redo());
}

#[test]
fn history_depth_caps_reachable_undos() {
    let depth = 4;
    let extra = 3;
    let mut timeline =
        TimelineManager::new(TimelineConfig::default().with_max_history_depth(depth));
    timeline.initialize(secs(100));

    for _ in 0..depth + extra {
        timeline.delete_segment(secs(0), secs(1)).unwrap();
    }

    let mut undos = 0;
    while timeline.undo() {
        undos += 1;
    }
    assert_eq!(undos, depth);
    assert_eq!(timeline.total_duration(), secs(100 - extra as i64));
}

#[test]
fn edit_after_undo_discards_the_future() {
    let mut timeline = session(60);
    timeline.delete_segment(secs(10), secs(20)).unwrap();
    timeline.delete_segment(secs(0), secs(5)).unwrap();

    timeline.undo();
    assert!(timeline.can_redo());

    timeline.delete_segment(secs(30), secs(40)).unwrap();
    assert!(!timeline.can_redo());
    assert!(!timeline.redo());
}

#[test]
fn round_trip_holds_after_many_cuts() {
    let mut timeline = session(600);
    for (start, end) in [(100, 150), (10, 11), (300, 420), (0, 3), (200, 201)] {
        timeline.delete_segment(secs(start), secs(end)).unwrap();
    }

    for interval in timeline.current_segments().iter() {
        for t in [
            interval.start(),
            interval.start() + TimeOffset::from_micros(1),
            interval.end() - TimeOffset::from_millis(333),
        ] {
            let v = timeline.source_to_virtual(t).unwrap();
            assert_eq!(timeline.virtual_to_source(v), t);
        }
    }
}

#[test]
fn saved_project_reloads_into_fresh_session() {
    let mut timeline = session(90);
    timeline.delete_segment(secs(30), secs(45)).unwrap();
    let json = to_json_string(&timeline.cut_list()).unwrap();

    let mut reopened = TimelineManager::default();
    reopened.load_cut_list(&from_json_string(&json).unwrap()).unwrap();

    assert_eq!(reopened.current_segments(), timeline.current_segments());
    assert_eq!(reopened.source_duration(), secs(90));
    assert!(!reopened.can_undo());
}
