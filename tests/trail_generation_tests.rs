//! Integration tests for movement trail generation
//!
//! Ordering, window containment, cache stability and invalidation, the
//! random-walk fallback, work periods and timelines, with a manual clock
//! standing in for wall time.

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use warehouse_twin::layout::build_layout;
use warehouse_twin::simulation::{Clock, ManualClock, TrailStatistics};
use warehouse_twin::trails::{build_timeline, MovementTrailGenerator, SegmentState};
use warehouse_twin::types::{LayoutConfig, ResourceKind, TrailAction};

const MINUTE: i64 = 60_000;

fn generator() -> (MovementTrailGenerator, Arc<ManualClock>) {
    let layout = Arc::new(build_layout(&LayoutConfig::default()));
    let clock = Arc::new(ManualClock::at(Utc.with_ymd_and_hms(2024, 5, 6, 14, 0, 0).unwrap()));
    (MovementTrailGenerator::new(layout, clock.clone()), clock)
}

/// Timestamps never decrease and stay inside the requested window
#[test]
fn test_trails_are_ordered_and_windowed() {
    let (generator, clock) = generator();
    let now = clock.now_millis();

    for id in ["FL-001", "FL-002", "BOPT-001", "BOPT-004", "RT-001", "AGV-002", "ZZ-9"] {
        for range in [5, 30, 60, 240, 1440] {
            let trail = generator.get_movement_trail(id, range);
            assert!(trail.is_time_ordered(), "{} {}", id, range);
            assert!(trail.is_within_window(), "{} {}", id, range);
            for point in &trail.points {
                assert!(point.timestamp >= now - range as i64 * MINUTE);
                assert!(point.timestamp <= now);
            }
            assert!(!trail.points.is_empty());
        }
    }
}

/// Repeating a query returns the same trail
#[test]
fn test_repeated_query_is_stable() {
    let (generator, clock) = generator();

    let first = generator.get_trail("FL-001", 60);
    clock.advance(10 * MINUTE);
    let second = generator.get_trail("FL-001", 60);

    assert_eq!(first.len(), second.len());
    let stamps = |points: &[warehouse_twin::TrailPoint]| {
        points.iter().map(|p| p.timestamp).collect::<Vec<_>>()
    };
    assert_eq!(stamps(&first), stamps(&second));
    assert_eq!(first, second);
    assert_eq!(generator.cached_entries(), 1);
}

/// Invalidation regenerates against the current clock
#[test]
fn test_invalidate_moves_the_window() {
    let (generator, clock) = generator();

    let before = generator.get_movement_trail("BOPT-002", 30);
    generator.get_movement_trail("BOPT-002", 60);
    clock.advance(5 * MINUTE);

    assert_eq!(generator.invalidate("BOPT-002"), 2);
    let after = generator.get_movement_trail("BOPT-002", 30);
    assert_eq!(after.window_end, before.window_end + 5 * MINUTE);
    assert!(after.is_within_window());

    generator.clear_cache();
    assert_eq!(generator.cached_entries(), 0);
}

/// Separate generators agree on the shape of a trail for the same instant
#[test]
fn test_trails_are_deterministic_across_generators() {
    let (a, _) = generator();
    let (b, _) = generator();
    assert_eq!(a.get_trail("FL-003", 120), b.get_trail("FL-003", 120));
    assert_eq!(a.get_trail("XYZ", 120), b.get_trail("XYZ", 120));
}

/// Kinds come from the id prefix; unknown prefixes random-walk
#[test]
fn test_kind_resolution_and_fallback() {
    let (generator, _) = generator();

    assert_eq!(generator.get_movement_trail("FL-001", 60).kind, Some(ResourceKind::Forklift));
    assert_eq!(generator.get_movement_trail("BOPT-001", 60).kind, Some(ResourceKind::PalletTruck));

    let walk = generator.get_movement_trail("CART-7", 60);
    assert_eq!(walk.kind, None);
    assert!(walk.points.iter().all(|p| p.location_id.starts_with("WALK-")));
    let bounds = generator.layout().bounds();
    assert!(walk.points.iter().all(|p| bounds.contains_point(p.position())));
}

/// Empty ids and zero ranges give empty trails without touching the cache
#[test]
fn test_degenerate_queries() {
    let (generator, _) = generator();
    assert!(generator.get_trail("FL-001", 0).is_empty());
    assert!(generator.get_trail("", 60).is_empty());
    assert_eq!(generator.cached_entries(), 0);
}

/// Load flags and actions agree with each other
#[test]
fn test_actions_follow_load_changes() {
    let (generator, _) = generator();

    for id in ["FL-001", "BOPT-003", "RT-002"] {
        let trail = generator.get_movement_trail(id, 480);
        assert_eq!(trail.points[0].action, None);
        for pair in trail.points.windows(2) {
            let expected = match (pair[0].loaded, pair[1].loaded) {
                (false, true) => TrailAction::Pickup,
                (true, false) => TrailAction::Dropoff,
                _ => TrailAction::Transit,
            };
            assert_eq!(pair[1].action, Some(expected));
        }

        let stats = TrailStatistics::from_trail(&trail);
        assert_eq!(stats.waypoints, trail.len());
        assert!(stats.loaded_distance <= stats.distance);
    }
}

/// Waypoints land on known locations of the layout
#[test]
fn test_waypoints_reference_layout_locations() {
    let (generator, _) = generator();
    let layout = generator.layout().clone();

    for id in ["FL-002", "BOPT-005"] {
        for point in generator.get_trail(id, 240).iter().skip(1) {
            let known = layout.find_cell(&point.location_id).is_some()
                || layout.location_position(&point.location_id).is_some();
            assert!(known, "{} visited unknown location {}", id, point.location_id);
        }
    }
}

/// A work period confines activity and shows up as inactive timeline time
#[test]
fn test_work_period_and_timeline() {
    let layout = Arc::new(build_layout(&LayoutConfig::default()));
    let clock = Arc::new(ManualClock::new(1_714_999_999_000));
    let generator = MovementTrailGenerator::new(layout, clock).with_work_period(Some(8.0));

    let trail = generator.get_movement_trail("FL-001", 24 * 60);
    let window = generator.cached_window("FL-001", 24 * 60).unwrap();
    assert!(window.is_restricted());
    assert_eq!(window.active_end - window.active_start, 8 * 60 * MINUTE);
    for point in &trail.points {
        assert!(point.timestamp >= window.active_start && point.timestamp <= window.active_end);
    }

    let timeline = build_timeline(&trail, Some(&window));
    assert_eq!(timeline.segments.first().unwrap().state, SegmentState::Inactive);
    assert_eq!(timeline.segments.last().unwrap().state, SegmentState::Inactive);
    assert_eq!(timeline.segments.len(), trail.len() - 1 + 2);
    assert_eq!(timeline.labels.len(), 7);
}

/// A roster of trails comes back in request order
#[test]
fn test_generate_trails_for_roster() {
    let (generator, _) = generator();
    let ids = ["FL-001", "FL-002", "BOPT-001"];
    let trails = generator.generate_trails(ids, 90);

    assert_eq!(trails.len(), 3);
    for (trail, id) in trails.iter().zip(ids) {
        assert_eq!(trail.resource_id.as_str(), id);
        assert_eq!(trail.time_range_minutes, 90);
    }
    assert_eq!(generator.cached_entries(), 3);
}
