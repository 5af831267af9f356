//! Activity timeline derived from a trail
//!
//! Consecutive waypoints become bar segments positioned in percent of the
//! requested window, coloured by whether the resource was loaded. Time outside
//! the work period is covered by inactive placeholders.

use crate::trails::generator::ActivityWindow;
use crate::trails::point::MovementTrail;
use chrono::{TimeZone, Utc};
use serde::Serialize;

/// Narrowest segment drawn, in percent of the window
pub const MIN_SEGMENT_WIDTH_PERCENT: f64 = 0.5;

/// Number of intervals between time labels
pub const LABEL_INTERVALS: usize = 6;

/// What a timeline segment shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentState {
    /// Travelling with a load
    Loaded,
    /// Travelling empty
    Empty,
    /// Outside the work period
    Inactive,
}

/// One bar of the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSegment {
    /// Left edge in percent of the window
    pub start_percent: f64,
    /// Width in percent of the window
    pub width_percent: f64,
    /// What the segment shows
    pub state: SegmentState,
    /// Epoch milliseconds at the segment start
    pub timestamp: i64,
}

/// A tick label under the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLabel {
    /// Position in percent of the window
    pub position_percent: f64,
    /// `HH:MM` in UTC
    pub label: String,
}

/// Timeline of one trail
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTimeline {
    /// Bars in time order, placeholders first and last
    pub segments: Vec<TimelineSegment>,
    /// Evenly spaced tick labels
    pub labels: Vec<TimeLabel>,
}

/// Build the timeline of a trail
///
/// `window` supplies the work period; pass `None` when activity covers the
/// whole range. A trail with fewer than two points has no activity segments.
pub fn build_timeline(trail: &MovementTrail, window: Option<&ActivityWindow>) -> ActivityTimeline {
    let start = trail.window_start;
    let span = trail.window_end - trail.window_start;
    if span <= 0 {
        return ActivityTimeline { segments: Vec::new(), labels: Vec::new() };
    }
    let percent = |timestamp: i64| (timestamp - start) as f64 / span as f64 * 100.0;

    let mut segments = Vec::new();
    let restricted = window.filter(|w| w.is_restricted());

    if let Some(w) = restricted {
        if w.active_start > start {
            segments.push(TimelineSegment {
                start_percent: 0.0,
                width_percent: percent(w.active_start),
                state: SegmentState::Inactive,
                timestamp: start,
            });
        }
    }

    for pair in trail.points.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let start_percent = percent(current.timestamp).max(0.0);
        let end_percent = percent(next.timestamp);
        segments.push(TimelineSegment {
            start_percent,
            width_percent: (end_percent - start_percent).max(MIN_SEGMENT_WIDTH_PERCENT),
            state: if current.loaded { SegmentState::Loaded } else { SegmentState::Empty },
            timestamp: current.timestamp,
        });
    }

    if let Some(w) = restricted {
        if w.active_end < trail.window_end {
            let start_percent = percent(w.active_end);
            segments.push(TimelineSegment {
                start_percent,
                width_percent: 100.0 - start_percent,
                state: SegmentState::Inactive,
                timestamp: w.active_end,
            });
        }
    }

    ActivityTimeline { segments, labels: time_labels(start, trail.window_end) }
}

/// `HH:MM` labels at [`LABEL_INTERVALS`] even intervals, both ends included
pub fn time_labels(start_ms: i64, end_ms: i64) -> Vec<TimeLabel> {
    let span = end_ms - start_ms;
    (0..=LABEL_INTERVALS)
        .map(|i| {
            let timestamp = start_ms + span * i as i64 / LABEL_INTERVALS as i64;
            let label = Utc
                .timestamp_millis_opt(timestamp)
                .single()
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default();
            TimeLabel { position_percent: i as f64 / LABEL_INTERVALS as f64 * 100.0, label }
        })
        .collect()
}
