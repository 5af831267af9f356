//! Deterministic movement trails
//!
//! A trail is a pure function of the layout, the resource id, the requested
//! range and the instant the window ends. The id prefix picks a
//! [`MovementProfile`]; the id characters and the range seed the stream, so a
//! query repeated against the same layout and end instant retraces the same
//! path. [`MovementTrailGenerator`] adds the per-query cache on top.

use crate::layout::{Point, WarehouseLayout};
use crate::simulation::{Clock, MovementProfile, SeededRandom};
use crate::trails::cache::TrailCache;
use crate::trails::point::{MovementTrail, TrailPoint};
use crate::types::{ResourceId, TrailAction};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: f64 = 3_600_000.0;

/// The part of a requested window in which activity is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    /// Requested window start
    pub start: i64,
    /// Requested window end
    pub end: i64,
    /// Start of generated activity
    pub active_start: i64,
    /// End of generated activity
    pub active_end: i64,
}

impl ActivityWindow {
    /// Window of `time_range_minutes` ending at `now_ms`
    ///
    /// With a work period shorter than the range, activity is confined to a
    /// band of that length centred in the window.
    pub fn new(now_ms: i64, time_range_minutes: u32, work_period_hours: Option<f64>) -> Self {
        let span = time_range_minutes as i64 * MINUTE_MS;
        let start = now_ms - span;

        let (active_start, active_end) = match work_period_hours {
            Some(hours) if hours > 0.0 && ((hours * HOUR_MS) as i64) < span => {
                let band = (hours * HOUR_MS) as i64;
                let band_start = start + (span - band) / 2;
                (band_start, band_start + band)
            }
            _ => (start, now_ms),
        };

        Self { start, end: now_ms, active_start, active_end }
    }

    /// Whether activity is confined to part of the window
    pub fn is_restricted(&self) -> bool {
        self.active_start > self.start || self.active_end < self.end
    }

    fn active_span(&self) -> i64 {
        self.active_end - self.active_start
    }
}

/// Seed of a trail: first and last character codes plus the scaled range
pub fn trail_seed(resource_id: &str, time_range_minutes: u32, time_factor: i64) -> i64 {
    let first = resource_id.chars().next().map_or(0, |c| c as i64);
    let last = resource_id.chars().last().map_or(0, |c| c as i64);
    first + last + time_range_minutes as i64 * time_factor
}

/// Generate a trail without caching
///
/// Empty ids and zero ranges give an empty trail. Ids with an unknown prefix
/// take a random walk over the floor instead of failing.
pub fn generate_trail(
    layout: &WarehouseLayout,
    resource_id: &ResourceId,
    window: &ActivityWindow,
) -> Vec<TrailPoint> {
    let id = resource_id.as_str();
    if id.is_empty() || window.end <= window.start {
        return Vec::new();
    }

    let profile = MovementProfile::for_resource(resource_id);
    let range_minutes = ((window.end - window.start) / MINUTE_MS) as u32;
    let mut random = SeededRandom::new(trail_seed(id, range_minutes, profile.seed_time_factor));

    let base_step = profile.min_step_ms.max(window.active_span() / profile.max_waypoints as i64);
    let mut walker = TrailWalker { layout, profile, resource_id, random: &mut random };

    if profile.is_random_walk() {
        warn!(resource = id, "Unknown resource prefix; generating a random walk");
        return walker.random_walk(window, base_step);
    }
    walker.planned_route(window, base_step)
}

struct TrailWalker<'a> {
    layout: &'a WarehouseLayout,
    profile: &'static MovementProfile,
    resource_id: &'a ResourceId,
    random: &'a mut SeededRandom,
}

impl TrailWalker<'_> {
    fn next_timestamp(&mut self, previous: i64, base_step: i64) -> i64 {
        let step = (base_step as f64 * self.random.next_range(0.6, 1.4)).round() as i64;
        previous + step.max(1)
    }

    fn primary_aisle(&self) -> usize {
        let aisles = self.layout.aisle_count().max(1);
        self.resource_id.sequence_number().unwrap_or(0) as usize % aisles
    }

    fn starting_point(&self) -> (Point, String) {
        if self.profile.primary_aisle_affinity.is_some() {
            let aisle = self.primary_aisle();
            if let (Some(x), Some(label)) =
                (self.layout.aisle_center_x(aisle), self.layout.aisle_label(aisle))
            {
                return (Point::new(x, self.layout.cross_aisle_y()), label.to_string());
            }
        }
        let zone = &self.layout.zones[0];
        (zone.position, zone.id.clone())
    }

    fn choose_destination(&mut self) -> (Point, String) {
        let aisles = self.layout.aisle_count();
        if aisles > 0 && self.random.chance(self.profile.aisle_visit_weight) {
            let aisle = match self.profile.primary_aisle_affinity {
                Some(affinity) if self.random.chance(affinity) => self.primary_aisle(),
                _ => self.random.next_index(aisles),
            };
            let cells = self.layout.cells_in_aisle(aisle);
            let cell = &cells[self.random.next_index(cells.len())];
            let lane_x = self.layout.aisle_center_x(aisle).unwrap_or(cell.center().x);
            return (Point::new(lane_x, cell.center().y), cell.cell_id.to_string());
        }

        let zones = &self.layout.zones;
        let zone = &zones[self.random.next_index(zones.len())];
        (zone.position, zone.id.clone())
    }

    fn next_load_state(&mut self, loaded: &mut bool) -> TrailAction {
        if self.random.chance(self.profile.load_toggle_probability) {
            *loaded = !*loaded;
            if *loaded {
                TrailAction::Pickup
            } else {
                TrailAction::Dropoff
            }
        } else {
            TrailAction::Transit
        }
    }

    fn planned_route(&mut self, window: &ActivityWindow, base_step: i64) -> Vec<TrailPoint> {
        let mut loaded = self.random.chance(self.profile.start_loaded_probability);
        let (start, location) = self.starting_point();

        let mut points = Vec::with_capacity(self.profile.max_waypoints);
        points.push(TrailPoint {
            x: start.x,
            y: start.y,
            loaded,
            timestamp: window.active_start,
            location_id: location,
            action: None,
        });

        let mut timestamp = window.active_start;
        while points.len() < self.profile.max_waypoints {
            timestamp = self.next_timestamp(timestamp, base_step);
            if timestamp > window.active_end {
                break;
            }
            let (position, location_id) = self.choose_destination();
            let action = self.next_load_state(&mut loaded);
            points.push(TrailPoint {
                x: position.x,
                y: position.y,
                loaded,
                timestamp,
                location_id,
                action: Some(action),
            });
        }
        points
    }

    fn random_walk(&mut self, window: &ActivityWindow, base_step: i64) -> Vec<TrailPoint> {
        let bounds = self.layout.bounds();
        let stride_x = bounds.width * 0.15;
        let stride_y = bounds.height * 0.15;
        let mut position = bounds.center();
        let mut loaded = self.random.chance(self.profile.start_loaded_probability);

        let mut points = vec![TrailPoint {
            x: position.x,
            y: position.y,
            loaded,
            timestamp: window.active_start,
            location_id: "WALK-00".to_string(),
            action: None,
        }];

        let mut timestamp = window.active_start;
        while points.len() < self.profile.max_waypoints {
            timestamp = self.next_timestamp(timestamp, base_step);
            if timestamp > window.active_end {
                break;
            }
            let dx = self.random.next_range(-1.0, 1.0) * stride_x;
            let dy = self.random.next_range(-1.0, 1.0) * stride_y;
            position = bounds.clamp_point(Point::new(position.x + dx, position.y + dy), 0.0);
            let action = self.next_load_state(&mut loaded);
            points.push(TrailPoint {
                x: position.x,
                y: position.y,
                loaded,
                timestamp,
                location_id: format!("WALK-{:02}", points.len()),
                action: Some(action),
            });
        }
        points
    }
}

/// Trail generator with a per-`(resource, range)` cache
///
/// The first query for a key fixes its window end at the clock's current
/// instant; later queries for the same key return the cached trail until it is
/// invalidated.
#[derive(Debug)]
pub struct MovementTrailGenerator {
    layout: Arc<WarehouseLayout>,
    clock: Arc<dyn Clock>,
    work_period_hours: Option<f64>,
    cache: TrailCache,
}

impl MovementTrailGenerator {
    /// Create a generator over a layout and a clock
    pub fn new(layout: Arc<WarehouseLayout>, clock: Arc<dyn Clock>) -> Self {
        Self { layout, clock, work_period_hours: None, cache: TrailCache::new() }
    }

    /// Confine generated activity to a centred work period of this many hours
    pub fn with_work_period(mut self, hours: Option<f64>) -> Self {
        self.work_period_hours = hours;
        self
    }

    /// Layout the generator places waypoints in
    pub fn layout(&self) -> &Arc<WarehouseLayout> {
        &self.layout
    }

    /// Configured work period
    pub fn work_period_hours(&self) -> Option<f64> {
        self.work_period_hours
    }

    /// Waypoints of a resource over the last `time_range_minutes`
    pub fn get_trail(&self, resource_id: &str, time_range_minutes: u32) -> Vec<TrailPoint> {
        self.get_movement_trail(resource_id, time_range_minutes).points
    }

    /// Full trail record of a resource over the last `time_range_minutes`
    #[instrument(skip(self))]
    pub fn get_movement_trail(&self, resource_id: &str, time_range_minutes: u32) -> MovementTrail {
        let id = ResourceId::from(resource_id);

        if resource_id.is_empty() || time_range_minutes == 0 {
            let now = self.clock.now_millis();
            return MovementTrail {
                kind: id.kind(),
                resource_id: id,
                time_range_minutes,
                window_start: now,
                window_end: now,
                points: Vec::new(),
            };
        }

        let entry = match self.cache.get(resource_id, time_range_minutes) {
            Some(entry) => {
                debug!(resource = resource_id, time_range_minutes, "Trail cache hit");
                entry
            }
            None => {
                let window = ActivityWindow::new(
                    self.clock.now_millis(),
                    time_range_minutes,
                    self.work_period_hours,
                );
                let points = generate_trail(&self.layout, &id, &window);
                debug!(
                    resource = resource_id,
                    time_range_minutes,
                    points = points.len(),
                    "Generated trail"
                );
                self.cache.insert(resource_id, time_range_minutes, window, points)
            }
        };

        MovementTrail {
            kind: id.kind(),
            resource_id: id,
            time_range_minutes,
            window_start: entry.window.start,
            window_end: entry.window.end,
            points: entry.points.as_ref().clone(),
        }
    }

    /// Activity window a cached trail was generated for
    pub fn cached_window(
        &self,
        resource_id: &str,
        time_range_minutes: u32,
    ) -> Option<ActivityWindow> {
        self.cache.get(resource_id, time_range_minutes).map(|entry| entry.window)
    }

    /// Trails for several resources over the same range
    pub fn generate_trails<I, S>(
        &self,
        resource_ids: I,
        time_range_minutes: u32,
    ) -> Vec<MovementTrail>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _span = crate::perf_span!("generate_trails", time_range_minutes = time_range_minutes)
            .entered();
        resource_ids
            .into_iter()
            .map(|id| self.get_movement_trail(id.as_ref(), time_range_minutes))
            .collect()
    }

    /// Drop every cached trail of a resource; returns how many were removed
    pub fn invalidate(&self, resource_id: &str) -> usize {
        self.cache.invalidate(resource_id)
    }

    /// Drop every cached trail
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached `(resource, range)` entries
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;
    use crate::types::LayoutConfig;

    const NOW: i64 = 1_700_000_000_000;

    fn layout() -> WarehouseLayout {
        build_layout(&LayoutConfig::default())
    }

    #[test]
    fn test_trail_seed() {
        // 'F' = 70, '1' = 49
        assert_eq!(trail_seed("FL-001", 60, 1), 70 + 49 + 60);
        assert_eq!(trail_seed("BOPT-002", 60, 2), 66 + 50 + 120);
        assert_eq!(trail_seed("", 60, 1), 60);
    }

    #[test]
    fn test_activity_window_unrestricted() {
        let window = ActivityWindow::new(NOW, 60, None);
        assert_eq!(window.start, NOW - 3_600_000);
        assert_eq!(window.active_start, window.start);
        assert_eq!(window.active_end, NOW);
        assert!(!window.is_restricted());

        // Work period longer than the range changes nothing
        assert_eq!(ActivityWindow::new(NOW, 60, Some(8.0)), window);
    }

    #[test]
    fn test_activity_window_centred_band() {
        let window = ActivityWindow::new(NOW, 24 * 60, Some(8.0));
        assert!(window.is_restricted());
        assert_eq!(window.active_end - window.active_start, 8 * 3_600_000);
        assert_eq!(window.active_start - window.start, 8 * 3_600_000);
        assert_eq!(window.end - window.active_end, 8 * 3_600_000);
    }

    #[test]
    fn test_forklift_trail_shape() {
        let layout = layout();
        let window = ActivityWindow::new(NOW, 120, None);
        let points = generate_trail(&layout, &ResourceId::from("FL-001"), &window);

        assert!(points.len() >= 2);
        assert!(points.len() <= 20);
        assert_eq!(points[0].timestamp, window.start);
        assert!(points[0].action.is_none());
        assert!(points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(points.iter().all(|p| p.timestamp >= window.start && p.timestamp <= NOW));
        assert!(points.iter().all(|p| layout.bounds().contains_point(p.position())));
    }

    #[test]
    fn test_actions_match_load_changes() {
        let layout = layout();
        let window = ActivityWindow::new(NOW, 240, None);
        let points = generate_trail(&layout, &ResourceId::from("BOPT-003"), &window);

        for pair in points.windows(2) {
            let expected = match (pair[0].loaded, pair[1].loaded) {
                (false, true) => TrailAction::Pickup,
                (true, false) => TrailAction::Dropoff,
                _ => TrailAction::Transit,
            };
            assert_eq!(pair[1].action, Some(expected));
        }
    }

    #[test]
    fn test_unknown_prefix_random_walk() {
        let layout = layout();
        let window = ActivityWindow::new(NOW, 600, None);
        let points = generate_trail(&layout, &ResourceId::from("CART-7"), &window);

        assert!(!points.is_empty());
        assert!(points.len() <= 12);
        assert!(points.iter().all(|p| p.location_id.starts_with("WALK-")));
        assert!(points.iter().all(|p| layout.bounds().contains_point(p.position())));
    }

    #[test]
    fn test_empty_inputs() {
        let layout = layout();
        let window = ActivityWindow::new(NOW, 0, None);
        assert!(generate_trail(&layout, &ResourceId::from("FL-001"), &window).is_empty());

        let window = ActivityWindow::new(NOW, 60, None);
        assert!(generate_trail(&layout, &ResourceId::from(""), &window).is_empty());
    }

    #[test]
    fn test_trail_without_storage_visits_zones() {
        let layout = build_layout(&LayoutConfig { bins_per_aisle: 0, ..LayoutConfig::default() });
        let window = ActivityWindow::new(NOW, 120, None);
        let points = generate_trail(&layout, &ResourceId::from("FL-002"), &window);

        let zone_ids: Vec<&str> = layout.zones.iter().map(|z| z.id.as_str()).collect();
        assert!(points.iter().all(|p| zone_ids.contains(&p.location_id.as_str())));
    }
}
