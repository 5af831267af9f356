//! Live resource simulator
//!
//! Owns the roster and advances it through an explicit [`tick`] that a host
//! loop calls. Each resource alternates between dwelling at a position and
//! moving toward a target; wake times are jittered per resource and only a
//! limited number of resources may move in one tick. [`frame`] wraps `tick`
//! with the throttled listener notification used by animation loops.
//!
//! [`tick`]: ResourceSimulator::tick
//! [`frame`]: ResourceSimulator::frame

use crate::layout::{Point, WarehouseLayout};
use crate::simulation::error::{WarehouseError, WarehouseResult};
use crate::simulation::profiles::MovementProfile;
use crate::simulation::resource::SimulatedResource;
use crate::simulation::statistics::FleetStatistics;
use crate::trails::TrailPoint;
use crate::types::{ListenerId, ResourceId, ResourceKind, ResourceStatus, SimulatorConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Callback receiving a copy of the roster
pub type ResourceListener = Box<dyn FnMut(Vec<SimulatedResource>) + Send>;

/// Keeps targets this far inside the floor bounds
const TARGET_MARGIN: f64 = 10.0;

/// Classic starting positions, speeds and load states of the first forklifts
const FORKLIFT_STARTS: [(f64, f64, f64, bool); 3] =
    [(100.0, 150.0, 2.3, true), (300.0, 250.0, 1.8, false), (500.0, 180.0, 2.1, true)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Dwelling,
    Moving,
}

#[derive(Debug, Clone, Copy)]
struct Schedule {
    phase: Phase,
    next_wake_ms: Option<i64>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self { phase: Phase::Dwelling, next_wake_ms: None }
    }
}

/// Stateful simulator of the live equipment roster
pub struct ResourceSimulator {
    layout: Arc<WarehouseLayout>,
    config: SimulatorConfig,
    resources: Vec<SimulatedResource>,
    schedules: HashMap<ResourceId, Schedule>,
    listeners: Vec<(ListenerId, ResourceListener)>,
    running: bool,
    last_notified_ms: Option<i64>,
    ticks: u64,
    rng: StdRng,
}

impl fmt::Debug for ResourceSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSimulator")
            .field("config", &self.config)
            .field("resources", &self.resources.len())
            .field("listeners", &self.listeners.len())
            .field("running", &self.running)
            .field("last_notified_ms", &self.last_notified_ms)
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl ResourceSimulator {
    /// Create a simulator with the default roster
    #[instrument(
        skip(layout, config),
        fields(forklifts = config.forklift_count, pallet_trucks = config.pallet_truck_count)
    )]
    pub fn new(layout: Arc<WarehouseLayout>, config: SimulatorConfig, seed: Option<u64>) -> Self {
        let mut rng: StdRng = if let Some(seed) = seed {
            info!("Using deterministic seed: {}", seed);
            SeedableRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            SeedableRng::from_entropy()
        };

        let resources = default_roster(&layout, &config, &mut rng);
        Self::assemble(layout, config, resources, rng)
    }

    /// Create a simulator with an explicit roster
    pub fn with_resources(
        layout: Arc<WarehouseLayout>,
        config: SimulatorConfig,
        resources: Vec<SimulatedResource>,
        seed: Option<u64>,
    ) -> Self {
        let rng: StdRng = match seed {
            Some(seed) => SeedableRng::seed_from_u64(seed),
            None => SeedableRng::from_entropy(),
        };
        Self::assemble(layout, config, resources, rng)
    }

    fn assemble(
        layout: Arc<WarehouseLayout>,
        config: SimulatorConfig,
        mut resources: Vec<SimulatedResource>,
        rng: StdRng,
    ) -> Self {
        for resource in &mut resources {
            resource.current_aisle = aisle_label_at(&layout, resource.x);
        }
        let schedules = resources.iter().map(|r| (r.id.clone(), Schedule::default())).collect();
        info!(resources = resources.len(), "Resource simulator initialized");

        Self {
            layout,
            config,
            resources,
            schedules,
            listeners: Vec::new(),
            running: false,
            last_notified_ms: None,
            ticks: 0,
            rng,
        }
    }

    /// Begin frame-driven advancement; calling it while running does nothing
    pub fn start(&mut self) {
        if self.running {
            debug!("Resource simulator already running");
            return;
        }
        self.running = true;
        self.last_notified_ms = None;
        crate::sim_event!(info, "Resource simulator started", resources = self.resources.len());
    }

    /// Stop frame-driven advancement; safe to call repeatedly
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        crate::sim_event!(info, "Resource simulator stopped", ticks = self.ticks);
    }

    /// Whether [`frame`](Self::frame) currently advances the roster
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Subscribe to roster snapshots
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Vec<SimulatedResource>) + Send + 'static,
    {
        let id = ListenerId::new();
        self.listeners.push((id, Box::new(listener)));
        debug!(listener = %id, "Listener added");
        id
    }

    /// Unsubscribe; returns whether the listener was registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// One animation frame: tick, then notify if the update interval has elapsed
    ///
    /// Does nothing while stopped. Returns whether listeners were notified.
    pub fn frame(&mut self, now_ms: i64) -> bool {
        if !self.running {
            return false;
        }
        self.tick(now_ms);

        let due = match self.last_notified_ms {
            None => true,
            Some(last) => now_ms - last >= self.config.update_interval_ms as i64,
        };
        if due {
            self.notify_listeners();
            self.last_notified_ms = Some(now_ms);
        }
        due
    }

    /// Advance every resource by one step, whether or not the simulator is running
    pub fn tick(&mut self, now_ms: i64) {
        self.ticks += 1;
        self.record_positions(now_ms);

        let count = self.resources.len();
        if count == 0 {
            return;
        }
        // Rotate the starting resource so the mover cap does not starve the tail
        let offset = (self.ticks as usize) % count;
        let mut movers = 0;

        for i in 0..count {
            let index = (offset + i) % count;
            if self.resources[index].status == ResourceStatus::Maintenance {
                continue;
            }

            let id = self.resources[index].id.clone();
            let mut schedule = self.schedules.get(&id).copied().unwrap_or_default();

            if schedule.phase == Phase::Dwelling {
                let wake = match schedule.next_wake_ms {
                    Some(wake) => wake,
                    None => {
                        let wake = now_ms + self.wake_jitter();
                        schedule.next_wake_ms = Some(wake);
                        wake
                    }
                };
                if now_ms < wake || movers >= self.config.max_movers_per_tick {
                    self.schedules.insert(id, schedule);
                    continue;
                }
                let target = self.select_target(index);
                let resource = &mut self.resources[index];
                resource.target_x = target.x;
                resource.target_y = target.y;
                resource.status = ResourceStatus::Active;
                schedule = Schedule { phase: Phase::Moving, next_wake_ms: None };
            } else if movers >= self.config.max_movers_per_tick {
                continue;
            }

            movers += 1;
            let step = self.resources[index].speed * self.config.speed_scale;
            let arrived = self.resources[index].step_toward_target(step);
            if arrived {
                schedule = self.arrive(index, now_ms);
            }
            let aisle = aisle_label_at(&self.layout, self.resources[index].x);
            self.resources[index].current_aisle = aisle;
            self.schedules.insert(id, schedule);
        }
    }

    fn record_positions(&mut self, now_ms: i64) {
        let horizon = now_ms - self.config.trail_retention_ms as i64;
        for resource in &mut self.resources {
            resource.trail.push(TrailPoint {
                x: resource.x,
                y: resource.y,
                loaded: resource.loaded,
                timestamp: now_ms,
                location_id: resource.current_aisle.clone().unwrap_or_else(|| "FLOOR".to_string()),
                action: None,
            });
            resource.trail.retain(|point| point.timestamp > horizon);
        }
    }

    fn wake_jitter(&mut self) -> i64 {
        self.rng.gen_range(0..=self.config.wake_jitter_ms) as i64
    }

    fn arrive(&mut self, index: usize, now_ms: i64) -> Schedule {
        let profile = MovementProfile::for_kind(self.resources[index].kind);
        let flip = self.rng.gen_bool(profile.arrival_load_flip.clamp(0.0, 1.0));
        let dwell = self.rng.gen_range(profile.dwell_min_ms..=profile.dwell_max_ms) as i64;
        let jitter = self.wake_jitter();

        let resource = &mut self.resources[index];
        if flip {
            resource.loaded = !resource.loaded;
        }
        resource.status = ResourceStatus::Idle;
        debug!(
            resource = %resource.id,
            x = resource.x,
            y = resource.y,
            loaded = resource.loaded,
            "Resource reached target"
        );

        Schedule { phase: Phase::Dwelling, next_wake_ms: Some(now_ms + dwell + jitter) }
    }

    fn select_target(&mut self, index: usize) -> Point {
        let layout = Arc::clone(&self.layout);
        let bounds = layout.bounds();
        let resource = &self.resources[index];
        let position = resource.position();
        let profile = MovementProfile::for_kind(resource.kind);
        let traverse = self.rng.gen_bool(profile.traversal_weight.clamp(0.0, 1.0));

        let target = match resource.kind {
            ResourceKind::Forklift | ResourceKind::ReachTruck => {
                let aisles = layout.aisle_count();
                if traverse && aisles > 0 {
                    let aisle = layout
                        .aisle_at_x(position.x)
                        .unwrap_or_else(|| self.rng.gen_range(0..aisles));
                    let lane_x = layout.aisle_center_x(aisle).unwrap_or(position.x);
                    // Opposite end of the aisle
                    let y = if position.y < layout.rack_height() / 2.0 {
                        layout.rack_height() - TARGET_MARGIN
                    } else {
                        TARGET_MARGIN
                    };
                    Point::new(lane_x, y)
                } else {
                    let pick = self.rng.gen_range(0..layout.zones.len().max(1));
                    layout.zones.get(pick).map(|zone| zone.position).unwrap_or(position)
                }
            }
            ResourceKind::PalletTruck | ResourceKind::Agv => {
                if traverse || layout.staging_areas.is_empty() {
                    // Full width of the floor along the cross aisle
                    let x = if position.x < bounds.center().x {
                        bounds.right() - TARGET_MARGIN
                    } else {
                        bounds.x + TARGET_MARGIN
                    };
                    Point::new(x, layout.cross_aisle_y())
                } else {
                    let area =
                        &layout.staging_areas[self.rng.gen_range(0..layout.staging_areas.len())];
                    area.rect.center()
                }
            }
        };

        bounds.clamp_point(target, TARGET_MARGIN)
    }

    fn notify_listeners(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.resources.clone();
        for (_, listener) in &mut self.listeners {
            listener(snapshot.clone());
        }
        debug!(listeners = self.listeners.len(), "Notified listeners");
    }

    /// Change a resource's status
    ///
    /// Maintenance parks the resource where it stands; any other status returns
    /// it to service, `Active` with a fresh target and `Idle` waiting for its
    /// next wake time.
    pub fn set_status(&mut self, id: &str, status: ResourceStatus) -> WarehouseResult<()> {
        let index = self
            .resources
            .iter()
            .position(|r| r.id.as_str() == id)
            .ok_or_else(|| WarehouseError::unknown_resource(id))?;

        let schedule = match status {
            ResourceStatus::Maintenance | ResourceStatus::Idle => {
                let resource = &mut self.resources[index];
                resource.target_x = resource.x;
                resource.target_y = resource.y;
                Schedule::default()
            }
            ResourceStatus::Active => {
                let target = self.select_target(index);
                let resource = &mut self.resources[index];
                resource.target_x = target.x;
                resource.target_y = target.y;
                Schedule { phase: Phase::Moving, next_wake_ms: None }
            }
        };

        self.resources[index].status = status;
        self.schedules.insert(self.resources[index].id.clone(), schedule);
        if status == ResourceStatus::Maintenance {
            warn!(resource = id, "Resource taken out of service");
        } else {
            info!(resource = id, %status, "Resource status changed");
        }
        Ok(())
    }

    /// Copy of one resource, looked up across every kind
    pub fn get_resource_by_id(&self, id: &str) -> Option<SimulatedResource> {
        self.resources.iter().find(|r| r.id.as_str() == id).cloned()
    }

    /// Copy of the whole roster
    pub fn resources(&self) -> Vec<SimulatedResource> {
        self.resources.clone()
    }

    /// Copies of every resource of one kind
    pub fn resources_of_kind(&self, kind: ResourceKind) -> Vec<SimulatedResource> {
        self.resources.iter().filter(|r| r.kind == kind).cloned().collect()
    }

    /// Copies of the forklifts
    pub fn forklifts(&self) -> Vec<SimulatedResource> {
        self.resources_of_kind(ResourceKind::Forklift)
    }

    /// Copies of the pallet trucks
    pub fn pallet_trucks(&self) -> Vec<SimulatedResource> {
        self.resources_of_kind(ResourceKind::PalletTruck)
    }

    /// Ticks executed so far
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Counts by status and kind for the current roster
    pub fn fleet_statistics(&self) -> FleetStatistics {
        FleetStatistics::from_resources(&self.resources)
    }
}

fn aisle_label_at(layout: &WarehouseLayout, x: f64) -> Option<String> {
    layout.aisle_at_x(x).and_then(|i| layout.aisle_label(i)).map(str::to_string)
}

fn default_roster(
    layout: &WarehouseLayout,
    config: &SimulatorConfig,
    rng: &mut StdRng,
) -> Vec<SimulatedResource> {
    let bounds = layout.bounds();
    let mut resources = Vec::with_capacity(config.forklift_count + config.pallet_truck_count);

    let forklift = MovementProfile::for_kind(ResourceKind::Forklift);
    for i in 0..config.forklift_count {
        let (position, speed, loaded) = match FORKLIFT_STARTS.get(i) {
            Some(&(x, y, speed, loaded)) => (Point::new(x, y), speed, loaded),
            None => {
                let aisles = layout.aisle_count().max(1);
                let x = layout.aisle_center_x(i % aisles).unwrap_or(bounds.center().x);
                (
                    Point::new(x, layout.cross_aisle_y()),
                    forklift.base_speed + rng.gen_range(-0.3..0.3),
                    rng.gen_bool(forklift.start_loaded_probability),
                )
            }
        };
        resources.push(SimulatedResource::new(
            ResourceId::for_kind(ResourceKind::Forklift, i as u32 + 1),
            ResourceKind::Forklift,
            bounds.clamp_point(position, TARGET_MARGIN),
            speed,
            loaded,
        ));
    }

    let bopt = MovementProfile::for_kind(ResourceKind::PalletTruck);
    let staging_y = layout
        .staging_areas
        .first()
        .map(|area| area.rect.center().y)
        .unwrap_or_else(|| layout.cross_aisle_y());
    let slots = config.pallet_truck_count as f64 + 1.0;
    for j in 0..config.pallet_truck_count {
        let x = bounds.x + bounds.width * (j as f64 + 1.0) / slots;
        resources.push(SimulatedResource::new(
            ResourceId::for_kind(ResourceKind::PalletTruck, j as u32 + 1),
            ResourceKind::PalletTruck,
            bounds.clamp_point(Point::new(x, staging_y), TARGET_MARGIN),
            bopt.base_speed + rng.gen_range(-0.2..0.2),
            rng.gen_bool(bopt.start_loaded_probability),
        ));
    }

    resources
}
