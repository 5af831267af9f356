//! Seeded heatmap values
//!
//! Every metric walks the cells in layout order and draws from one
//! [`SeededRandom`] stream seeded by `(metric, time range)`, so the same
//! request always produces the same overlay for the same layout.

use crate::heatmap::colors::ColorRamp;
use crate::layout::{Cell, WarehouseLayout};
use crate::simulation::{SeededRandom, WarehouseResult};
use crate::types::{CellId, HeatmapMetric};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Most samples a heatmap carries
pub const MAX_HEATMAP_SAMPLES: usize = 200;

/// Values below this are left out of the result
pub const MIN_HEATMAP_VALUE: f64 = 0.1;

/// Intensity of one cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapSample {
    /// Cell the value belongs to
    pub cell_id: CellId,
    /// Intensity in `[0, 1]`
    pub value: f64,
}

/// A generated overlay together with its colour ramp
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapLayer {
    /// Metric drawn
    pub metric: HeatmapMetric,
    /// Time range the values cover
    pub time_range_minutes: u32,
    /// Colour ramp for the metric
    pub ramp: ColorRamp,
    /// Samples, highest first
    pub samples: Vec<HeatmapSample>,
}

/// Heatmap generator bound to one layout
#[derive(Debug, Clone)]
pub struct HeatmapGenerator {
    layout: Arc<WarehouseLayout>,
}

impl HeatmapGenerator {
    /// Create a generator over a layout
    pub fn new(layout: Arc<WarehouseLayout>) -> Self {
        Self { layout }
    }

    /// Samples for a metric over the last `time_range_minutes`
    pub fn generate(&self, metric: HeatmapMetric, time_range_minutes: u32) -> Vec<HeatmapSample> {
        generate_heatmap_data(&self.layout, metric, time_range_minutes)
    }

    /// Like [`generate`](Self::generate), resolving the metric by name
    pub fn generate_named(
        &self,
        metric: &str,
        time_range_minutes: u32,
    ) -> WarehouseResult<Vec<HeatmapSample>> {
        let metric: HeatmapMetric = metric.parse()?;
        Ok(self.generate(metric, time_range_minutes))
    }

    /// Samples plus colour ramp, ready for a renderer
    pub fn layer(&self, metric: HeatmapMetric, time_range_minutes: u32) -> HeatmapLayer {
        HeatmapLayer {
            metric,
            time_range_minutes,
            ramp: ColorRamp::for_metric(metric),
            samples: self.generate(metric, time_range_minutes),
        }
    }
}

/// Seed of the value stream for a `(metric, time range)` pair
pub fn heatmap_seed(metric: HeatmapMetric, time_range_minutes: u32) -> i64 {
    let name_hash: i64 = metric.as_str().bytes().map(i64::from).sum();
    name_hash * 1000 + time_range_minutes as i64
}

/// Generate heatmap samples for a metric
///
/// Returns at most [`MAX_HEATMAP_SAMPLES`] samples sorted by value, highest
/// first. Cells under [`MIN_HEATMAP_VALUE`] are omitted, and once more than the
/// cap qualify the lowest are dropped. A zero time range yields nothing.
#[instrument(skip(layout), fields(cells = layout.cells.len()))]
pub fn generate_heatmap_data(
    layout: &WarehouseLayout,
    metric: HeatmapMetric,
    time_range_minutes: u32,
) -> Vec<HeatmapSample> {
    if time_range_minutes == 0 {
        return Vec::new();
    }

    let mut random = SeededRandom::new(heatmap_seed(metric, time_range_minutes));
    let shape = Shape::new(layout, time_range_minutes);

    let mut samples: Vec<HeatmapSample> = layout
        .cells
        .iter()
        .filter_map(|cell| {
            let value = shape.value(metric, cell, &mut random).clamp(0.0, 1.0);
            (value >= MIN_HEATMAP_VALUE)
                .then(|| HeatmapSample { cell_id: cell.cell_id.clone(), value })
        })
        .collect();

    let qualifying = samples.len();
    samples.sort_by(|a, b| b.value.total_cmp(&a.value));
    samples.truncate(MAX_HEATMAP_SAMPLES);

    debug!(%metric, qualifying, kept = samples.len(), "Generated heatmap");
    samples
}

struct Shape {
    bin_midpoint: f64,
    top_level: u32,
    range: f64,
}

impl Shape {
    fn new(layout: &WarehouseLayout, time_range_minutes: u32) -> Self {
        Self {
            bin_midpoint: layout.config.bins_per_aisle as f64 / 2.0,
            top_level: layout.config.levels,
            range: time_range_minutes as f64,
        }
    }

    fn value(&self, metric: HeatmapMetric, cell: &Cell, random: &mut SeededRandom) -> f64 {
        // Distance from the entrance aisle
        let aisle = cell.aisle_index as f64;

        match metric {
            HeatmapMetric::Volume => {
                let base = 1.0 - aisle * 0.3 - (cell.bin as f64 - self.bin_midpoint).abs() * 0.01
                    + random.next() * 0.3;
                base.max(0.0) * (self.range / 120.0).min(1.0)
            }
            HeatmapMetric::Frequency => {
                let base = 0.8 - aisle * 0.2 + random.next() * 0.4;
                base.max(0.0) * (self.range / 60.0).min(1.0)
            }
            HeatmapMetric::Occupancy => 0.6 + random.next() * 0.35,
            HeatmapMetric::Misplacement => {
                sparse_event(random, 0.05 * (1.5 - aisle * 0.2))
            }
            HeatmapMetric::Expiry => {
                let boost = if cell.level == self.top_level { 1.5 } else { 1.0 };
                sparse_event(random, 0.03 * boost)
            }
            HeatmapMetric::Exceptions => sparse_event(random, 0.02),
        }
    }
}

fn sparse_event(random: &mut SeededRandom, chance: f64) -> f64 {
    if random.chance(chance) {
        random.next()
    } else {
        0.0
    }
}
