//! Integration tests for heatmap generation
//!
//! Size cap, value range, ordering, determinism and metric resolution.

use std::sync::Arc;
use warehouse_twin::heatmap::{
    generate_heatmap_data, ColorRamp, HeatmapGenerator, MAX_HEATMAP_SAMPLES,
    MIN_HEATMAP_VALUE,
};
use warehouse_twin::layout::build_layout;
use warehouse_twin::simulation::WarehouseError;
use warehouse_twin::types::{HeatmapMetric, LayoutConfig};

fn large_layout_config() -> LayoutConfig {
    LayoutConfig {
        aisle_labels: ["A1", "A2", "A3", "A4"].iter().map(|s| s.to_string()).collect(),
        bins_per_aisle: 60,
        levels: 3,
        depth: 2,
        ..LayoutConfig::default()
    }
}

/// Every metric respects the cap, the value range, the threshold and the ordering
#[test]
fn test_heatmap_invariants_for_all_metrics() {
    let layout = build_layout(&large_layout_config());

    for metric in HeatmapMetric::ALL {
        for range in [15, 60, 120, 480] {
            let samples = generate_heatmap_data(&layout, metric, range);
            assert!(samples.len() <= MAX_HEATMAP_SAMPLES, "{} {}", metric, range);
            for sample in &samples {
                assert!((0.0..=1.0).contains(&sample.value));
                assert!(sample.value >= MIN_HEATMAP_VALUE);
                assert!(layout.find_cell(sample.cell_id.as_str()).is_some());
            }
            assert!(samples.windows(2).all(|w| w[0].value >= w[1].value));
        }
    }
}

/// Identical arguments produce identical samples
#[test]
fn test_heatmap_is_deterministic() {
    let layout = Arc::new(build_layout(&large_layout_config()));
    let generator = HeatmapGenerator::new(Arc::clone(&layout));

    for metric in HeatmapMetric::ALL {
        assert_eq!(generator.generate(metric, 120), generator.generate(metric, 120));
    }
}

/// Volume saturates a layout this size, so truncation applies
#[test]
fn test_volume_is_truncated() {
    let layout = build_layout(&large_layout_config());
    let samples = generate_heatmap_data(&layout, HeatmapMetric::Volume, 120);
    assert_eq!(samples.len(), MAX_HEATMAP_SAMPLES);
}

/// Unknown metric names are rejected instead of producing an empty overlay
#[test]
fn test_unknown_metric_name() {
    let generator = HeatmapGenerator::new(Arc::new(build_layout(&LayoutConfig::default())));

    let err = generator.generate_named("temperature", 60).unwrap_err();
    assert!(matches!(err, WarehouseError::UnsupportedMetric(ref name) if name == "temperature"));
    assert_eq!(err.category(), "Heatmap");
    assert!(err.is_recoverable());

    let samples = generator.generate_named("Occupancy", 60).unwrap();
    assert_eq!(samples, generator.generate(HeatmapMetric::Occupancy, 60));
}

/// Zero range and empty layouts give empty overlays
#[test]
fn test_empty_inputs() {
    let layout = build_layout(&LayoutConfig::default());
    assert!(generate_heatmap_data(&layout, HeatmapMetric::Frequency, 0).is_empty());

    let empty = build_layout(&LayoutConfig { levels: 0, ..LayoutConfig::default() });
    assert!(generate_heatmap_data(&empty, HeatmapMetric::Volume, 120).is_empty());
}

/// Layers carry the metric's colour ramp
#[test]
fn test_layer_ramp() {
    let generator = HeatmapGenerator::new(Arc::new(build_layout(&LayoutConfig::default())));
    let layer = generator.layer(HeatmapMetric::Expiry, 60);

    assert_eq!(layer.ramp, ColorRamp::for_metric(HeatmapMetric::Expiry));
    let value = serde_json::to_value(&layer).unwrap();
    assert_eq!(value["metric"], "expiry");
    assert_eq!(value["timeRangeMinutes"], 60);
}
