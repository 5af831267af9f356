// Warehouse Twin - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/warehouse-twin --heatmap volume --trail FL-001 --timeline
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/warehouse-twin --config warehouse.json --simulate-seconds 30 --verbose
// ```

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use warehouse_twin::heatmap::{HeatmapGenerator, HeatmapLayer};
use warehouse_twin::layout::{build_layout, LayoutStats, WarehouseLayout};
use warehouse_twin::simulation::{
    FleetStatistics, FrameLoop, FrameLoopReport, LoggingConfig, ManualClock, ResourceSimulator,
    SimulatedResource, SystemClock, TrailStatistics,
};
use warehouse_twin::trails::{
    build_timeline, ActivityTimeline, MovementTrail, MovementTrailGenerator,
};
use warehouse_twin::types::{
    CellId, CliArgs, HeatmapMetric, ResourceId, ResourceKind, SimulationConfig,
};
use warehouse_twin::wire::LayoutSummary;

/// Everything one run produced
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    generated_at: String,
    config: LayoutSummary,
    stats: LayoutStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<&'a WarehouseLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heatmap: Option<HeatmapLayer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    trails: Vec<TrailReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sku_matches: Option<Vec<CellId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<SimulationReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrailReport {
    trail: MovementTrail,
    statistics: TrailStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeline: Option<ActivityTimeline>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport {
    run: FrameLoopReport,
    fleet: FleetStatistics,
    resources: Vec<SimulatedResource>,
}

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().init()
    };
    let _log_guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Warehouse Twin");

    if let Err(e) = run(args) {
        error!("Warehouse Twin failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Warehouse Twin completed successfully");
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let config =
        SimulationConfig::from_cli_args(args.clone()).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - nothing will be generated.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_configuration_summary(&config);

    let layout = Arc::new(build_layout(&config.layout));
    let range = config.time_range_minutes;

    let heatmap = match &args.heatmap {
        Some(name) => {
            let metric: HeatmapMetric =
                name.parse().with_context(|| format!("Cannot build heatmap '{}'", name))?;
            Some(HeatmapGenerator::new(Arc::clone(&layout)).layer(metric, range))
        }
        None => None,
    };

    let trails = generate_trails(&args, &config, &layout);

    let sku_matches = args.sku.as_deref().map(|sku| {
        layout.search_sku(sku).into_iter().map(|cell| cell.cell_id.clone()).collect::<Vec<_>>()
    });

    let simulation = match args.simulate_seconds {
        Some(seconds) => {
            let duration_ms = i64::try_from(seconds)
                .ok()
                .and_then(|s| s.checked_mul(1_000))
                .with_context(|| format!("Cannot simulate {} seconds", seconds))?;
            let mut simulator =
                ResourceSimulator::new(Arc::clone(&layout), config.simulator.clone(), config.seed);
            let clock = ManualClock::new(Utc::now().timestamp_millis());
            let run = FrameLoop::default().run_simulated(&mut simulator, &clock, duration_ms);
            eprintln!("{}", simulator.fleet_statistics());
            Some(SimulationReport {
                run,
                fleet: simulator.fleet_statistics(),
                resources: simulator.resources(),
            })
        }
        None => None,
    };

    let report = Report {
        generated_at: Utc::now().to_rfc3339(),
        config: LayoutSummary::from(&config.layout),
        stats: layout.stats(),
        layout: args.print_layout.then_some(layout.as_ref()),
        heatmap,
        trails,
        sku_matches,
        simulation,
    };

    write_report(&report, args.output.as_deref())
}

/// Trails for the ids named on the command line, plus the roster when asked
fn generate_trails(
    args: &CliArgs,
    config: &SimulationConfig,
    layout: &Arc<WarehouseLayout>,
) -> Vec<TrailReport> {
    let mut ids = args.trails.clone();
    if args.all_trails {
        let roster = roster_ids(config.simulator.forklift_count, ResourceKind::Forklift)
            .chain(roster_ids(config.simulator.pallet_truck_count, ResourceKind::PalletTruck));
        for id in roster {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    if ids.is_empty() {
        return Vec::new();
    }

    let generator = MovementTrailGenerator::new(Arc::clone(layout), Arc::new(SystemClock))
        .with_work_period(config.trails.work_period_hours);
    let range = config.time_range_minutes;

    generator
        .generate_trails(&ids, range)
        .into_iter()
        .map(|trail| {
            let timeline = args.timeline.then(|| {
                let window = generator.cached_window(trail.resource_id.as_str(), range);
                build_timeline(&trail, window.as_ref())
            });
            TrailReport { statistics: TrailStatistics::from_trail(&trail), trail, timeline }
        })
        .collect()
}

fn roster_ids(count: usize, kind: ResourceKind) -> impl Iterator<Item = String> {
    (1..=count as u32).map(move |n| ResourceId::for_kind(kind, n).to_string())
}

fn write_report(report: &Report<'_>, output: Option<&str>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write report to '{}'", path))?;
            info!("Report written to: {}", path);
            eprintln!("Report written to: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    let layout = &config.layout;
    eprintln!("Configuration:");
    eprintln!("  Aisles: {}", layout.aisle_labels.join(", "));
    eprintln!(
        "  Bins x Levels x Depth: {} x {} x {}",
        layout.bins_per_aisle, layout.levels, layout.depth
    );
    eprintln!("  Expected Cells: {}", layout.expected_cell_count());
    eprintln!("  Dock Doors: {}", layout.dock_doors);
    eprintln!(
        "  Roster: {} forklifts, {} pallet trucks",
        config.simulator.forklift_count, config.simulator.pallet_truck_count
    );
    eprintln!("  Time Range: {} min", config.time_range_minutes);
    if let Some(hours) = config.trails.work_period_hours {
        eprintln!("  Work Period: {:.1} h", hours);
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
