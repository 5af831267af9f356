//! Configuration structures for the warehouse twin
//!
//! This module contains the layout, simulator and trail configuration, the
//! layered loading logic (defaults < JSON config file < command line) and the
//! validation rules applied before the binary runs.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Longest headless simulator run accepted on the command line (one day)
pub const MAX_SIMULATE_SECONDS: u64 = 24 * 60 * 60;

/// Geometry parameters the warehouse layout is derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Ordered aisle labels, one rack band per label
    pub aisle_labels: Vec<String>,
    /// Bins along each aisle
    pub bins_per_aisle: u32,
    /// Stacked levels per bin
    pub levels: u32,
    /// Rack depth positions per bin (1 and 2 sit on either side of the aisle)
    pub depth: u32,
    /// Width of a single cell
    pub cell_width: f64,
    /// Height of a single cell
    pub cell_height: f64,
    /// Width of the travel aisle between two racks
    pub aisle_width: f64,
    /// Number of dock doors along the bottom edge
    pub dock_doors: u32,
    /// Width of a dock door
    pub dock_width: f64,
    /// Height of a dock door
    pub dock_height: f64,
    /// Width of a staging area
    pub staging_width: f64,
    /// Height of a staging area
    pub staging_height: f64,
    /// Margin around the racks; also the gap between racks, staging and docks
    pub dock_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            aisle_labels: ["A1", "A2", "A3", "A4", "A5"].iter().map(|s| s.to_string()).collect(),
            bins_per_aisle: 20,
            levels: 2,
            depth: 2,
            cell_width: 40.0,
            cell_height: 30.0,
            aisle_width: 120.0,
            dock_doors: 6,
            dock_width: 60.0,
            dock_height: 20.0,
            staging_width: 80.0,
            staging_height: 40.0,
            dock_offset: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Number of rack tiers stacked on each side of an aisle
    pub fn rack_tiers_per_side(&self) -> u32 {
        self.depth.div_ceil(2)
    }

    /// Width of the rack on one side of an aisle
    pub fn rack_width(&self) -> f64 {
        self.cell_width * self.rack_tiers_per_side() as f64
    }

    /// Horizontal distance between the starts of two adjacent aisle bands
    pub fn aisle_pitch(&self) -> f64 {
        2.0 * self.rack_width() + self.aisle_width
    }

    /// Cells belonging to a single aisle
    pub fn cells_per_aisle(&self) -> usize {
        self.bins_per_aisle as usize * self.levels as usize * self.depth as usize
    }

    /// Cells a layout built from this configuration contains
    pub fn expected_cell_count(&self) -> usize {
        if self.has_storage() {
            self.aisle_labels.len() * self.cells_per_aisle()
        } else {
            0
        }
    }

    /// Whether the configuration yields any storage cells at all
    pub fn has_storage(&self) -> bool {
        !self.aisle_labels.is_empty()
            && self.bins_per_aisle > 0
            && self.levels > 0
            && self.depth > 0
            && self.cell_width > 0.0
            && self.cell_height > 0.0
            && self.aisle_width >= 0.0
    }
}

/// Parameters of the live resource simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Forklifts in the default roster
    pub forklift_count: usize,
    /// Pallet trucks (BOPTs) in the default roster
    pub pallet_truck_count: usize,
    /// Minimum time between listener notifications
    pub update_interval_ms: u64,
    /// How long position samples stay in a resource's rolling trail
    pub trail_retention_ms: u64,
    /// Most resources allowed to move within a single tick
    pub max_movers_per_tick: usize,
    /// Upper bound of the random delay added to every wake time
    pub wake_jitter_ms: u64,
    /// Scale applied to a resource's speed to get its per-tick step
    pub speed_scale: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            forklift_count: 3,
            pallet_truck_count: 5,
            update_interval_ms: 3_000,
            trail_retention_ms: 5 * 60 * 1_000,
            max_movers_per_tick: 4,
            wake_jitter_ms: 2_000,
            speed_scale: 0.5,
        }
    }
}

/// Parameters of the movement-trail generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailConfig {
    /// Length of the centred work period; `None` spreads activity over the whole range
    pub work_period_hours: Option<f64>,
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "warehouse-twin",
    version = "0.1.0",
    about = "Warehouse Twin - Synthetic warehouse layout, heatmaps, trails and live equipment",
    long_about = "Builds a synthetic warehouse floor plan and emits layout geometry, seeded heatmap overlays, deterministic equipment movement trails and a headless run of the live resource simulator as a single JSON report.

EXAMPLES:
    # Layout statistics only
    warehouse-twin

    # Volume heatmap over the last two hours
    warehouse-twin --heatmap volume --time-range 120

    # Trails with timelines for two resources
    warehouse-twin --trail FL-001 --trail BOPT-002 --timeline

    # Run the live simulator for 30 simulated seconds
    warehouse-twin --simulate-seconds 30

    # Generate configuration template
    warehouse-twin --print-config > warehouse.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Aisle labels, comma separated
    #[arg(long, value_delimiter = ',', help = "Aisle labels, comma separated (e.g. A1,A2,A3)")]
    pub aisles: Option<Vec<String>>,

    /// Bins per aisle
    #[arg(long, help = "Bins per aisle")]
    pub bins_per_aisle: Option<u32>,

    /// Levels per bin
    #[arg(long, help = "Levels per bin")]
    pub levels: Option<u32>,

    /// Rack depth positions per bin
    #[arg(long, help = "Rack depth positions per bin")]
    pub depth: Option<u32>,

    /// Number of dock doors
    #[arg(long, help = "Number of dock doors")]
    pub dock_doors: Option<u32>,

    /// Forklifts in the live roster
    #[arg(long, help = "Forklifts in the live roster")]
    pub forklifts: Option<usize>,

    /// Pallet trucks in the live roster
    #[arg(long, help = "Pallet trucks (BOPTs) in the live roster")]
    pub pallet_trucks: Option<usize>,

    /// Time range in minutes for heatmaps and trails
    #[arg(
        long,
        help = "Time range in minutes",
        long_help = "Time range in minutes for heatmaps and trails. Must be greater than 0. Default: 120"
    )]
    pub time_range: Option<u32>,

    /// Seed for the live simulator and position feed
    #[arg(long, help = "Random seed for the live simulator")]
    pub seed: Option<u64>,

    /// Heatmap metric to generate
    #[arg(
        long,
        help = "Heatmap metric to generate",
        long_help = "Heatmap metric to generate: volume, frequency, occupancy, misplacement, expiry or exceptions"
    )]
    pub heatmap: Option<String>,

    /// Resource ids to generate trails for
    #[arg(long = "trail", help = "Resource id to generate a trail for (repeatable)")]
    pub trails: Vec<String>,

    /// Generate trails for the whole default roster
    #[arg(long, help = "Generate trails for every resource in the roster")]
    pub all_trails: bool,

    /// Attach activity timelines to generated trails
    #[arg(long, help = "Attach activity timelines to generated trails")]
    pub timeline: bool,

    /// Run the live simulator headless for this many simulated seconds
    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(..=MAX_SIMULATE_SECONDS),
        help = "Run the live simulator for N simulated seconds (at most one day)"
    )]
    pub simulate_seconds: Option<u64>,

    /// Run a simulated SKU search
    #[arg(long, help = "Simulated SKU search")]
    pub sku: Option<String>,

    /// Include full layout geometry in the report
    #[arg(long, help = "Include full layout geometry (cells, docks, staging) in the report")]
    pub print_layout: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, help = "Output path for the JSON report")]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without generating anything
    #[arg(long, help = "Validate configuration without generating output")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Ordered aisle labels
    pub aisle_labels: Option<Vec<String>>,
    /// Bins along each aisle
    pub bins_per_aisle: Option<u32>,
    /// Stacked levels per bin
    pub levels: Option<u32>,
    /// Rack depth positions per bin
    pub depth: Option<u32>,
    /// Width of a single cell
    pub cell_width: Option<f64>,
    /// Height of a single cell
    pub cell_height: Option<f64>,
    /// Width of the travel aisle
    pub aisle_width: Option<f64>,
    /// Number of dock doors
    pub dock_doors: Option<u32>,
    /// Width of a dock door
    pub dock_width: Option<f64>,
    /// Height of a dock door
    pub dock_height: Option<f64>,
    /// Width of a staging area
    pub staging_width: Option<f64>,
    /// Height of a staging area
    pub staging_height: Option<f64>,
    /// Floor margin and rack/staging/dock gap
    pub dock_offset: Option<f64>,
    /// Forklifts in the default roster
    pub forklift_count: Option<usize>,
    /// Pallet trucks in the default roster
    pub pallet_truck_count: Option<usize>,
    /// Minimum time between listener notifications
    pub update_interval_ms: Option<u64>,
    /// Rolling trail retention window
    pub trail_retention_ms: Option<u64>,
    /// Most resources allowed to move per tick
    pub max_movers_per_tick: Option<usize>,
    /// Wake time jitter bound
    pub wake_jitter_ms: Option<u64>,
    /// Speed to per-tick step scale
    pub speed_scale: Option<f64>,
    /// Centred work period length
    pub work_period_hours: Option<f64>,
    /// Default time range in minutes
    pub time_range_minutes: Option<u32>,
    /// Seed for the live simulator
    pub seed: Option<u64>,
}

/// Complete configuration of a warehouse twin run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Layout geometry
    #[serde(flatten)]
    pub layout: LayoutConfig,

    /// Live simulator parameters
    #[serde(flatten)]
    pub simulator: SimulatorConfig,

    /// Trail generator parameters
    #[serde(flatten)]
    pub trails: TrailConfig,

    /// Time range in minutes used for heatmaps and trails
    pub time_range_minutes: u32,

    /// Seed for the live simulator and position feed
    pub seed: Option<u64>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Two aisles share a label, which would produce duplicate cell ids
    #[error("Duplicate aisle label: {0}")]
    DuplicateAisleLabel(String),

    /// An aisle label is blank
    #[error("Aisle labels must not be empty")]
    EmptyAisleLabel,

    /// A dimension is negative or not a finite number
    #[error("Invalid value for {field}: {value} (must be a finite, non-negative number)")]
    InvalidDimension {
        /// Name of the offending field
        field: String,
        /// The offending value
        value: f64,
    },

    /// Time range is zero
    #[error("Time range must be greater than 0 minutes, got {0}")]
    InvalidTimeRange(u32),

    /// Notification interval is zero
    #[error("Update interval must be greater than 0 ms, got {0}")]
    InvalidUpdateInterval(u64),

    /// Trail retention window is zero
    #[error("Trail retention must be greater than 0 ms, got {0}")]
    InvalidRetentionWindow(u64),

    /// Mover cap is zero
    #[error("Max movers per tick must be greater than 0, got {0}")]
    InvalidMoverCap(usize),

    /// Work period is outside one to twenty-four hours
    #[error("Work period must be between 1 and 24 hours, got {0}")]
    InvalidWorkPeriod(f64),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            simulator: SimulatorConfig::default(),
            trails: TrailConfig::default(),
            time_range_minutes: 120,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        let layout = defaults.layout;
        let simulator = defaults.simulator;

        Self {
            layout: LayoutConfig {
                aisle_labels: file.aisle_labels.unwrap_or(layout.aisle_labels),
                bins_per_aisle: file.bins_per_aisle.unwrap_or(layout.bins_per_aisle),
                levels: file.levels.unwrap_or(layout.levels),
                depth: file.depth.unwrap_or(layout.depth),
                cell_width: file.cell_width.unwrap_or(layout.cell_width),
                cell_height: file.cell_height.unwrap_or(layout.cell_height),
                aisle_width: file.aisle_width.unwrap_or(layout.aisle_width),
                dock_doors: file.dock_doors.unwrap_or(layout.dock_doors),
                dock_width: file.dock_width.unwrap_or(layout.dock_width),
                dock_height: file.dock_height.unwrap_or(layout.dock_height),
                staging_width: file.staging_width.unwrap_or(layout.staging_width),
                staging_height: file.staging_height.unwrap_or(layout.staging_height),
                dock_offset: file.dock_offset.unwrap_or(layout.dock_offset),
            },
            simulator: SimulatorConfig {
                forklift_count: file.forklift_count.unwrap_or(simulator.forklift_count),
                pallet_truck_count: file
                    .pallet_truck_count
                    .unwrap_or(simulator.pallet_truck_count),
                update_interval_ms: file
                    .update_interval_ms
                    .unwrap_or(simulator.update_interval_ms),
                trail_retention_ms: file
                    .trail_retention_ms
                    .unwrap_or(simulator.trail_retention_ms),
                max_movers_per_tick: file
                    .max_movers_per_tick
                    .unwrap_or(simulator.max_movers_per_tick),
                wake_jitter_ms: file.wake_jitter_ms.unwrap_or(simulator.wake_jitter_ms),
                speed_scale: file.speed_scale.unwrap_or(simulator.speed_scale),
            },
            trails: TrailConfig {
                work_period_hours: file.work_period_hours.or(defaults.trails.work_period_hours),
            },
            time_range_minutes: file.time_range_minutes.unwrap_or(defaults.time_range_minutes),
            seed: file.seed.or(defaults.seed),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.aisles {
            config.layout.aisle_labels = value.into_iter().map(|s| s.trim().to_string()).collect();
        }
        if let Some(value) = args.bins_per_aisle {
            config.layout.bins_per_aisle = value;
        }
        if let Some(value) = args.levels {
            config.layout.levels = value;
        }
        if let Some(value) = args.depth {
            config.layout.depth = value;
        }
        if let Some(value) = args.dock_doors {
            config.layout.dock_doors = value;
        }
        if let Some(value) = args.forklifts {
            config.simulator.forklift_count = value;
        }
        if let Some(value) = args.pallet_trucks {
            config.simulator.pallet_truck_count = value;
        }
        if let Some(value) = args.time_range {
            config.time_range_minutes = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    ///
    /// Zero bins, levels or depth are accepted: they build an empty layout.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen = HashSet::new();
        for label in &self.layout.aisle_labels {
            if label.trim().is_empty() {
                return Err(ConfigValidationError::EmptyAisleLabel);
            }
            if !seen.insert(label.as_str()) {
                return Err(ConfigValidationError::DuplicateAisleLabel(label.clone()));
            }
        }

        let layout = &self.layout;
        self.validate_dimension("cell_width", layout.cell_width)?;
        self.validate_dimension("cell_height", layout.cell_height)?;
        self.validate_dimension("aisle_width", layout.aisle_width)?;
        self.validate_dimension("dock_width", layout.dock_width)?;
        self.validate_dimension("dock_height", layout.dock_height)?;
        self.validate_dimension("staging_width", layout.staging_width)?;
        self.validate_dimension("staging_height", layout.staging_height)?;
        self.validate_dimension("dock_offset", layout.dock_offset)?;
        self.validate_dimension("speed_scale", self.simulator.speed_scale)?;

        if self.time_range_minutes == 0 {
            return Err(ConfigValidationError::InvalidTimeRange(self.time_range_minutes));
        }
        if self.simulator.update_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidUpdateInterval(
                self.simulator.update_interval_ms,
            ));
        }
        if self.simulator.trail_retention_ms == 0 {
            return Err(ConfigValidationError::InvalidRetentionWindow(
                self.simulator.trail_retention_ms,
            ));
        }
        if self.simulator.max_movers_per_tick == 0 {
            return Err(ConfigValidationError::InvalidMoverCap(self.simulator.max_movers_per_tick));
        }
        if let Some(hours) = self.trails.work_period_hours {
            if !(1.0..=24.0).contains(&hours) {
                return Err(ConfigValidationError::InvalidWorkPeriod(hours));
            }
        }

        Ok(())
    }

    /// Helper method to validate dimension values
    fn validate_dimension(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigValidationError::InvalidDimension { field: field.to_string(), value });
        }
        Ok(())
    }

    /// Time range as a span of milliseconds
    pub fn time_range_ms(&self) -> i64 {
        self.time_range_minutes as i64 * 60_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs::try_parse_from(["warehouse-twin"]).unwrap()
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.layout.aisle_labels, vec!["A1", "A2", "A3", "A4", "A5"]);
        assert_eq!(config.layout.bins_per_aisle, 20);
        assert_eq!(config.layout.levels, 2);
        assert_eq!(config.layout.depth, 2);
        assert_eq!(config.layout.cell_width, 40.0);
        assert_eq!(config.layout.cell_height, 30.0);
        assert_eq!(config.layout.aisle_width, 120.0);
        assert_eq!(config.simulator.update_interval_ms, 3_000);
        assert_eq!(config.simulator.trail_retention_ms, 300_000);
        assert_eq!(config.time_range_minutes, 120);
        assert!(config.seed.is_none());
        assert!(config.trails.work_period_hours.is_none());
    }

    #[test]
    fn test_layout_config_derived_values() {
        let layout = LayoutConfig::default();

        assert_eq!(layout.rack_tiers_per_side(), 1);
        assert_eq!(layout.rack_width(), 40.0);
        assert_eq!(layout.aisle_pitch(), 200.0);
        assert_eq!(layout.cells_per_aisle(), 80);
        assert_eq!(layout.expected_cell_count(), 400);

        let deep = LayoutConfig { depth: 3, ..LayoutConfig::default() };
        assert_eq!(deep.rack_tiers_per_side(), 2);
        assert_eq!(deep.aisle_pitch(), 280.0);
    }

    #[test]
    fn test_layout_config_without_storage() {
        let layout = LayoutConfig { bins_per_aisle: 0, ..LayoutConfig::default() };
        assert!(!layout.has_storage());
        assert_eq!(layout.expected_cell_count(), 0);

        let layout = LayoutConfig { aisle_labels: Vec::new(), ..LayoutConfig::default() };
        assert_eq!(layout.expected_cell_count(), 0);
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "aisle_labels": ["N1", "N2"],
            "bins_per_aisle": 12,
            "levels": 3,
            "dock_doors": 2,
            "forklift_count": 1,
            "work_period_hours": 8.0,
            "time_range_minutes": 480,
            "seed": 99
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.layout.aisle_labels, vec!["N1", "N2"]);
        assert_eq!(config.layout.bins_per_aisle, 12);
        assert_eq!(config.layout.levels, 3);
        assert_eq!(config.layout.dock_doors, 2);
        assert_eq!(config.simulator.forklift_count, 1);
        assert_eq!(config.trails.work_period_hours, Some(8.0));
        assert_eq!(config.time_range_minutes, 480);
        assert_eq!(config.seed, Some(99));
        // Untouched fields keep their defaults
        assert_eq!(config.layout.depth, 2);
        assert_eq!(config.simulator.pallet_truck_count, 5);
    }

    #[test]
    fn test_config_file_missing_and_unsupported() {
        match SimulationConfig::from_file("/definitely/not/here.json") {
            Err(ConfigError::FileNotFound(_)) => {}
            other => panic!("Expected FileNotFound, got {:?}", other),
        }

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        match SimulationConfig::from_file(temp_file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehouse.json");

        let config = SimulationConfig {
            time_range_minutes: 30,
            seed: Some(7),
            ..SimulationConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = SimulationConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "warehouse-twin",
            "--aisles",
            "B1,B2,B3",
            "--bins-per-aisle",
            "8",
            "--levels",
            "4",
            "--time-range",
            "45",
            "--seed",
            "12345",
            "--forklifts",
            "6",
        ])
        .unwrap();

        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.layout.aisle_labels, vec!["B1", "B2", "B3"]);
        assert_eq!(config.layout.bins_per_aisle, 8);
        assert_eq!(config.layout.levels, 4);
        assert_eq!(config.time_range_minutes, 45);
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.simulator.forklift_count, 6);
        // Default values should remain for non-overridden fields
        assert_eq!(config.layout.depth, 2);
        assert_eq!(config.simulator.pallet_truck_count, 5);
    }

    #[test]
    fn test_no_overrides_uses_defaults() {
        let config = SimulationConfig::from_cli_args(empty_args()).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_simulation_config_validation_success() {
        assert!(SimulationConfig::default().validate().is_ok());

        let mut config = SimulationConfig::default();
        config.layout.bins_per_aisle = 0;
        config.layout.levels = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_duplicate_aisle() {
        let mut config = SimulationConfig::default();
        config.layout.aisle_labels = vec!["A1".into(), "A2".into(), "A1".into()];

        match config.validate() {
            Err(ConfigValidationError::DuplicateAisleLabel(label)) => assert_eq!(label, "A1"),
            other => panic!("Expected DuplicateAisleLabel, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_blank_aisle() {
        let mut config = SimulationConfig::default();
        config.layout.aisle_labels = vec!["A1".into(), " ".into()];

        assert!(matches!(config.validate(), Err(ConfigValidationError::EmptyAisleLabel)));
    }

    #[test]
    fn test_validation_dimension() {
        let mut config = SimulationConfig::default();
        config.layout.cell_width = -4.0;

        match config.validate() {
            Err(ConfigValidationError::InvalidDimension { field, value }) => {
                assert_eq!(field, "cell_width");
                assert_eq!(value, -4.0);
            }
            other => panic!("Expected InvalidDimension, got {:?}", other),
        }

        let mut config = SimulationConfig::default();
        config.layout.aisle_width = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_validation_time_and_simulator_limits() {
        let mut config = SimulationConfig::default();
        config.time_range_minutes = 0;
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidTimeRange(0))));

        let mut config = SimulationConfig::default();
        config.simulator.update_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidUpdateInterval(0))
        ));

        let mut config = SimulationConfig::default();
        config.simulator.trail_retention_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRetentionWindow(0))
        ));

        let mut config = SimulationConfig::default();
        config.simulator.max_movers_per_tick = 0;
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidMoverCap(0))));
    }

    #[test]
    fn test_validation_work_period() {
        let mut config = SimulationConfig::default();
        config.trails.work_period_hours = Some(30.0);
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidWorkPeriod(_))));

        config.trails.work_period_hours = Some(8.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialized_config_is_flat() {
        let json = SimulationConfig::default().print_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("aisle_labels").is_some());
        assert!(value.get("update_interval_ms").is_some());
        assert!(value.get("time_range_minutes").is_some());
        assert!(value.get("layout").is_none());
    }

    #[test]
    fn test_time_range_ms() {
        let config = SimulationConfig { time_range_minutes: 60, ..SimulationConfig::default() };
        assert_eq!(config.time_range_ms(), 3_600_000);
    }
}
