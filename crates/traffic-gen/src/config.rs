//! Configuration types for traffic generation.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Speed factor must be finite and strictly positive, got {0}")]
    InvalidSpeedFactor(f64),
    #[error("Start window must be finite with start <= end, got {start}..{end}")]
    InvalidStartWindow { start: f64, end: f64 },
    #[error("Minimum step must be finite and non-negative, got {0}")]
    InvalidMinStep(f64),
    #[error("Time scale must be finite and strictly positive, got {0}")]
    InvalidTimeScale(f64),
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Geographic bounding box defined by southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude (south)
    pub min_lat: f64,
    /// Minimum longitude (west)
    pub min_lon: f64,
    /// Maximum latitude (north)
    pub max_lat: f64,
    /// Maximum longitude (east)
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Formats the box as an Overpass filter: `south,west,north,east`.
    pub fn to_overpass(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Pre-defined geographic regions for traffic generation.
#[derive(Debug, Clone, Copy)]
pub struct Region;

impl Region {
    /// Orchard Road, Singapore - dense mix of arterial roads and pedestrian malls.
    pub const ORCHARD_ROAD: BoundingBox = BoundingBox::new(1.297, 103.830, 1.305, 103.844);
}

/// A validated speed factor.
///
/// Divides traversal time, so larger values mean faster apparent movement.
/// Zero, negative and non-finite values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    /// Default for vehicles.
    pub const VEHICLE: SpeedFactor = SpeedFactor(2.0);
    /// Default for pedestrians.
    pub const PEDESTRIAN: SpeedFactor = SpeedFactor(0.5);

    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidSpeedFactor(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Timing constants shared by every synthesized trip.
///
/// The scale and floor are empirically tuned; keep them as configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Window the first timestamp of each trip is drawn from.
    pub start_window: (f64, f64),
    /// Smallest increment between consecutive timestamps.
    pub min_step: f64,
    /// Multiplier turning coordinate distance into time units.
    pub time_scale: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_window: (0.0, 1000.0),
            min_step: 20.0,
            time_scale: 1_000_000.0,
        }
    }
}

impl TimingConfig {
    pub fn start_range(&self) -> Range<f64> {
        self.start_window.0..self.start_window.1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (start, end) = self.start_window;
        if !(start.is_finite() && end.is_finite()) || start > end {
            return Err(ConfigError::InvalidStartWindow { start, end });
        }
        if !self.min_step.is_finite() || self.min_step < 0.0 {
            return Err(ConfigError::InvalidMinStep(self.min_step));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        Ok(())
    }
}

/// Configuration for a traffic generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Area queried from OpenStreetMap.
    pub region: BoundingBox,

    /// Number of vehicle trips to synthesize.
    pub vehicle_trips: usize,

    /// Number of pedestrian trips to synthesize.
    pub foot_trips: usize,

    /// Speed factor for vehicles.
    pub vehicle_speed_factor: f64,

    /// Speed factor for pedestrians.
    pub foot_speed_factor: f64,

    pub timing: TimingConfig,

    /// Where the dataset is written.
    pub output_path: PathBuf,

    /// Pretty-print the output JSON.
    pub pretty: bool,

    /// Overpass API endpoint.
    pub overpass_endpoint: String,

    /// Directory for cached Overpass responses.
    pub cache_dir: Option<PathBuf>,

    /// Saved Overpass response to use instead of fetching.
    pub snapshot_path: Option<PathBuf>,

    /// Fixed RNG seed. Runs are non-reproducible when unset.
    pub seed: Option<u64>,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            region: Region::ORCHARD_ROAD,
            vehicle_trips: 100,
            foot_trips: 200,
            vehicle_speed_factor: 2.0,
            foot_speed_factor: 0.5,
            timing: TimingConfig::default(),
            output_path: PathBuf::from("client/public/traffic_data.json"),
            pretty: false,
            overpass_endpoint: "https://overpass-api.de/api/interpreter".to_string(),
            cache_dir: None,
            snapshot_path: None,
            seed: None,
        }
    }
}

impl TrafficConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Builds the configuration from `TRAFFIC_CONFIG` (if set) plus
    /// environment overrides, then validates it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("TRAFFIC_CONFIG") {
            Ok(path) => Self::load_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(path) = std::env::var("TRAFFIC_OUTPUT") {
            config.output_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("TRAFFIC_SNAPSHOT") {
            config.snapshot_path = Some(PathBuf::from(path));
        }
        if let Ok(dir) = std::env::var("OSM_CACHE_DIR") {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        if let Ok(endpoint) = std::env::var("OVERPASS_ENDPOINT") {
            config.overpass_endpoint = endpoint;
        }
        if let Ok(seed) = std::env::var("TRAFFIC_SEED") {
            let parsed = seed.parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: "TRAFFIC_SEED",
                value: seed.clone(),
            })?;
            config.seed = Some(parsed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks every tunable before any trip is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        SpeedFactor::new(self.vehicle_speed_factor)?;
        SpeedFactor::new(self.foot_speed_factor)?;
        self.timing.validate()
    }
}
