//! Fluent builder for generating a complete traffic dataset.

use std::time::Instant;

use tracing::info;

use crate::config::{ConfigError, TimingConfig, TrafficConfig};
use crate::generators::TripGenerator;
use crate::network::{PathCategory, RoadNetwork};
use crate::output::Dataset;
use crate::profiles::{PedestrianProfile, TravelProfile, VehicleProfile};
use crate::rng::RandomSource;

/// Result of building a dataset.
#[derive(Debug)]
pub struct GenerationResult {
    pub dataset: Dataset,
    pub metrics: GenerationMetrics,
}

/// Counts and timing from one generation run.
#[derive(Debug, Clone)]
pub struct GenerationMetrics {
    /// Vehicle routes available to pick from.
    pub vehicle_routes: usize,
    /// Foot routes available to pick from.
    pub foot_routes: usize,
    pub vehicle_trips: usize,
    pub foot_trips: usize,
    /// Timestamped points across all trips.
    pub total_points: usize,
    /// Time spent synthesizing (milliseconds).
    pub generation_time_ms: u64,
}

/// Builder for vehicle plus pedestrian datasets.
///
/// # Example
///
/// ```rust,ignore
/// let result = DatasetBuilder::new()
///     .with_vehicles(100, 2.0)
///     .with_pedestrians(200, 0.5)
///     .build(&network, &mut RngSource::seeded(7))?;
/// ```
pub struct DatasetBuilder {
    vehicle_trips: usize,
    vehicle_speed: f64,
    foot_trips: usize,
    foot_speed: f64,
    timing: TimingConfig,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates a builder with the default counts and speeds.
    pub fn new() -> Self {
        Self::from_config(&TrafficConfig::default())
    }

    /// Takes counts, speeds and timing from a run configuration.
    pub fn from_config(config: &TrafficConfig) -> Self {
        Self {
            vehicle_trips: config.vehicle_trips,
            vehicle_speed: config.vehicle_speed_factor,
            foot_trips: config.foot_trips,
            foot_speed: config.foot_speed_factor,
            timing: config.timing.clone(),
        }
    }

    /// Sets the vehicle trip count and speed factor.
    pub fn with_vehicles(mut self, count: usize, speed_factor: f64) -> Self {
        self.vehicle_trips = count;
        self.vehicle_speed = speed_factor;
        self
    }

    /// Sets the pedestrian trip count and speed factor.
    pub fn with_pedestrians(mut self, count: usize, speed_factor: f64) -> Self {
        self.foot_trips = count;
        self.foot_speed = speed_factor;
        self
    }

    /// Sets the timing constants.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Generates both trip collections.
    ///
    /// All parameters are validated before the first trip is drawn.
    pub fn build(
        &self,
        network: &RoadNetwork,
        rng: &mut impl RandomSource,
    ) -> Result<GenerationResult, ConfigError> {
        let vehicles = VehicleProfile::new(self.vehicle_trips, self.vehicle_speed)?;
        let pedestrians = PedestrianProfile::new(self.foot_trips, self.foot_speed)?;
        let generator = TripGenerator::with_timing(self.timing.clone())?;

        let start = Instant::now();

        info!("Simulating {} vehicle trips", vehicles.trip_count());
        let vehicle_trips = generator.generate_for(&vehicles, network, rng);
        info!("Simulating {} pedestrian trips", pedestrians.trip_count());
        let foot_trips = generator.generate_for(&pedestrians, network, rng);

        let dataset = Dataset::new(vehicle_trips, foot_trips);
        let metrics = GenerationMetrics {
            vehicle_routes: network.routes(PathCategory::Vehicle).len(),
            foot_routes: network.routes(PathCategory::Foot).len(),
            vehicle_trips: dataset.vehicles.len(),
            foot_trips: dataset.foot.len(),
            total_points: dataset.point_count(),
            generation_time_ms: start.elapsed().as_millis() as u64,
        };

        Ok(GenerationResult { dataset, metrics })
    }
}
