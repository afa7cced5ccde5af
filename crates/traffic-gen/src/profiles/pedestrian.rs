//! Pedestrian travel profile.

use super::TravelProfile;
use crate::config::{ConfigError, SpeedFactor};
use crate::network::PathCategory;

/// Walkers on footways, pedestrian streets and paths.
///
/// Slower than vehicles, and there are usually more of them.
#[derive(Debug, Clone)]
pub struct PedestrianProfile {
    speed_factor: SpeedFactor,
    trip_count: usize,
}

impl Default for PedestrianProfile {
    fn default() -> Self {
        Self {
            speed_factor: SpeedFactor::PEDESTRIAN,
            trip_count: 200,
        }
    }
}

impl PedestrianProfile {
    pub fn new(trip_count: usize, speed_factor: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            speed_factor: SpeedFactor::new(speed_factor)?,
            trip_count,
        })
    }
}

impl TravelProfile for PedestrianProfile {
    fn category(&self) -> PathCategory {
        PathCategory::Foot
    }

    fn speed_factor(&self) -> SpeedFactor {
        self.speed_factor
    }

    fn trip_count(&self) -> usize {
        self.trip_count
    }
}
