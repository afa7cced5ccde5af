//! Vehicle travel profile.

use super::TravelProfile;
use crate::config::{ConfigError, SpeedFactor};
use crate::network::PathCategory;

/// Cars and buses on primary, secondary, tertiary and residential roads.
#[derive(Debug, Clone)]
pub struct VehicleProfile {
    speed_factor: SpeedFactor,
    trip_count: usize,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            speed_factor: SpeedFactor::VEHICLE,
            trip_count: 100,
        }
    }
}

impl VehicleProfile {
    pub fn new(trip_count: usize, speed_factor: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            speed_factor: SpeedFactor::new(speed_factor)?,
            trip_count,
        })
    }
}

impl TravelProfile for VehicleProfile {
    fn category(&self) -> PathCategory {
        PathCategory::Vehicle
    }

    fn speed_factor(&self) -> SpeedFactor {
        self.speed_factor
    }

    fn trip_count(&self) -> usize {
        self.trip_count
    }
}
