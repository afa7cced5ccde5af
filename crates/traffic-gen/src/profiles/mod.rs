//! Travel profiles.
//!
//! A profile pairs a network category with how many trips to synthesize on
//! it and how fast they move. Vehicles default to 100 trips at factor 2.0,
//! pedestrians to 200 trips at factor 0.5.

mod pedestrian;
mod vehicle;

pub use pedestrian::PedestrianProfile;
pub use vehicle::VehicleProfile;

use crate::config::SpeedFactor;
use crate::network::PathCategory;

/// Trait for travel profiles.
pub trait TravelProfile: Send + Sync {
    /// Which routes this profile travels on.
    fn category(&self) -> PathCategory;

    /// Divisor applied to traversal time; larger is faster.
    fn speed_factor(&self) -> SpeedFactor;

    /// Number of trips requested.
    fn trip_count(&self) -> usize;
}
