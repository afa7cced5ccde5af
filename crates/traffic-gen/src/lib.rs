//! Synthetic traffic generation for city-twin.
//!
//! Turns an OpenStreetMap road and footway network into timestamped vehicle
//! and pedestrian trips for animated map playback. The pipeline is strictly
//! sequential: fetch raw map data, load it into a [`RoadNetwork`], synthesize
//! trips per category, and write the combined [`Dataset`] to a sink.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use traffic_gen::prelude::*;
//!
//! let data = OsmClient::new().fetch_network(Region::ORCHARD_ROAD).await?;
//! let network = RoadNetwork::load(&data);
//!
//! let result = DatasetBuilder::new()
//!     .with_vehicles(100, 2.0)
//!     .with_pedestrians(200, 0.5)
//!     .build(&network, &mut RngSource::from_entropy())?;
//!
//! JsonFileSink::new("client/public/traffic_data.json").write(&result.dataset)?;
//! ```
//!
//! Timing is deliberately approximate: segment lengths are measured in raw
//! degrees on a flat plane, not geodesic metres.

pub mod builders;
pub mod config;
pub mod generators;
pub mod network;
pub mod output;
pub mod profiles;
pub mod rng;
pub mod sources;

pub use network::{Coordinate, PathCategory, RoadNetwork, Route};
pub use output::Dataset;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{DatasetBuilder, GenerationMetrics, GenerationResult};
    pub use crate::config::{BoundingBox, Region, SpeedFactor, TimingConfig, TrafficConfig};
    pub use crate::generators::{Trip, TripGenerator};
    pub use crate::network::{Coordinate, PathCategory, RoadNetwork, Route};
    pub use crate::output::{Dataset, DatasetSink, JsonFileSink, WriterSink};
    pub use crate::profiles::{PedestrianProfile, TravelProfile, VehicleProfile};
    pub use crate::rng::{RandomSource, RngSource};
    pub use crate::sources::{MapData, MapElement, OsmClient, SnapshotLoader};
}
