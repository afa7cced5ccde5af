//! Dataset assembly and persistence.
//!
//! The dataset is the JSON document consumed by the map client:
//!
//! ```json
//! {
//!   "vehicles": [ { "path": [[lon, lat], ...], "timestamps": [t0, t1, ...] } ],
//!   "foot":     [ { "path": [[lon, lat], ...], "timestamps": [t0, t1, ...] } ]
//! }
//! ```

mod sink;

pub use sink::{DatasetSink, JsonFileSink, WriterSink};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generators::Trip;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Vehicle and pedestrian trips for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub vehicles: Vec<Trip>,
    pub foot: Vec<Trip>,
}

impl Dataset {
    pub fn new(vehicles: Vec<Trip>, foot: Vec<Trip>) -> Self {
        Self { vehicles, foot }
    }

    pub fn trip_count(&self) -> usize {
        self.vehicles.len() + self.foot.len()
    }

    /// Total number of timestamped points across both collections.
    pub fn point_count(&self) -> usize {
        self.vehicles
            .iter()
            .chain(&self.foot)
            .map(Trip::len)
            .sum()
    }

    /// Encodes the dataset as JSON bytes.
    pub fn to_json(&self, pretty: bool) -> Result<Vec<u8>, OutputError> {
        let bytes = if pretty {
            serde_json::to_vec_pretty(self)?
        } else {
            serde_json::to_vec(self)?
        };
        Ok(bytes)
    }
}
