//! Data acquisition sources for map data.
//!
//! - [`OsmClient`]: Fetch road and footway networks from OpenStreetMap via Overpass API
//! - [`SnapshotLoader`]: Load a previously saved Overpass response

mod osm;
mod snapshot;

pub use osm::{MapData, MapElement, OsmClient, OsmError};
pub use snapshot::{SnapshotError, SnapshotLoader};
