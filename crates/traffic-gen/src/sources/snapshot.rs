//! Loading saved Overpass responses from disk.

use std::path::Path;

use thiserror::Error;

use super::osm::MapData;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot holds a failed query: {0}")]
    Remark(String),
}

/// Loads map data captured earlier from the Overpass API.
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Loads map data from a JSON file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<MapData, SnapshotError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Self::check(serde_json::from_reader(reader)?)
    }

    /// Loads map data from JSON in memory.
    pub fn load_bytes(data: &[u8]) -> Result<MapData, SnapshotError> {
        Self::check(serde_json::from_slice(data)?)
    }

    fn check(data: MapData) -> Result<MapData, SnapshotError> {
        match data.runtime_error() {
            Some(remark) => Err(SnapshotError::Remark(remark.to_string())),
            None => Ok(data),
        }
    }
}
