//! OpenStreetMap Overpass API client for fetching road and footway networks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::BoundingBox;

#[derive(Debug, Error)]
pub enum OsmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Overpass returned HTTP {0}")]
    Status(u16),
    #[error("Rate limited, try again later")]
    RateLimited,
    #[error("Overpass query failed: {0}")]
    Remark(String),
}

/// Raw map data as returned by Overpass with `[out:json]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapData {
    /// Set by Overpass when a query times out or runs out of memory.
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default, deserialize_with = "lenient_elements")]
    pub elements: Vec<MapElement>,
}

impl MapData {
    /// The remark, if it reports a failed query.
    ///
    /// Overpass answers such failures with HTTP 200 and empty or partial
    /// `elements`, so the data must not be used.
    pub fn runtime_error(&self) -> Option<&str> {
        self.remark
            .as_deref()
            .filter(|remark| remark.trim_start().starts_with("runtime error"))
    }
}

/// Decodes each element on its own; an element that does not fit becomes
/// [`MapElement::Other`] instead of failing the document.
fn lenient_elements<'de, D>(deserializer: D) -> Result<Vec<MapElement>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut malformed = 0usize;
    let elements: Vec<MapElement> = raw
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).unwrap_or_else(|_| {
                malformed += 1;
                MapElement::Other
            })
        })
        .collect();

    if malformed > 0 {
        tracing::debug!("Skipped {malformed} malformed elements");
    }
    Ok(elements)
}

/// Keeps string-valued tags and drops the rest.
fn string_tags<'de, D>(deserializer: D) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<HashMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw.map(|tags| {
        tags.into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(value) => Some((key, value)),
                _ => None,
            })
            .collect()
    }))
}

/// A single Overpass element.
///
/// Only nodes and ways are meaningful for network loading. Relations and
/// any other element kinds deserialize to [`MapElement::Other`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MapElement {
    #[serde(rename = "node")]
    Node {
        id: i64,
        lat: Option<f64>,
        lon: Option<f64>,
    },
    #[serde(rename = "way")]
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default, deserialize_with = "string_tags")]
        tags: Option<HashMap<String, String>>,
    },
    #[serde(other)]
    Other,
}

/// Client for fetching road networks from OpenStreetMap via Overpass API.
pub struct OsmClient {
    client: reqwest::Client,
    cache_dir: Option<PathBuf>,
    endpoint: String,
}

impl OsmClient {
    /// Creates a new OSM client with default endpoint.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            cache_dir: None,
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
        }
    }

    /// Enables file-based caching of API responses.
    ///
    /// Raw responses are stored as JSON files named after the query hash.
    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&path).ok();
        self.cache_dir = Some(path);
        self
    }

    /// Sets a custom Overpass API endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builds the query for drivable roads and walkable paths in `bounds`.
    ///
    /// `>;` recurses down to the referenced nodes so ways can be resolved.
    pub fn network_query(bounds: BoundingBox) -> String {
        let bbox = bounds.to_overpass();
        format!(
            r#"[out:json][timeout:25];
(
  way["highway"~"primary|secondary|tertiary|residential"]({bbox});
  way["highway"~"footway|pedestrian|path"]({bbox});
);
out body;
>;
out skel qt;"#
        )
    }

    /// Fetches the vehicle and foot network within a bounding box.
    pub async fn fetch_network(&self, bounds: BoundingBox) -> Result<MapData, OsmError> {
        let query = Self::network_query(bounds);
        self.execute_query(&query).await
    }

    /// Executes an Overpass query and parses the results.
    async fn execute_query(&self, query: &str) -> Result<MapData, OsmError> {
        if let Some(cached) = self.check_cache(query)? {
            return Self::parse_body(&cached);
        }

        tracing::info!("Fetching OSM data from {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OsmError::RateLimited);
        }
        if !status.is_success() {
            return Err(OsmError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let parsed = Self::parse_body(&text)?;
        tracing::debug!("Received {} elements", parsed.elements.len());

        self.save_cache(query, &text)?;

        Ok(parsed)
    }

    /// Parses a response body, rejecting failed queries.
    fn parse_body(body: &str) -> Result<MapData, OsmError> {
        let parsed: MapData = serde_json::from_str(body)?;
        if let Some(remark) = parsed.runtime_error() {
            return Err(OsmError::Remark(remark.to_string()));
        }
        if let Some(remark) = &parsed.remark {
            tracing::warn!("Overpass remark: {remark}");
        }
        Ok(parsed)
    }

    /// Checks cache for a previous raw response.
    fn check_cache(&self, query: &str) -> Result<Option<String>, OsmError> {
        let Some(ref cache_dir) = self.cache_dir else {
            return Ok(None);
        };

        let hash = Self::hash_query(query);
        let cache_path = cache_dir.join(format!("{hash}.json"));

        if cache_path.exists() {
            let data = std::fs::read_to_string(&cache_path)?;
            tracing::debug!("Cache hit for query hash {hash}");
            return Ok(Some(data));
        }

        Ok(None)
    }

    /// Saves a raw response to cache.
    fn save_cache(&self, query: &str, body: &str) -> Result<(), OsmError> {
        let Some(ref cache_dir) = self.cache_dir else {
            return Ok(());
        };

        let hash = Self::hash_query(query);
        let cache_path = cache_dir.join(format!("{hash}.json"));
        std::fs::write(cache_path, body)?;
        tracing::debug!("Cached response for query hash {hash}");

        Ok(())
    }

    /// Simple hash of query string for cache key.
    fn hash_query(query: &str) -> String {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        query.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

impl Default for OsmClient {
    fn default() -> Self {
        Self::new()
    }
}
