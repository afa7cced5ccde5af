//! Road network loading from raw map elements.
//!
//! Ways are resolved against the node index and sorted into two categories
//! by their `highway` tag. Loading never fails: a way that cannot be used
//! is dropped, and node references that do not resolve are skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sources::{MapData, MapElement};

/// A `(lon, lat)` pair. Serializes as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Straight-line distance in degrees, treating lon/lat as a flat plane.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        (other.lon - self.lon).hypot(other.lat - self.lat)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

/// Which kind of traffic a way carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCategory {
    Vehicle,
    Foot,
}

impl PathCategory {
    /// Classifies a `highway` tag value.
    pub fn from_highway(value: &str) -> Option<Self> {
        match value {
            "primary" | "secondary" | "tertiary" | "residential" => Some(Self::Vehicle),
            "footway" | "pedestrian" | "path" => Some(Self::Foot),
            _ => None,
        }
    }
}

/// A resolved way: at least two coordinates in way order.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    way_id: i64,
    coords: Vec<Coordinate>,
}

impl Route {
    /// Returns `None` when fewer than two coordinates remain.
    pub fn new(way_id: i64, coords: Vec<Coordinate>) -> Option<Self> {
        (coords.len() >= 2).then_some(Self { way_id, coords })
    }

    pub fn way_id(&self) -> i64 {
        self.way_id
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Nodes and categorized routes derived from one map snapshot.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    nodes: HashMap<i64, Coordinate>,
    vehicle: Vec<Route>,
    foot: Vec<Route>,
}

impl RoadNetwork {
    /// Builds the node index and both route collections.
    pub fn load(data: &MapData) -> Self {
        let nodes: HashMap<i64, Coordinate> = data
            .elements
            .iter()
            .filter_map(|element| match element {
                MapElement::Node {
                    id,
                    lat: Some(lat),
                    lon: Some(lon),
                } => Some((*id, Coordinate::new(*lon, *lat))),
                _ => None,
            })
            .collect();

        let mut network = Self {
            nodes,
            ..Default::default()
        };
        let mut dropped = 0usize;

        for element in &data.elements {
            let MapElement::Way { id, nodes, tags } = element else {
                continue;
            };
            let Some(tags) = tags else {
                dropped += 1;
                continue;
            };

            let highway = tags.get("highway").map(String::as_str).unwrap_or("");
            let Some(category) = PathCategory::from_highway(highway) else {
                dropped += 1;
                continue;
            };

            let coords = nodes
                .iter()
                .filter_map(|node_id| network.nodes.get(node_id).copied())
                .collect();

            match Route::new(*id, coords) {
                Some(route) => network.routes_mut(category).push(route),
                None => dropped += 1,
            }
        }

        info!(
            "Parsed {} nodes, {} road segments and {} footway segments",
            network.nodes.len(),
            network.vehicle.len(),
            network.foot.len()
        );
        debug!("Dropped {dropped} unusable ways");

        network
    }

    /// Looks up a node coordinate.
    pub fn node(&self, id: i64) -> Option<Coordinate> {
        self.nodes.get(&id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Routes for one category.
    pub fn routes(&self, category: PathCategory) -> &[Route] {
        match category {
            PathCategory::Vehicle => &self.vehicle,
            PathCategory::Foot => &self.foot,
        }
    }

    fn routes_mut(&mut self, category: PathCategory) -> &mut Vec<Route> {
        match category {
            PathCategory::Vehicle => &mut self.vehicle,
            PathCategory::Foot => &mut self.foot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, lon: f64, lat: f64) -> MapElement {
        MapElement::Node {
            id,
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    fn way(id: i64, nodes: &[i64], highway: Option<&str>) -> MapElement {
        MapElement::Way {
            id,
            nodes: nodes.to_vec(),
            tags: highway.map(|h| HashMap::from([("highway".to_string(), h.to_string())])),
        }
    }

    #[test]
    fn test_classification() {
        for value in ["primary", "secondary", "tertiary", "residential"] {
            assert_eq!(PathCategory::from_highway(value), Some(PathCategory::Vehicle));
        }
        for value in ["footway", "pedestrian", "path"] {
            assert_eq!(PathCategory::from_highway(value), Some(PathCategory::Foot));
        }
        assert_eq!(PathCategory::from_highway("motorway"), None);
        assert_eq!(PathCategory::from_highway(""), None);
    }

    #[test]
    fn test_load_categorizes_ways() {
        let data = MapData {
            remark: None,
            elements: vec![
                node(1, 0.0, 0.0),
                node(2, 0.0, 1.0),
                node(3, 1.0, 1.0),
                way(10, &[1, 2, 3], Some("residential")),
                way(11, &[3, 1], Some("footway")),
                way(12, &[1, 2], Some("motorway")),
                way(13, &[1, 2], None),
            ],
        };

        let network = RoadNetwork::load(&data);

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.node(2), Some(Coordinate::new(0.0, 1.0)));

        let vehicle = network.routes(PathCategory::Vehicle);
        assert_eq!(vehicle.len(), 1);
        assert_eq!(vehicle[0].way_id(), 10);
        assert_eq!(
            vehicle[0].coords(),
            &[
                Coordinate::new(0.0, 0.0),
                Coordinate::new(0.0, 1.0),
                Coordinate::new(1.0, 1.0)
            ]
        );

        let foot = network.routes(PathCategory::Foot);
        assert_eq!(foot.len(), 1);
        assert_eq!(foot[0].way_id(), 11);
    }

    #[test]
    fn test_dangling_refs_shorten_route() {
        let data = MapData {
            remark: None,
            elements: vec![
                node(1, 0.0, 0.0),
                node(3, 1.0, 1.0),
                way(10, &[1, 2, 3], Some("primary")),
            ],
        };

        let network = RoadNetwork::load(&data);
        let routes = network.routes(PathCategory::Vehicle);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].len(), 2);
    }

    #[test]
    fn test_short_routes_dropped() {
        let data = MapData {
            remark: None,
            elements: vec![
                node(1, 0.0, 0.0),
                way(10, &[1, 2], Some("primary")),
                way(11, &[], Some("path")),
            ],
        };

        let network = RoadNetwork::load(&data);
        assert!(network.routes(PathCategory::Vehicle).is_empty());
        assert!(network.routes(PathCategory::Foot).is_empty());
    }

    #[test]
    fn test_nodes_without_coordinates_skipped() {
        let data = MapData {
            remark: None,
            elements: vec![
                MapElement::Node {
                    id: 1,
                    lat: None,
                    lon: Some(1.0),
                },
                node(2, 0.0, 0.0),
                MapElement::Other,
            ],
        };

        let network = RoadNetwork::load(&data);
        assert_eq!(network.node_count(), 1);
        assert_eq!(network.node(1), None);
    }

    #[test]
    fn test_ways_before_nodes_still_resolve() {
        let data = MapData {
            remark: None,
            elements: vec![
                way(10, &[1, 2], Some("pedestrian")),
                node(1, 0.0, 0.0),
                node(2, 0.5, 0.5),
            ],
        };

        let network = RoadNetwork::load(&data);
        assert_eq!(network.routes(PathCategory::Foot).len(), 1);
    }

    #[test]
    fn test_coordinate_serializes_as_pair() {
        let json = serde_json::to_string(&Coordinate::new(103.8, 1.3)).unwrap();
        assert_eq!(json, "[103.8,1.3]");
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Coordinate::new(103.8, 1.3));
    }

    #[test]
    fn test_planar_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_eq!(a.planar_distance(&b), 5.0);
        assert_eq!(a.planar_distance(&a), 0.0);
    }
}
