//! Trip synthesis along network routes.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ConfigError, SpeedFactor, TimingConfig};
use crate::network::{Coordinate, RoadNetwork, Route};
use crate::profiles::TravelProfile;
use crate::rng::RandomSource;

/// One simulated moving entity: a path and a timestamp per path point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub path: Vec<Coordinate>,
    pub timestamps: Vec<f64>,
}

impl Trip {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether this trip follows `route` backwards.
    pub fn is_reversal_of(&self, route: &Route) -> bool {
        self.path.iter().rev().eq(route.coords().iter())
    }
}

/// Generates trips by walking randomly chosen routes.
///
/// Each trip starts at a random time in the start window, picks a route
/// uniformly, flips its direction half of the time, and advances the clock
/// by `distance * time_scale / speed_factor` per segment, never by less
/// than `min_step`.
pub struct TripGenerator {
    timing: TimingConfig,
}

impl TripGenerator {
    /// Creates a generator with the default timing constants.
    pub fn new() -> Self {
        Self {
            timing: TimingConfig::default(),
        }
    }

    /// Creates a generator with custom timing constants.
    pub fn with_timing(timing: TimingConfig) -> Result<Self, ConfigError> {
        timing.validate()?;
        Ok(Self { timing })
    }

    /// Generates up to `count` trips over `routes`.
    ///
    /// Returns an empty list when there are no routes.
    pub fn generate(
        &self,
        routes: &[Route],
        count: usize,
        speed: SpeedFactor,
        rng: &mut impl RandomSource,
    ) -> Vec<Trip> {
        let mut trips = Vec::new();

        for _ in 0..count {
            if routes.is_empty() {
                warn!("No routes available, produced {} of {count} trips", trips.len());
                break;
            }

            let route = &routes[rng.pick_index(routes.len())];
            let mut path = route.coords().to_vec();
            if rng.chance(0.5) {
                path.reverse();
            }
            let start = rng.uniform(self.timing.start_range());

            trips.push(self.traverse(path, start, speed));
        }

        debug!("Generated {} trips", trips.len());
        trips
    }

    /// Generates the trips a profile asks for on its network category.
    pub fn generate_for(
        &self,
        profile: &dyn TravelProfile,
        network: &RoadNetwork,
        rng: &mut impl RandomSource,
    ) -> Vec<Trip> {
        self.generate(
            network.routes(profile.category()),
            profile.trip_count(),
            profile.speed_factor(),
            rng,
        )
    }

    /// Timestamps a path starting at `start`.
    ///
    /// Every stored gap is at least `min_step`, even after rounding.
    fn traverse(&self, path: Vec<Coordinate>, start: f64, speed: SpeedFactor) -> Trip {
        let min_step = self.timing.min_step;
        let mut timestamps = Vec::with_capacity(path.len());
        let mut current_time = start;
        timestamps.push(current_time);

        for window in path.windows(2) {
            let distance = window[0].planar_distance(&window[1]);
            let time_taken = distance * self.timing.time_scale / speed.get();
            let mut next = current_time + time_taken.max(min_step);
            while next - current_time < min_step {
                next = next.next_up();
            }
            current_time = next;
            timestamps.push(current_time);
        }

        Trip { path, timestamps }
    }
}

impl Default for TripGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::ops::Range;

    use super::*;
    use crate::rng::RngSource;

    /// Replays fixed answers; panics if the generator asks for more.
    #[derive(Default)]
    struct ScriptedSource {
        picks: VecDeque<usize>,
        flips: VecDeque<bool>,
        starts: VecDeque<f64>,
    }

    impl ScriptedSource {
        fn new(picks: &[usize], flips: &[bool], starts: &[f64]) -> Self {
            Self {
                picks: picks.iter().copied().collect(),
                flips: flips.iter().copied().collect(),
                starts: starts.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn pick_index(&mut self, n: usize) -> usize {
            let pick = self.picks.pop_front().expect("unexpected pick");
            assert!(pick < n);
            pick
        }

        fn uniform(&mut self, range: Range<f64>) -> f64 {
            let value = self.starts.pop_front().expect("unexpected uniform");
            assert!(range.start <= value && value <= range.end);
            value
        }

        fn chance(&mut self, _p: f64) -> bool {
            self.flips.pop_front().expect("unexpected chance")
        }
    }

    fn route(points: &[[f64; 2]]) -> Route {
        Route::new(1, points.iter().copied().map(Coordinate::from).collect()).unwrap()
    }

    fn speed(value: f64) -> SpeedFactor {
        SpeedFactor::new(value).unwrap()
    }

    #[test]
    fn test_unit_segments_fast() {
        let routes = vec![route(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])];
        let mut rng = ScriptedSource::new(&[0], &[false], &[100.0]);

        let trips = TripGenerator::new().generate(&routes, 1, speed(2.0), &mut rng);

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].path, routes[0].coords());
        assert_eq!(trips[0].timestamps, vec![100.0, 500_100.0, 1_000_100.0]);
    }

    #[test]
    fn test_unit_segments_slow() {
        let routes = vec![route(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]])];
        let mut rng = ScriptedSource::new(&[0], &[false], &[100.0]);

        let trips = TripGenerator::new().generate(&routes, 1, speed(0.5), &mut rng);

        assert_eq!(trips[0].timestamps, vec![100.0, 2_000_100.0, 4_000_100.0]);
    }

    #[test]
    fn test_duplicate_point_uses_min_step() {
        let routes = vec![route(&[[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]])];
        let mut rng = ScriptedSource::new(&[0], &[false], &[0.0]);

        let trips = TripGenerator::new().generate(&routes, 1, speed(2.0), &mut rng);

        assert_eq!(trips[0].timestamps, vec![0.0, 20.0, 40.0]);
    }

    #[test]
    fn test_tiny_segment_clamped() {
        let routes = vec![route(&[[0.0, 0.0], [0.000001, 0.0]])];
        let mut rng = ScriptedSource::new(&[0], &[false], &[10.0]);

        let trips = TripGenerator::new().generate(&routes, 1, speed(2.0), &mut rng);

        // 1e-6 * 1e6 / 2 = 0.5, below the floor
        assert_eq!(trips[0].timestamps, vec![10.0, 30.0]);
    }

    #[test]
    fn test_empty_routes_yield_nothing() {
        let mut rng = ScriptedSource::default();
        let trips = TripGenerator::new().generate(&[], 5, speed(2.0), &mut rng);
        assert!(trips.is_empty());
    }

    #[test]
    fn test_reversed_direction() {
        let routes = vec![
            route(&[[0.0, 0.0], [0.0, 1.0]]),
            route(&[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0]]),
        ];
        let mut rng = ScriptedSource::new(&[1], &[true], &[250.0]);

        let trips = TripGenerator::new().generate(&routes, 1, speed(2.0), &mut rng);
        let trip = &trips[0];

        assert!(trip.is_reversal_of(&routes[1]));
        let replayed: Vec<Coordinate> = trip.path.iter().rev().copied().collect();
        assert_eq!(replayed, routes[1].coords());
        assert_eq!(trip.timestamps[0], 250.0);
    }

    #[test]
    fn test_exact_count_and_invariants() {
        let routes = vec![
            route(&[[103.83, 1.30], [103.831, 1.301], [103.832, 1.301]]),
            route(&[[103.84, 1.299], [103.84, 1.299], [103.841, 1.3]]),
            route(&[[103.835, 1.303], [103.836, 1.304]]),
        ];
        let mut rng = RngSource::seeded(42);

        let trips = TripGenerator::new().generate(&routes, 50, speed(0.5), &mut rng);

        assert_eq!(trips.len(), 50);
        for trip in &trips {
            assert!(trip.len() >= 2);
            assert_eq!(trip.path.len(), trip.timestamps.len());
            assert!((0.0..1000.0).contains(&trip.timestamps[0]));
            for pair in trip.timestamps.windows(2) {
                assert!(pair[1] - pair[0] >= 20.0);
            }
            assert!(
                routes
                    .iter()
                    .any(|r| trip.path == r.coords() || trip.is_reversal_of(r))
            );
        }
    }

    #[test]
    fn test_floor_holds_after_rounding() {
        let routes = vec![route(&[
            [103.8332, 1.2995],
            [103.8332, 1.2995],
            [103.8332, 1.2995],
            [103.8333, 1.2996],
            [103.8333, 1.2996],
            [103.8333, 1.2996],
            [103.8333, 1.2996],
        ])];

        for seed in 0..200 {
            let mut rng = RngSource::seeded(seed);
            let trips = TripGenerator::new().generate(&routes, 20, speed(0.5), &mut rng);
            for trip in &trips {
                for pair in trip.timestamps.windows(2) {
                    assert!(pair[1] - pair[0] >= 20.0, "gap {} below floor", pair[1] - pair[0]);
                }
            }
        }
    }

    #[test]
    fn test_huge_count_on_empty_routes() {
        let mut rng = ScriptedSource::default();
        let trips = TripGenerator::new().generate(&[], usize::MAX, speed(2.0), &mut rng);
        assert!(trips.is_empty());
    }

    #[test]
    fn test_custom_timing() {
        let timing = TimingConfig {
            start_window: (0.0, 0.0),
            min_step: 1.0,
            time_scale: 10.0,
        };
        let generator = TripGenerator::with_timing(timing).unwrap();
        let routes = vec![route(&[[0.0, 0.0], [0.0, 1.0]])];
        let mut rng = RngSource::seeded(3);

        let trips = generator.generate(&routes, 1, speed(1.0), &mut rng);

        assert_eq!(trips[0].timestamps, vec![0.0, 10.0]);
    }

    #[test]
    fn test_with_timing_rejects_invalid() {
        let timing = TimingConfig {
            time_scale: 0.0,
            ..Default::default()
        };
        assert!(TripGenerator::with_timing(timing).is_err());
    }

    #[test]
    fn test_trip_json_shape() {
        let trip = Trip {
            path: vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)],
            timestamps: vec![0.0, 20.0],
        };
        let json = serde_json::to_value(&trip).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"path": [[1.0, 2.0], [3.0, 4.0]], "timestamps": [0.0, 20.0]})
        );
    }
}
