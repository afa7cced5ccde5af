//! Entity generators for synthetic traffic.
//!
//! - [`TripGenerator`]: Walk network routes and timestamp each point

pub mod trip;

pub use trip::{Trip, TripGenerator};
