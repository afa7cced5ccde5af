//! Builders for assembling generated data.

mod dataset;

pub use dataset::{DatasetBuilder, GenerationMetrics, GenerationResult};
