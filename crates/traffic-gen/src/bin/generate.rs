//! Generates the traffic dataset for the map client.
//!
//! Run with:
//! ```
//! cargo run -p traffic-gen --bin generate
//! ```
//!
//! Set `TRAFFIC_SNAPSHOT` to a saved Overpass response to run offline, and
//! `TRAFFIC_SEED` for a reproducible dataset.

use traffic_gen::builders::DatasetBuilder;
use traffic_gen::config::TrafficConfig;
use traffic_gen::network::RoadNetwork;
use traffic_gen::output::{DatasetSink, JsonFileSink};
use traffic_gen::rng::RngSource;
use traffic_gen::sources::{MapData, OsmClient, SnapshotLoader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = TrafficConfig::from_env()?;

    let data = load_map_data(&config).await?;
    let network = RoadNetwork::load(&data);

    let mut rng = match config.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let result = DatasetBuilder::from_config(&config).build(&network, &mut rng)?;

    let metrics = &result.metrics;
    tracing::info!("Generation completed in {} ms", metrics.generation_time_ms);
    tracing::info!(
        "  Vehicle trips: {} (from {} routes)",
        metrics.vehicle_trips,
        metrics.vehicle_routes
    );
    tracing::info!(
        "  Foot trips: {} (from {} routes)",
        metrics.foot_trips,
        metrics.foot_routes
    );
    tracing::info!("  Points: {}", metrics.total_points);

    JsonFileSink::new(&config.output_path)
        .with_pretty(config.pretty)
        .write(&result.dataset)?;

    Ok(())
}

async fn load_map_data(config: &TrafficConfig) -> anyhow::Result<MapData> {
    if let Some(path) = &config.snapshot_path {
        tracing::info!("Loading OSM snapshot from {}", path.display());
        return Ok(SnapshotLoader::load_file(path)?);
    }

    let mut client = OsmClient::new().with_endpoint(config.overpass_endpoint.clone());
    if let Some(dir) = &config.cache_dir {
        client = client.with_cache_dir(dir);
    }

    Ok(client.fetch_network(config.region).await?)
}
