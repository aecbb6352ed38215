//! Disaster Event Collector — Binary Entrypoint
//! Boots the Axum HTTP server with the collection pipeline wired to the
//! in-memory event store and the mock connectors, plus the optional
//! interval scheduler and the Prometheus /metrics route.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use disaster_event_collector::api::{create_router, AppState};
use disaster_event_collector::collector::Collector;
use disaster_event_collector::config::CollectorConfig;
use disaster_event_collector::location::Gazetteer;
use disaster_event_collector::metrics::Metrics;
use disaster_event_collector::scheduler::spawn_collection_scheduler;
use disaster_event_collector::sources::default_connectors;
use disaster_event_collector::store::MemoryEventStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("disaster_event_collector=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = CollectorConfig::load_default()?;
    tracing::info!(?cfg, "collector configuration loaded");

    let gazetteer = match &cfg.gazetteer_path {
        Some(path) => Gazetteer::load_from_file(path),
        None => Gazetteer::builtin(),
    };

    let store = Arc::new(MemoryEventStore::new());
    let collector = Arc::new(Collector::new(store, Arc::new(gazetteer)));
    let connectors = Arc::new(default_connectors());

    let metrics = Metrics::init();

    if cfg.schedule_enabled {
        let _ = spawn_collection_scheduler(cfg.interval_secs, collector.clone(), connectors.clone());
        tracing::info!(interval_secs = cfg.interval_secs, "collection scheduler enabled");
    }

    let state = AppState {
        collector,
        connectors,
    };
    let router = create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
