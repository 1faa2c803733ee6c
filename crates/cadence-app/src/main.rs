use std::sync::Arc;

use cadence_app::app::api::routes;
use cadence_app::config::ConfigHandler;
use cadence_app::seed::load_seed_file;
use cadence_app::store_handler::EventStoreHandler;
use cadence_core::config::load_config;
use cadence_service::event::InMemoryEventStore;
use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Cadence event server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let store = match config.storage.seed_file.as_deref() {
        Some(path) => InMemoryEventStore::with_events(load_seed_file(path).await?),
        None => InMemoryEventStore::new(),
    };

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(EventStoreHandler {
            store: Arc::new(store),
        })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
