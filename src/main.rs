//! node-renamer - Proxy share-link renamer with hexagonal architecture
//!
//! This is the composition root that wires together all the components.

use node_renamer::adapters::inbound::{AppState, HttpServer};
use node_renamer::adapters::outbound::{
    DohHostResolver, HttpGeoResolver, HttpSubscriptionFetcher, ResolutionCache,
};
use node_renamer::application::RenameService;
use node_renamer::config::load_config;
use node_renamer::infrastructure::{shutdown_signal, ShutdownController};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting node-renamer listen={} suffix={} provider_timeout={:?}",
        cfg.listen_addr,
        cfg.suffix,
        cfg.provider_timeout()
    );

    // ===== COMPOSITION ROOT =====

    // 1. Create outbound adapters

    // Process-wide resolution cache shared by both resolvers
    let cache = Arc::new(ResolutionCache::new());

    // Provider client; each query carries its own timeout
    let provider_client = reqwest::Client::builder()
        .user_agent(concat!("node-renamer/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let host_resolver = Arc::new(DohHostResolver::with_defaults(
        provider_client.clone(),
        cache.clone(),
        cfg.provider_timeout(),
    ));
    let geo_resolver = Arc::new(HttpGeoResolver::with_defaults(
        provider_client,
        cache.clone(),
        cfg.provider_timeout(),
    ));
    let fetcher = Arc::new(HttpSubscriptionFetcher::with_timeout(cfg.fetch_timeout())?);

    // 2. Create application service
    let service = Arc::new(RenameService::new(
        host_resolver,
        geo_resolver,
        fetcher,
        cfg.suffix.clone(),
    ));

    // 3. Create inbound adapter and run until a shutdown signal arrives
    let shutdown = ShutdownController::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let state = AppState::new(service, cache, cfg.bg_img.as_deref());
    let server = HttpServer::new(cfg.listen_addr, state);

    server.run(shutdown).await
}
