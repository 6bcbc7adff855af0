// Forbid unwrap() in production code to prevent panics at runtime.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;
use std::sync::Arc;

use anime_catalog::{
    AppState, Catalog, CatalogService,
    auth::JwtAuthority,
    config::ServerConfig,
    router,
    time::SystemTimeSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anime_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables.
    // A misconfigured token issuer must stop startup, not fail per request.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: issuer={}, audience={}, token_lifetime={}s, listen_port={}",
        config.jwt.issuer(),
        config.jwt.audience(),
        config.jwt.lifetime().as_secs(),
        config.listen_port
    );

    let authority = Arc::new(JwtAuthority::new(
        config.jwt.clone(),
        Arc::new(SystemTimeSource),
    ));
    let catalog = Catalog::seeded();
    tracing::info!("Catalog seeded with {} entries", catalog.len());

    let state = AppState::new(CatalogService::new(catalog, authority.clone()), authority);
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Server error: {e}");
            std::process::exit(1);
        });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
