mod api;
mod config;
mod sentiment;
mod storage;

use crate::api::{AppState, health_handler};
use crate::config::AppConfig;
use crate::storage::ReviewStore;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Sentiment Review API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.storage.database_path);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Initialize review store (creates the schema if absent)
    info!("💾 Initializing review store...");
    let store = Arc::new(ReviewStore::open(&config.storage.database_path)?);
    let review_count = store.count()?;
    info!("✅ Review store ready ({} reviews)", review_count);

    // Create application state
    let state = AppState { store };

    // Build router with modular routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(api::reviews::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let port = std::env::var("PORT").unwrap_or_else(|_| config.server.port.to_string());
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /health            - Health check");
    info!("   POST /reviews           - Create review");
    info!("   GET  /reviews?sentiment - List reviews, optional filter");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
