//! card-billing HTTP Server
//!
//! Axum-based server: registers pending payments, serves the card form and
//! validates submitted card numbers with the mod-10 checksum.

mod config;
mod form;
mod handlers;
mod routes;
mod state;
mod sweeper;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billing_core::{MemoryPaymentStore, PaymentStore};

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::sweeper::spawn_expiry_sweeper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Initialize payment store
    let ttl = chrono::Duration::from_std(config.pending_ttl)?;
    let store: Arc<dyn PaymentStore> = Arc::new(MemoryPaymentStore::with_ttl(ttl));
    tracing::info!(ttl_secs = ttl.num_seconds(), "In-memory payment store ready");

    let _sweeper = spawn_expiry_sweeper(store.clone(), config.sweep_interval);

    // Build application state
    let addr = config.bind_addr.clone();
    let state = AppState::new(config, store)?;
    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("card-billing server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  POST /register           - Register a pending payment");
    tracing::info!("  GET  /payments/card/form - Card form for a session");
    tracing::info!("  POST /luhn               - Submit a card number");
    tracing::info!("  GET  /processed          - List processed payments");

    axum::serve(listener, app).await?;

    Ok(())
}
