//! Banya gateway binary
//!
//! Serves the computed views over HTTP in front of the configured API
//! backend.
//!
//! # Usage
//!
//! ```bash
//! # Forward to the REST API named in banya.toml (or the default URL)
//! cargo run --bin banya-gateway
//!
//! # Run against the in-memory API
//! BANYA_API_BACKEND=local cargo run --bin banya-gateway
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `BANYA_API_URL`, `BANYA_API_BACKEND`, `BANYA_API_TIMEOUT_SECS`: see
//!   [`banya_frontend::client::config`]
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use banya_frontend::client::{ApiFactory, FrontendConfig};
use banya_frontend::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting banya gateway");

    let config = FrontendConfig::load()?;
    let api = ApiFactory::create(&config.api)?;
    info!(
        "Using {} API backend at {}",
        config.api.backend, config.api.base_url
    );

    let state = AppState::new(api, config.kitchen.clone());
    let app = create_router(state);

    let addr: SocketAddr = config.gateway.bind_address().parse()?;
    info!("Gateway listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
