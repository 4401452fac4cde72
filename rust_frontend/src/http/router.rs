//! Router configuration for the gateway.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Admin board
        .route("/schedule", get(handlers::get_schedule))
        .route(
            "/reservations/{reservation_id}/receipt",
            get(handlers::get_receipt),
        )
        // Public pages
        .route("/kitchen", get(handlers::get_kitchen))
        .route("/bookings", post(handlers::create_booking))
        .route("/login", post(handlers::login));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::{KitchenSettings, LocalApi};

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Arc::new(LocalApi::new()), KitchenSettings::default());
        let _router = create_router(state);
    }
}
