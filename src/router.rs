use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>, frontend_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Topology routes
        .route("/api/topology", get(handlers::topology::get_topology))
        .route("/api/topology/refresh", post(handlers::topology::refresh_topology))
        .route(
            "/api/topology/orientation/toggle",
            post(handlers::topology::toggle_orientation),
        )
        // Device routes
        .route("/api/devices", get(handlers::devices::list_devices))
        .route("/api/devices/:id", get(handlers::devices::get_device))
        // WebSocket route
        .route("/api/ws", get(crate::ws_upgrade_handler))
        // Static files (renderer bundle)
        .nest_service("/assets", ServeDir::new(format!("{}/assets", frontend_dir)))
        .fallback_service(ServeDir::new(frontend_dir).fallback(
            tower_http::services::ServeFile::new(format!("{}/index.html", frontend_dir)),
        ))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
