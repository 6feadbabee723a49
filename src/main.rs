mod config;
mod handlers;
mod models;
mod router;
mod session;
mod telemetry;
mod topology;
mod ws;

use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use session::TopologySession;
use ws::Hub;

/// Application state shared across handlers
pub struct AppState {
    pub session: TopologySession,
    pub config: Config,
    pub ws_hub: Option<Arc<Hub>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may be set by the container
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netmap=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting NetMap Server");
    tracing::info!("Telemetry: {}", cfg.telemetry_source);
    tracing::info!("Orientation: {}", cfg.default_orientation.as_str());
    tracing::info!("Listen: {}", cfg.listen_addr);

    let source = telemetry::from_spec(&cfg.telemetry_source, cfg.telemetry_timeout_secs)?;

    // Initialize WebSocket hub
    let ws_hub = Arc::new(Hub::new());

    let session = TopologySession::new(
        source,
        cfg.layout,
        cfg.default_orientation,
        Some(ws_hub.clone()),
    );

    // Initial load; on failure the API reports the error until a refresh succeeds
    if let Err(e) = session.refresh().await {
        tracing::warn!("Initial topology load failed: {:#}", e);
    }

    // Create app state
    let state = Arc::new(AppState {
        session,
        config: cfg.clone(),
        ws_hub: Some(ws_hub),
    });

    // Build router
    let app = router::build(state, &cfg.frontend_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("NetMap listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("NetMap shutting down");
    Ok(())
}

/// WebSocket upgrade handler
pub async fn ws_upgrade_handler(
    ws: axum::extract::ws::WebSocketUpgrade,
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    if let Some(hub) = &state.ws_hub {
        ws::ws_handler(ws, axum::extract::State(hub.clone())).await
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
