//! HTTP server initialization and routing

use axum::{routing::get, Router};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::config::AppConfig;
use crate::core::shared::state::AppState;
use crate::core::urls::ApiUrls;
use crate::security::create_cors_layer;

use super::{health_check, health_check_simple, shutdown_signal};

/// Every route of the service, without the CORS layer.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(ApiUrls::HEALTH_SIMPLE, get(health_check_simple))
        .route(ApiUrls::HEALTH, get(health_check))
        .merge(crate::tasks::configure_task_routes())
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_axum_server(app_state: Arc<AppState>, config: &AppConfig) -> std::io::Result<()> {
    let cors = create_cors_layer(config.cors_allowed_origins.clone());
    let app = build_router(app_state).layer(cors);

    let host: std::net::IpAddr = config.server.host.parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Invalid SERVER_HOST {}: {e}", config.server.host),
        )
    })?;
    let addr = SocketAddr::from((host, config.server.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(
                "Failed to bind to {}: {} - is another instance running?",
                addr, e
            );
            return Err(e);
        }
    };
    info!("Server is running on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)
}
