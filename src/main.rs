use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use taskboard::core::config::AppConfig;
use taskboard::core::shared::state::AppState;
use taskboard::{build_task_store, run_axum_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting {} v{} on port {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.server.port
    );

    let store = build_task_store(&config).inspect_err(|e| error!("Startup failed: {e:#}"))?;
    info!("Using {} task store", store.kind());

    let app_state = Arc::new(AppState::new(store));
    run_axum_server(app_state, &config).await?;

    info!("Server stopped");
    Ok(())
}
