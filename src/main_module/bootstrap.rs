//! Store selection at startup

use log::{info, warn};
use std::sync::Arc;

use crate::core::config::AppConfig;
use crate::core::shared::utils::{create_conn, redact_database_url, run_migrations};
use crate::tasks::{MemoryTaskStore, PgTaskStore, TaskStore};

/// PostgreSQL when `DATABASE_URL` is configured, otherwise an in-memory
/// collection.
pub fn build_task_store(config: &AppConfig) -> Result<Arc<dyn TaskStore>, anyhow::Error> {
    let Some(database) = &config.database else {
        warn!("DATABASE_URL not set, tasks are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryTaskStore::new()));
    };

    info!(
        "Connecting to {} (pool size {})",
        redact_database_url(&database.url),
        database.pool_size
    );
    let pool = create_conn(&database.url, database.pool_size)
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {e}"))?;
    run_migrations(&pool).map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
    info!("Database migrations applied");

    Ok(Arc::new(PgTaskStore::new(pool)))
}
