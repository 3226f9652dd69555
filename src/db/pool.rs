use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use super::executor::PgExecutor;
use crate::config::DatabaseConfig;
use crate::metrics::Metrics;

// ============================================================================
// Connection Pool
// ============================================================================
//
// Explicitly constructed at startup and handed to whoever needs it; there is
// no process-wide pool. Connections are opened lazily, so the process starts
// even when the database is down and requests fail one by one instead.
//
// ============================================================================

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn init(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let options: PgConnectOptions = config.url().parse()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(options);

        tracing::info!(
            max_connections = config.max_connections,
            acquire_timeout_secs = config.acquire_timeout_secs,
            "Database pool created"
        );

        Ok(Self { pool })
    }

    /// Liveness probe. Logs the outcome and never fails the caller.
    pub async fn probe(&self) -> bool {
        match sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
            .fetch_one(&self.pool)
            .await
        {
            Ok(now) => {
                tracing::info!(server_time = %now, "Database connected");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error connecting to database");
                false
            }
        }
    }

    pub fn executor(&self, metrics: Arc<Metrics>) -> PgExecutor {
        PgExecutor::new(self.pool.clone(), metrics)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for leased connections to come back, then close them all
    pub async fn shutdown(&self) {
        tracing::info!(open_connections = self.pool.size(), "Closing database pool");
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
