//! Connection pool management.
//!
//! The pool is created lazily: no connection is opened at startup, so the
//! server comes up even when PostgreSQL is unreachable and each tool call
//! reports the failure on its own.

use crate::config::PoolSettings;
use crate::db::executor::PgExecutor;
use crate::error::{DbError, DbResult};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::info;

/// Build the pool options for the given settings.
pub fn pool_options(settings: &PoolSettings) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(0)
        .acquire_timeout(settings.connect_timeout)
        .idle_timeout(Some(settings.idle_timeout))
        .max_lifetime(Some(settings.max_lifetime))
}

/// Create the lazily-connecting pool.
///
/// Must be called from within a Tokio runtime.
pub fn create_pool(options: PgConnectOptions, settings: &PoolSettings) -> DbResult<PgPool> {
    settings.validate().map_err(DbError::invalid_input)?;

    info!(
        max_connections = settings.max_connections,
        idle_timeout_secs = settings.idle_timeout.as_secs(),
        connect_timeout_ms = settings.connect_timeout.as_millis() as u64,
        max_lifetime_secs = settings.max_lifetime.as_secs(),
        "Creating PostgreSQL connection pool"
    );

    Ok(pool_options(settings).connect_lazy_with(options))
}

/// Create the pool and wrap it as a statement executor.
pub fn create_executor(options: PgConnectOptions, settings: &PoolSettings) -> DbResult<PgExecutor> {
    create_pool(options, settings).map(PgExecutor::new)
}
