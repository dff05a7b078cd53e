//! PostgreSQL connection pool management

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Schema compiled into the binary; every statement is idempotent
const SCHEMA: &str = include_str!("../../migrations/0001_create_chat_entries.sql");

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// Maximum idle time before a connection is closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl PoolConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl From<&parlor_common::DatabaseConfig> for PoolConfig {
    fn from(config: &parlor_common::DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            min_connections: config.min_connections.min(config.max_connections),
            ..Self::new(config.url.clone())
        }
    }
}

/// Failure while preparing the database for use
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[source] sqlx::Error),
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
        .connect(&config.url)
        .await
}

/// Create the chat tables if they do not exist yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), SetupError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(SetupError::Migrate)?;
    Ok(())
}
