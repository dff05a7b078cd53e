//! # parlor-db
//!
//! Persistence layer implementing the `MessageStore` contract.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgMessageStore` (PostgreSQL) and `MemoryMessageStore` (in-process)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use parlor_core::{MessageStore, SnowflakeGenerator};
//! use parlor_db::{create_pool, run_migrations, PgMessageStore, PoolConfig};
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url)).await?;
//!     run_migrations(&pool).await?;
//!     let store = PgMessageStore::new(pool, Arc::new(SnowflakeGenerator::new(1)));
//!
//!     let entry = store.append("hello", "Alice").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

use std::sync::Arc;

use parlor_common::AppConfig;
use parlor_core::{MessageStore, SnowflakeGenerator};
use tracing::{info, warn};

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, SetupError, PgPool, PoolConfig};
pub use repositories::{MemoryMessageStore, PgMessageStore};

/// Pick the message store described by `config`.
///
/// With a database configured this connects, applies migrations and returns a
/// [`PgMessageStore`]; otherwise history lives in a [`MemoryMessageStore`]
/// for the lifetime of the process. `node_id` must be unique among the
/// servers appending to one database.
pub async fn connect_store(
    config: &AppConfig,
    node_id: u16,
) -> Result<Arc<dyn MessageStore>, SetupError> {
    let ids = Arc::new(SnowflakeGenerator::new(node_id));

    match &config.database {
        Some(db) => {
            let pool = create_pool(&PoolConfig::from(db)).await?;
            run_migrations(&pool).await?;
            info!(max_connections = db.max_connections, "Using PostgreSQL message store");
            Ok(Arc::new(PgMessageStore::new(pool, ids)))
        }
        None => {
            warn!("DATABASE_URL not set; chat history is kept in memory only");
            Ok(Arc::new(MemoryMessageStore::new(ids)))
        }
    }
}
