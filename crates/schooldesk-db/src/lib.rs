//! # SchoolDesk DB
//!
//! Record stores for the SchoolDesk API plus Postgres pool setup and
//! migrations.
//!
//! - [`store`]: the `UserStore`, `StudentStore`, `FeesStore` and
//!   `LibraryStore` traits
//! - [`postgres`]: [`PgStore`], backed by a `PgPool`
//! - [`memory`]: [`MemoryStore`], an in-process implementation

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

use schooldesk_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{FeesStore, LibraryStore, StudentStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a Postgres pool sized by `config.max_connections`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the SQL migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
