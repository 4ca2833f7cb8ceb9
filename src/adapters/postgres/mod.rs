//! PostgreSQL adapters.
//!
//! Runtime-checked `sqlx` queries against the schema in `migrations/`.

mod event_reader;
mod member_directory;
mod registration_repository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

pub use event_reader::PostgresEventReader;
pub use member_directory::PostgresMemberDirectory;
pub use registration_repository::PostgresRegistrationRepository;

/// Opens a connection pool sized and timed from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let timeouts = config.pool_timeouts();
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(timeouts.acquire)
        .idle_timeout(timeouts.idle)
        .max_lifetime(timeouts.max_lifetime)
        .connect(&config.url)
        .await
}
