//! Database configuration
//!
//! The whole section is optional. Without it the service runs on the
//! in-memory adapters.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL connection and pool settings.
///
/// Any field left out of the environment takes its value from
/// [`DatabaseConfig::default`], except `url`, which validation requires.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Apply `migrations/` on startup
    pub run_migrations: bool,
}

/// Pool timeouts, ready for `PgPoolOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolTimeouts {
    pub acquire: Duration,
    pub idle: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn pool_timeouts(&self) -> PoolTimeouts {
        PoolTimeouts {
            acquire: Duration::from_secs(self.acquire_timeout_secs),
            idle: Duration::from_secs(self.idle_timeout_secs),
            max_lifetime: Duration::from_secs(self.max_lifetime_secs),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.url.split_once("://") {
            None if self.url.trim().is_empty() => {
                return Err(ValidationError::MissingRequired("database.url"))
            }
            Some(("postgres" | "postgresql", rest)) if !rest.is_empty() => {}
            _ => return Err(ValidationError::InvalidDatabaseUrl),
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            run_migrations: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn url_is_required() {
        assert!(matches!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired("database.url"))
        ));
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        for url in ["mysql://localhost/club", "postgres://", "localhost:5432"] {
            assert!(
                matches!(with_url(url).validate(), Err(ValidationError::InvalidDatabaseUrl)),
                "{}",
                url
            );
        }
        assert!(with_url("postgresql://club@db/club_events").validate().is_ok());
    }

    #[test]
    fn pool_bounds_are_checked() {
        let inverted = DatabaseConfig {
            min_connections: 6,
            max_connections: 4,
            ..with_url("postgres://localhost/club_events")
        };
        assert!(matches!(inverted.validate(), Err(ValidationError::InvalidPoolSize)));

        let oversized = DatabaseConfig {
            max_connections: MAX_POOL_SIZE + 1,
            ..with_url("postgres://localhost/club_events")
        };
        assert!(matches!(oversized.validate(), Err(ValidationError::PoolSizeTooLarge)));
    }

    #[test]
    fn timeouts_convert_to_durations() {
        let config = DatabaseConfig {
            acquire_timeout_secs: 5,
            max_lifetime_secs: 900,
            ..Default::default()
        };
        let timeouts = config.pool_timeouts();

        assert_eq!(timeouts.acquire, Duration::from_secs(5));
        assert_eq!(timeouts.idle, Duration::from_secs(600));
        assert_eq!(timeouts.max_lifetime, Duration::from_secs(900));
    }
}
