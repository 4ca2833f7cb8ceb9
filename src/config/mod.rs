//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLUB_EVENTS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use club_events::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod registration;
mod server;

pub use database::{DatabaseConfig, PoolTimeouts};
pub use error::{ConfigError, ValidationError};
pub use registration::RegistrationConfig;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; absent means in-memory storage
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Registration policy
    #[serde(default)]
    pub registration: RegistrationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `CLUB_EVENTS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLUB_EVENTS__DATABASE__URL=...` -> `database.url = ...`
    /// - `CLUB_EVENTS__REGISTRATION__FULL_REFUND_THRESHOLD_HOURS=72`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLUB_EVENTS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.registration.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
