//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the `BHUB` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use bhub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::{AuthConfig, MIN_TOKEN_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::{GatewayKind, PaymentConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
///
/// Every section has defaults, so an empty environment yields a working
/// development setup on in-memory stores and the mock gateway.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; in-memory stores when absent
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Google sign-in and session tokens
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `BHUB` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `BHUB__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BHUB__DATABASE__URL=...` -> `database.url = ...`
    /// - `BHUB__PAYMENT__GATEWAY=http` -> `payment.gateway = http`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BHUB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate every section, including production-only requirements.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let env = self.server.environment;
        self.server.validate()?;
        self.database.validate()?;
        if env == Environment::Production && self.database.url().is_none() {
            return Err(ValidationError::DatabaseRequiredInProduction);
        }
        self.auth.validate(&env)?;
        self.payment.validate(&env)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
