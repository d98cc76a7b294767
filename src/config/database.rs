//! PostgreSQL pool settings.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// Without a `url` the service runs on in-memory stores.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Apply `migrations/` before serving
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// The connection URL, if one is set and non-blank.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let postgres = |u: &str| u.starts_with("postgres://") || u.starts_with("postgresql://");
        match self.url() {
            Some(url) if !postgres(url) => Err(ValidationError::InvalidDatabaseUrl),
            _ if self.min_connections > self.max_connections => {
                Err(ValidationError::InvalidPoolSize)
            }
            _ if self.max_connections > MAX_POOL_SIZE => Err(ValidationError::PoolSizeTooLarge),
            _ => Ok(()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            min_connections: 2,
            max_connections: 10,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            run_migrations: false,
        }
    }
}
