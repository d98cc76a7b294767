//! Listener, logging and CORS settings.

use serde::Deserialize;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Longest request timeout accepted, in seconds.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Comma-separated allow list. Empty means any origin.
    pub cors_origins: Option<String>,
}

/// Deployment tier. Production turns on JSON logs and the strict checks.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        })
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAddress)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,bhub=debug,sqlx=warn".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(server.request_timeout(), Duration::from_secs(30));
        assert!(!server.is_production());
        assert!(server.validate().is_ok());
    }

    #[test]
    fn hostnames_are_not_addresses() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert_eq!(server.validate(), Err(ValidationError::InvalidAddress));
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let server = ServerConfig {
            cors_origins: Some(" https://bhub.vn ,,http://localhost:5173".to_string()),
            ..Default::default()
        };
        assert_eq!(
            server.cors_origins_list(),
            vec!["https://bhub.vn", "http://localhost:5173"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn port_zero_is_rejected() {
        let server = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(server.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn timeout_must_be_within_five_minutes() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let server = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(server.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn environment_parses_lowercase() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
        assert_eq!(env.to_string(), "production");
    }
}
