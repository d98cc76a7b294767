//! Authentication configuration (Google sign-in and session tokens)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::DEFAULT_TOKENINFO_URL;

/// Shortest token secret accepted outside development.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OAuth client id that Google ID tokens must be issued for
    #[serde(default)]
    pub google_client_id: String,

    /// HS256 secret for session tokens
    pub token_secret: Option<SecretString>,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,

    /// Timeout for calls to the identity provider
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AuthConfig {
    /// Configured secret, or a random per-process one.
    ///
    /// Tokens signed with the random secret stop validating on restart.
    pub fn token_secret_or_ephemeral(&self) -> SecretString {
        match &self.token_secret {
            Some(secret) if !secret.expose_secret().is_empty() => secret.clone(),
            _ => SecretString::new(format!(
                "{}{}",
                uuid::Uuid::new_v4().simple(),
                uuid::Uuid::new_v4().simple()
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self, env: &Environment) -> Result<(), ValidationError> {
        if !(60..=30 * 24 * 3600).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }

        if *env == Environment::Production {
            if self.google_client_id.trim().is_empty() {
                return Err(ValidationError::MissingRequired("auth.google_client_id"));
            }
            let secret_len = self
                .token_secret
                .as_ref()
                .map(|s| s.expose_secret().len())
                .unwrap_or(0);
            if secret_len < MIN_TOKEN_SECRET_LEN {
                return Err(ValidationError::WeakTokenSecret(MIN_TOKEN_SECRET_LEN));
            }
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: String::new(),
            token_secret: None,
            token_ttl_secs: default_token_ttl(),
            tokeninfo_url: default_tokeninfo_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24 * 3600
}

fn default_tokeninfo_url() -> String {
    DEFAULT_TOKENINFO_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production_config() -> AuthConfig {
        AuthConfig {
            google_client_id: "123.apps.googleusercontent.com".to_string(),
            token_secret: Some(SecretString::new("x".repeat(MIN_TOKEN_SECRET_LEN))),
            ..Default::default()
        }
    }

    #[test]
    fn test_development_accepts_defaults() {
        assert!(AuthConfig::default()
            .validate(&Environment::Development)
            .is_ok());
    }

    #[test]
    fn test_production_requires_strong_secret() {
        let mut config = production_config();
        assert!(config.validate(&Environment::Production).is_ok());

        config.token_secret = Some(SecretString::new("short".to_string()));
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakTokenSecret(MIN_TOKEN_SECRET_LEN))
        );

        config.token_secret = None;
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_production_requires_client_id() {
        let config = AuthConfig {
            google_client_id: " ".to_string(),
            ..production_config()
        };
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::MissingRequired("auth.google_client_id"))
        );
    }

    #[test]
    fn test_token_ttl_bounds() {
        let config = AuthConfig {
            token_ttl_secs: 5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTokenTtl)
        );
    }

    #[test]
    fn test_ephemeral_secret_when_unset() {
        let config = AuthConfig::default();
        let a = config.token_secret_or_ephemeral();
        let b = config.token_secret_or_ephemeral();
        assert_eq!(a.expose_secret().len(), 64);
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_configured_secret_is_used() {
        let config = production_config();
        assert_eq!(
            config.token_secret_or_ephemeral().expose_secret(),
            &"x".repeat(MIN_TOKEN_SECRET_LEN)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", production_config());
        assert!(!output.contains(&"x".repeat(MIN_TOKEN_SECRET_LEN)));
    }
}
