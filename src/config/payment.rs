//! Payment gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Which gateway adapter to wire in.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Always approves. Development and tests only.
    #[default]
    Mock,
    Http,
}

/// Payment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    #[serde(default)]
    pub gateway: GatewayKind,

    pub base_url: Option<String>,

    pub api_key: Option<SecretString>,

    /// HMAC-SHA512 key for request and response signatures
    pub signing_secret: Option<SecretString>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PaymentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self, env: &Environment) -> Result<(), ValidationError> {
        if *env == Environment::Production && self.gateway == GatewayKind::Mock {
            return Err(ValidationError::MockGatewayInProduction);
        }
        if self.gateway == GatewayKind::Mock {
            return Ok(());
        }

        let base_url = self
            .base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ValidationError::MissingRequired("payment.base_url"))?;
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if *env == Environment::Production && !base_url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        if !has_value(&self.api_key) {
            return Err(ValidationError::MissingRequired("payment.api_key"));
        }
        if !has_value(&self.signing_secret) {
            return Err(ValidationError::MissingRequired("payment.signing_secret"));
        }
        Ok(())
    }
}

fn has_value(secret: &Option<SecretString>) -> bool {
    secret
        .as_ref()
        .map(|s| !s.expose_secret().trim().is_empty())
        .unwrap_or(false)
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayKind::default(),
            base_url: None,
            api_key: None,
            signing_secret: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config() -> PaymentConfig {
        PaymentConfig {
            gateway: GatewayKind::Http,
            base_url: Some("https://sandbox.gateway.test".to_string()),
            api_key: Some(SecretString::new("key".to_string())),
            signing_secret: Some(SecretString::new("signing".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_mock_is_fine_in_development() {
        assert!(PaymentConfig::default()
            .validate(&Environment::Development)
            .is_ok());
    }

    #[test]
    fn test_mock_rejected_in_production() {
        assert_eq!(
            PaymentConfig::default().validate(&Environment::Production),
            Err(ValidationError::MockGatewayInProduction)
        );
    }

    #[test]
    fn test_http_gateway_requires_credentials() {
        assert!(http_config().validate(&Environment::Production).is_ok());

        let missing_key = PaymentConfig {
            api_key: None,
            ..http_config()
        };
        assert_eq!(
            missing_key.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("payment.api_key"))
        );

        let missing_secret = PaymentConfig {
            signing_secret: Some(SecretString::new(" ".to_string())),
            ..http_config()
        };
        assert_eq!(
            missing_secret.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("payment.signing_secret"))
        );
    }

    #[test]
    fn test_http_gateway_url_rules() {
        let plain = PaymentConfig {
            base_url: Some("http://localhost:9000".to_string()),
            ..http_config()
        };
        assert!(plain.validate(&Environment::Development).is_ok());
        assert_eq!(
            plain.validate(&Environment::Production),
            Err(ValidationError::GatewayMustBeHttps)
        );

        let bogus = PaymentConfig {
            base_url: Some("gateway.test".to_string()),
            ..http_config()
        };
        assert_eq!(
            bogus.validate(&Environment::Development),
            Err(ValidationError::InvalidGatewayUrl)
        );
    }
}
