//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid listen address")]
    InvalidAddress,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("A database URL is required in production")]
    DatabaseRequiredInProduction,

    #[error("Token secret must be at least {0} characters")]
    WeakTokenSecret(usize),

    #[error("Token lifetime must be between 60 seconds and 30 days")]
    InvalidTokenTtl,

    #[error("The mock payment gateway cannot be used in production")]
    MockGatewayInProduction,

    #[error("Invalid payment gateway URL")]
    InvalidGatewayUrl,

    #[error("Payment gateway URL must use HTTPS in production")]
    GatewayMustBeHttps,
}
