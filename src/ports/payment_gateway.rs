//! Payment gateway port.
//!
//! The gateway moves real money. The ledger only needs two capabilities:
//! capture a charge and return it. Both either succeed with a gateway
//! transaction reference or fail with a [`GatewayError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HubId, PaymentId, UserId};
use crate::domain::payment::PaymentMethod;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayReceipt, GatewayError>;

    async fn refund(&self, request: &RefundRequest) -> Result<GatewayReceipt, GatewayError>;
}

/// Capture request. `payment_id` doubles as the idempotency reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeRequest {
    pub payment_id: PaymentId,
    pub user_id: UserId,
    pub hub_id: HubId,
    pub amount: f64,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundRequest {
    pub payment_id: PaymentId,
    pub transaction_id: Option<String>,
    pub amount: f64,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReceipt {
    pub transaction_id: String,
}

/// Gateway failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub code: GatewayErrorCode,
    pub message: String,
    /// Gateway's own error code, if it sent one.
    pub provider_code: Option<String>,
    pub retryable: bool,
}

impl GatewayError {
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    pub fn declined(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Declined, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    NetworkError,
    /// Gateway refused the charge or refund.
    Declined,
    AuthenticationError,
    /// Response missing fields or failing signature verification.
    InvalidResponse,
    Unavailable,
}

impl GatewayErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError | GatewayErrorCode::Unavailable
        )
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::Declined => "declined",
            GatewayErrorCode::AuthenticationError => "authentication_error",
            GatewayErrorCode::InvalidResponse => "invalid_response",
            GatewayErrorCode::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}
