//! Payment ledger errors.

use thiserror::Error;

use super::PaymentStatus;
use crate::domain::foundation::{
    DomainError, ErrorCode, ErrorKind, HubId, PaymentId, UserId, ValidationError,
};
use crate::domain::hub::HubError;

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("User {0} does not exist")]
    InvalidUser(UserId),

    #[error("Hub {0} does not exist")]
    InvalidHub(HubId),

    #[error("Hub {0} not found")]
    HubNotFound(HubId),

    #[error("Payment {0} not found")]
    PaymentNotFound(PaymentId),

    #[error("Unsupported payment method '{0}'")]
    UnsupportedMethod(String),

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Hub {0} is cancelled and no longer accepts payments")]
    HubCancelled(HubId),

    #[error("Payment cannot move from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// Gateway declined or could not be reached. The reason stays server-side.
    #[error("Payment gateway error: {reason}")]
    Gateway { payment_id: PaymentId, reason: String },

    #[error("Payment {0} was modified concurrently")]
    ConcurrencyConflict(PaymentId),

    #[error(transparent)]
    Hub(#[from] HubError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] DomainError),
}

impl LedgerError {
    pub fn gateway(payment_id: PaymentId, reason: impl Into<String>) -> Self {
        LedgerError::Gateway {
            payment_id,
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::InvalidUser(_) => ErrorCode::InvalidUser,
            LedgerError::InvalidHub(_) => ErrorCode::InvalidHub,
            LedgerError::HubNotFound(_) => ErrorCode::HubNotFound,
            LedgerError::PaymentNotFound(_) => ErrorCode::PaymentNotFound,
            LedgerError::UnsupportedMethod(_) => ErrorCode::UnsupportedPaymentMethod,
            LedgerError::InvalidAmount => ErrorCode::InvalidAmount,
            LedgerError::HubCancelled(_) => ErrorCode::HubCancelled,
            LedgerError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            LedgerError::Gateway { .. } => ErrorCode::PaymentGatewayError,
            LedgerError::ConcurrencyConflict(_) => ErrorCode::ConcurrencyConflict,
            LedgerError::Hub(err) => err.code(),
            LedgerError::Validation(_) => ErrorCode::ValidationFailed,
            LedgerError::Store(err) => err.code,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            LedgerError::UnsupportedMethod(_) => Some("payment_method"),
            LedgerError::InvalidAmount => Some("amount"),
            LedgerError::Validation(err) => Some(err.field()),
            LedgerError::Hub(err) => err.field(),
            _ => None,
        }
    }

    /// True for failures a caller can reasonably retry unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Upstream | ErrorKind::Persistence
        ) || self.code() == ErrorCode::ConcurrencyConflict
    }
}
