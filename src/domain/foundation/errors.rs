//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Coarse classification used by the boundary layer to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// Caller could not be authenticated.
    Unauthorized,
    /// A referenced user, hub or payment does not exist.
    NotFound,
    /// The request is valid but collides with current state.
    Conflict,
    /// Identity provider or payment gateway failed. Callers may retry.
    Upstream,
    /// Store read or write failed.
    Persistence,
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidCapacity,
    InvalidPrice,
    InvalidTimeSlot,
    InvalidAmount,
    UnsupportedPaymentMethod,

    // Not found errors
    UserNotFound,
    HubNotFound,
    PaymentNotFound,
    InvalidHost,
    InvalidUser,
    InvalidHub,

    // State errors
    InvalidStateTransition,
    HubNotOpen,
    HubFull,
    HubCancelled,
    AlreadyCancelled,
    ConcurrencyConflict,

    // Authorization errors
    Unauthorized,

    // Upstream errors
    PaymentGatewayError,
    IdentityProviderError,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Category this code falls into.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            ValidationFailed | EmptyField | OutOfRange | InvalidFormat | InvalidCapacity
            | InvalidPrice | InvalidTimeSlot | InvalidAmount | UnsupportedPaymentMethod => {
                ErrorKind::Validation
            }
            UserNotFound | HubNotFound | PaymentNotFound | InvalidHost | InvalidUser
            | InvalidHub => ErrorKind::NotFound,
            InvalidStateTransition | HubNotOpen | HubFull | HubCancelled | AlreadyCancelled
            | ConcurrencyConflict => ErrorKind::Conflict,
            Unauthorized => ErrorKind::Unauthorized,
            PaymentGatewayError | IdentityProviderError => ErrorKind::Upstream,
            DatabaseError => ErrorKind::Persistence,
            InternalError => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidCapacity => "INVALID_CAPACITY",
            ErrorCode::InvalidPrice => "INVALID_PRICE",
            ErrorCode::InvalidTimeSlot => "INVALID_TIME_SLOT",
            ErrorCode::InvalidAmount => "INVALID_AMOUNT",
            ErrorCode::UnsupportedPaymentMethod => "UNSUPPORTED_PAYMENT_METHOD",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::HubNotFound => "HUB_NOT_FOUND",
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::InvalidHost => "INVALID_HOST",
            ErrorCode::InvalidUser => "INVALID_USER",
            ErrorCode::InvalidHub => "INVALID_HUB",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::HubNotOpen => "HUB_NOT_OPEN",
            ErrorCode::HubFull => "HUB_FULL",
            ErrorCode::HubCancelled => "HUB_CANCELLED",
            ErrorCode::AlreadyCancelled => "ALREADY_CANCELLED",
            ErrorCode::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::PaymentGatewayError => "PAYMENT_GATEWAY_ERROR",
            ErrorCode::IdentityProviderError => "IDENTITY_PROVIDER_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// Ports return this; module errors wrap it so the code survives the trip
/// up to the HTTP layer.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Store failure. Treated as transient and retried once by the handlers.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn is_transient(&self) -> bool {
        self.code == ErrorCode::DatabaseError
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_out_of_range_displays_bounds() {
        let err = ValidationError::out_of_range("max_members", 1, 100, 0);
        assert_eq!(
            err.to_string(),
            "Field 'max_members' must be between 1 and 100, got 0"
        );
        assert_eq!(err.field(), "max_members");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::HubNotFound, "Hub not found");
        assert_eq!(err.to_string(), "[HUB_NOT_FOUND] Hub not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("location").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.details.get("field"), Some(&"location".to_string()));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn only_database_errors_are_transient() {
        assert!(DomainError::database("connection reset").is_transient());
        assert!(!DomainError::new(ErrorCode::ConcurrencyConflict, "stale").is_transient());
    }

    #[test]
    fn codes_map_to_expected_kinds() {
        assert_eq!(ErrorCode::InvalidCapacity.kind(), ErrorKind::Validation);
        assert_eq!(ErrorCode::InvalidHost.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::HubFull.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::HubNotOpen.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::PaymentGatewayError.kind(), ErrorKind::Upstream);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Persistence);
    }
}
