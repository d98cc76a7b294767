//! Authentication types for the domain layer.
//!
//! Two shapes of identity flow through the system:
//!
//! - [`VerifiedIdentity`] is what the external identity provider vouches for
//!   when a user logs in with a provider credential (a Google ID token).
//! - [`AuthenticatedUser`] is what the session validator extracts from a bearer
//!   token on every later request.
//!
//! Neither type knows which provider produced it.

use super::UserId;
use thiserror::Error;

/// Profile claims returned by the identity provider for a valid credential.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    /// Stable subject identifier. Becomes the user's id.
    pub subject: UserId,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

/// Caller resolved from a validated bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the display name, falling back to email.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Authentication failures, described from the application's side.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Credential or token is missing, malformed, or has a bad signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Credential was issued for a different client.
    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("User not found")]
    UserNotFound,

    /// Provider unreachable or misconfigured.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken
                | AuthError::TokenExpired
                | AuthError::AudienceMismatch
                | AuthError::UserNotFound
        )
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
