//! Mock authentication adapters for testing.
//!
//! These adapters implement the auth ports without a real identity provider
//! or signing key.
//!
//! # Example
//!
//! ```ignore
//! use bhub::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let user = validator.validate("valid-token").await?;
//! assert_eq!(user.id.as_str(), "user-123");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, VerifiedIdentity};
use crate::domain::user::User;
use crate::ports::{IdentityProvider, SessionValidator, TokenIssuer};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ════════════════════════════════════════════════════════════════════════════
// Identity provider
// ════════════════════════════════════════════════════════════════════════════

/// Maps credentials to identities. Unknown credentials return `InvalidToken`.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    identities: Arc<RwLock<HashMap<String, VerifiedIdentity>>>,
    force_error: Arc<RwLock<Option<AuthError>>>,
    verify_calls: Arc<AtomicUsize>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(self, credential: impl Into<String>, identity: VerifiedIdentity) -> Self {
        write(&self.identities).insert(credential.into(), identity);
        self
    }

    /// Registers `credential` for a user with predictable profile fields.
    pub fn with_test_user(self, credential: impl Into<String>, subject: &str) -> Self {
        match UserId::new(subject) {
            Ok(id) => {
                let identity = VerifiedIdentity {
                    subject: id,
                    name: format!("Test User {}", subject),
                    email: format!("{}@test.example.com", subject),
                    photo_url: None,
                    email_verified: true,
                };
                self.with_identity(credential, identity)
            }
            Err(_) => self,
        }
    }

    /// Forces every verification to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *write(&self.force_error) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *write(&self.force_error) = None;
    }

    pub fn verify_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, AuthError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        read(&self.identities)
            .get(credential)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session validator
// ════════════════════════════════════════════════════════════════════════════

/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        write(&self.tokens).insert(token.into(), user);
        self
    }

    /// Adds a valid token with a simple test user.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => {
                let user = AuthenticatedUser::new(
                    id,
                    format!("{}@test.example.com", user_id),
                    Some(format!("Test User {}", user_id)),
                );
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }

    pub fn with_error(self, error: AuthError) -> Self {
        *write(&self.force_error) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *write(&self.force_error) = None;
    }

    pub fn token_count(&self) -> usize {
        read(&self.tokens).len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = read(&self.force_error).clone() {
            return Err(error);
        }

        read(&self.tokens)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Token issuer
// ════════════════════════════════════════════════════════════════════════════

/// Issues `token-for-{user_id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTokenIssuer;

impl MockTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for MockTokenIssuer {
    fn issue(&self, user: &User) -> Result<String, AuthError> {
        Ok(format!("token-for-{}", user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "test@example.com",
            Some("Test User".to_string()),
        )
    }

    #[tokio::test]
    async fn provider_returns_registered_identity() {
        let provider = MockIdentityProvider::new().with_test_user("cred-1", "g-1");

        let identity = provider.verify("cred-1").await.unwrap();

        assert_eq!(identity.subject.as_str(), "g-1");
        assert_eq!(provider.verify_count(), 1);
    }

    #[tokio::test]
    async fn provider_rejects_unknown_credential() {
        let provider = MockIdentityProvider::new();
        assert!(matches!(
            provider.verify("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn provider_forced_error_can_be_cleared() {
        let provider = MockIdentityProvider::new()
            .with_test_user("cred", "g-2")
            .with_error(AuthError::service_unavailable("down"));

        assert!(provider.verify("cred").await.is_err());
        provider.clear_error();
        assert!(provider.verify("cred").await.is_ok());
    }

    #[tokio::test]
    async fn validator_returns_user_for_registered_token() {
        let validator = MockSessionValidator::new().with_user("valid-token", test_user());

        let user = validator.validate("valid-token").await.unwrap();
        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn validator_returns_invalid_token_for_unknown() {
        let validator = MockSessionValidator::new();
        assert!(matches!(
            validator.validate("unknown-token").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn validator_with_error_forces_error() {
        let validator = MockSessionValidator::new()
            .with_user("valid-token", test_user())
            .with_error(AuthError::service_unavailable("Test error"));

        assert!(matches!(
            validator.validate("valid-token").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn validator_token_count_tracks_tokens() {
        let validator = MockSessionValidator::new()
            .with_test_user("t1", "u1")
            .with_test_user("t2", "u2");

        assert_eq!(validator.token_count(), 2);
    }
}
