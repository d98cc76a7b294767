//! Identity provider port.
//!
//! Verifies a credential minted by an external provider (a Google ID token)
//! and returns the profile it vouches for. Provisioning the matching `User`
//! is the login handler's job, not the provider's.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, VerifiedIdentity};

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// - `InvalidToken` / `TokenExpired` / `AudienceMismatch` for bad credentials
    /// - `ServiceUnavailable` if the provider cannot be reached
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, AuthError>;
}
