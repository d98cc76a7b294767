//! Session validation port.
//!
//! HTTP middleware calls this for every bearer-protected route. Implementations
//! must check signature and expiry and map failures onto `AuthError`:
//!
//! - `InvalidToken` for malformed tokens or bad signatures
//! - `TokenExpired` for expired tokens
//! - `ServiceUnavailable` for transient failures

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates a raw token (no "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn _accepts_dyn(_validator: &dyn SessionValidator) {}
}
