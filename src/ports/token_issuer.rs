//! Session token issuance port.

use crate::domain::foundation::AuthError;
use crate::domain::user::User;

/// Mints the bearer token handed back from login.
///
/// Whatever an implementation issues, the configured
/// [`SessionValidator`](super::SessionValidator) must accept.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, AuthError>;
}
