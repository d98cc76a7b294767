//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Persistence for `User` records keyed by the identity provider's id.
///
/// # Contract
///
/// `insert_if_absent` must be atomic per id: when two first-time logins for
/// the same identity race, exactly one insert wins and the other observes
/// `Ok(false)`. No duplicate records, no error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts `user` unless a record with the same id exists.
    ///
    /// Returns `true` if this call created the record.
    async fn insert_if_absent(&self, user: &User) -> Result<bool, DomainError>;

    /// Overwrites profile fields and `updated_at` of an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no record exists
    /// - `DatabaseError` on persistence failure
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Lookup for callers that only hold an email address, such as support
    /// tooling. Login always resolves by id.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
