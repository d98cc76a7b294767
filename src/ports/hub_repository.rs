//! Hub repository port.
//!
//! Membership admission and cancellation both follow load, mutate, then
//! `update`. Serialization comes from `update` being a compare-and-set on
//! `Hub::version`, so a write based on a stale read is refused instead of
//! silently overwriting a concurrent change.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HubId, Timestamp};
use crate::domain::hub::Hub;

#[async_trait]
pub trait HubRepository: Send + Sync {
    /// Stores a newly created hub.
    async fn save(&self, hub: &Hub) -> Result<(), DomainError>;

    /// Writes `hub` if the stored version still equals `hub.version`.
    ///
    /// Returns the new version (`hub.version + 1`).
    ///
    /// # Errors
    ///
    /// - `HubNotFound` if no hub has this id
    /// - `ConcurrencyConflict` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, hub: &Hub) -> Result<i64, DomainError>;

    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError>;

    /// Hubs with status `open` whose time slot is at or after `now`.
    async fn list_open(&self, now: Timestamp) -> Result<Vec<Hub>, DomainError>;

    /// Open hubs whose time slot falls in `[now, until]`.
    async fn list_upcoming(&self, now: Timestamp, until: Timestamp)
        -> Result<Vec<Hub>, DomainError>;
}
