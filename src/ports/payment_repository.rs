//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HubId, PaymentId, UserId};
use crate::domain::payment::Payment;

/// Persistence for ledger entries.
///
/// `update` has the same compare-and-set contract as
/// [`HubRepository::update`](super::HubRepository::update), so a payment
/// cannot be refunded twice by overlapping refund runs.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Writes `payment` if the stored version equals `payment.version`.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if no payment has this id
    /// - `ConcurrencyConflict` if the stored version moved on
    async fn update(&self, payment: &Payment) -> Result<i64, DomainError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError>;

    async fn find_by_hub(&self, hub_id: &HubId) -> Result<Vec<Payment>, DomainError>;
}
