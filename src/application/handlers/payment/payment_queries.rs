//! Payment lookups by id, by payer and by hub.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{HubId, PaymentId, UserId};
use crate::domain::payment::{LedgerError, Payment};
use crate::ports::PaymentRepository;

pub struct PaymentQueryHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl PaymentQueryHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn get(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        retry_transient("find_payment", || self.payments.find_by_id(&id))
            .await?
            .ok_or(LedgerError::PaymentNotFound(id))
    }

    /// All payments made by `user_id`, oldest first. Empty when none.
    pub async fn by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, LedgerError> {
        Ok(retry_transient("find_payments_by_user", || self.payments.find_by_user(user_id)).await?)
    }

    pub async fn by_hub(&self, hub_id: &HubId) -> Result<Vec<Payment>, LedgerError> {
        Ok(retry_transient("find_payments_by_hub", || self.payments.find_by_hub(hub_id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::PaymentMethod;

    #[tokio::test]
    async fn get_returns_payment_or_not_found() {
        let repo = InMemoryPaymentRepository::new();
        let payment = Payment::initiate(
            UserId::new("an").unwrap(),
            HubId::new(),
            40.0,
            PaymentMethod::GooglePay,
            Timestamp::now(),
        )
        .unwrap();
        repo.save(&payment).await.unwrap();
        let queries = PaymentQueryHandler::new(Arc::new(repo));

        assert_eq!(queries.get(payment.id).await.unwrap().id, payment.id);
        assert!(matches!(
            queries.get(PaymentId::new()).await,
            Err(LedgerError::PaymentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn listings_are_empty_for_unknown_keys() {
        let queries = PaymentQueryHandler::new(Arc::new(InMemoryPaymentRepository::new()));
        assert!(queries.by_user(&UserId::new("nobody").unwrap()).await.unwrap().is_empty());
        assert!(queries.by_hub(&HubId::new()).await.unwrap().is_empty());
    }
}
