//! In-memory payment store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, HubId, PaymentId, UserId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.payments.read().await.len()
    }

    async fn matching(&self, pred: impl Fn(&Payment) -> bool) -> Vec<Payment> {
        let payments = self.payments.read().await;
        let mut found: Vec<Payment> = payments.values().filter(|p| pred(p)).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        found
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.id) {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Payment already exists: {}", payment.id),
            ));
        }
        payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<i64, DomainError> {
        let mut payments = self.payments.write().await;
        let stored = payments.get_mut(&payment.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::PaymentNotFound,
                format!("Payment not found: {}", payment.id),
            )
        })?;

        if stored.version != payment.version {
            return Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Payment {} was modified concurrently", payment.id),
            ));
        }

        let next = payment.version + 1;
        *stored = Payment {
            version: next,
            ..payment.clone()
        };
        Ok(next)
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        Ok(self.matching(|p| &p.user_id == user_id).await)
    }

    async fn find_by_hub(&self, hub_id: &HubId) -> Result<Vec<Payment>, DomainError> {
        Ok(self.matching(|p| &p.hub_id == hub_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::payment::{PaymentMethod, PaymentStatus};

    fn payment(user: &str, hub: HubId) -> Payment {
        Payment::initiate(
            UserId::new(user).unwrap(),
            hub,
            50.0,
            PaymentMethod::GooglePay,
            Timestamp::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lookups_by_user_and_hub() {
        let repo = InMemoryPaymentRepository::new();
        let hub_a = HubId::new();
        let hub_b = HubId::new();
        repo.save(&payment("an", hub_a)).await.unwrap();
        repo.save(&payment("an", hub_b)).await.unwrap();
        repo.save(&payment("binh", hub_a)).await.unwrap();

        assert_eq!(repo.find_by_user(&UserId::new("an").unwrap()).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_hub(&hub_a).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_hub(&HubId::new()).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn concurrent_status_writes_only_one_wins() {
        let repo = InMemoryPaymentRepository::new();
        let mut p = payment("an", HubId::new());
        repo.save(&p).await.unwrap();

        p.complete("txn".to_string(), Timestamp::now()).unwrap();
        let mut racing = p.clone();
        repo.update(&p).await.unwrap();

        racing.refund(Timestamp::now()).unwrap();
        let err = repo.update(&racing).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);

        let stored = repo.find_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Completed);
    }
}
