//! Payment aggregate.
//!
//! One record per charge attempt. The record is written as `Pending` before
//! the gateway is called so every attempt leaves an auditable row, whatever
//! the gateway does.

use serde::{Deserialize, Serialize};

use super::{LedgerError, PaymentMethod, PaymentStatus};
use crate::domain::foundation::{HubId, PaymentId, StateMachine, Timestamp, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub hub_id: HubId,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Optimistic-concurrency counter managed by the store.
    #[serde(skip)]
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Records the intent to pay. Starts `Pending`.
    pub fn initiate(
        user_id: UserId,
        hub_id: HubId,
        amount: f64,
        payment_method: PaymentMethod,
        now: Timestamp,
    ) -> Result<Self, LedgerError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount);
        }

        Ok(Self {
            id: PaymentId::new(),
            user_id,
            hub_id,
            amount,
            payment_method,
            status: PaymentStatus::Pending,
            transaction_id: None,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gateway captured the money.
    pub fn complete(&mut self, transaction_id: String, now: Timestamp) -> Result<(), LedgerError> {
        self.move_to(PaymentStatus::Completed, now)?;
        self.transaction_id = Some(transaction_id);
        Ok(())
    }

    /// Gateway declined or errored.
    pub fn fail(&mut self, now: Timestamp) -> Result<(), LedgerError> {
        self.move_to(PaymentStatus::Failed, now)
    }

    /// Gateway returned the money. Only valid from `Completed`.
    pub fn refund(&mut self, now: Timestamp) -> Result<(), LedgerError> {
        self.move_to(PaymentStatus::Refunded, now)
    }

    pub fn is_refundable(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    fn move_to(&mut self, target: PaymentStatus, now: Timestamp) -> Result<(), LedgerError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| LedgerError::InvalidTransition {
                from: self.status,
                to: target,
            })?;
        self.updated_at = now;
        Ok(())
    }
}
