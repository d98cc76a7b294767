//! ProcessRefundHandler - refund every completed payment of a hub, then cancel it.
//!
//! The operation spans many payment rows and one hub row without a shared
//! transaction. It is instead resumable: remaining work is always re-derived
//! from payment status, so running it again after a crash or a partial
//! gateway failure picks up exactly the payments still `completed`. Each
//! payment write and the hub cancellation are compare-and-set, so overlapping
//! runs cannot refund a payment twice in the ledger or cancel the hub twice.
//!
//! A charge can complete while a run is in progress. After the cancellation
//! lands the run lists the hub's payments once more and refunds any completed
//! row it did not see the first time. A charge that completes after that
//! listing observes the cancelled hub and refunds itself.
//!
//! The gateway receives the payment id as its idempotency reference for the
//! window between a successful gateway refund and the ledger write.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{ErrorCode, HubId, PaymentId, Timestamp};
use crate::domain::hub::{Hub, HubError};
use crate::domain::payment::{LedgerError, Payment, PaymentStatus};
use crate::ports::{HubRepository, PaymentGateway, PaymentRepository, RefundRequest};

#[derive(Debug, Clone)]
pub struct ProcessRefundCommand {
    pub hub_id: HubId,
}

/// Per-run tally. `failed` payments stay `completed` and are retried by the
/// next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefundSummary {
    pub hub_id: HubId,
    pub refunded: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The hub was already cancelled before this run.
    pub already_cancelled: bool,
}

enum RefundOutcome {
    Refunded,
    Skipped,
    Failed,
}

pub struct ProcessRefundHandler {
    hubs: Arc<dyn HubRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl ProcessRefundHandler {
    pub fn new(
        hubs: Arc<dyn HubRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            hubs,
            payments,
            gateway,
        }
    }

    pub async fn handle(&self, cmd: ProcessRefundCommand) -> Result<RefundSummary, LedgerError> {
        // 1. Hub must exist
        let hub = self.load_hub(&cmd.hub_id).await?;

        // 2. Refund whatever is still completed
        let payments =
            retry_transient("find_payments_by_hub", || self.payments.find_by_hub(&cmd.hub_id))
                .await?;

        let mut summary = RefundSummary {
            hub_id: cmd.hub_id,
            refunded: 0,
            skipped: 0,
            failed: 0,
            already_cancelled: false,
        };

        // Pending rows are skipped now but may complete before step 4
        let pending: HashSet<PaymentId> = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Pending)
            .map(|p| p.id)
            .collect();
        let listed: HashSet<PaymentId> = payments.iter().map(|p| p.id).collect();
        for payment in payments {
            match self.refund_one(payment).await {
                RefundOutcome::Refunded => summary.refunded += 1,
                RefundOutcome::Skipped => summary.skipped += 1,
                RefundOutcome::Failed => summary.failed += 1,
            }
        }

        // 3. Cancel the hub, at most once
        summary.already_cancelled = self.cancel_hub(hub).await?;

        // 4. Charges that completed while steps 2 and 3 ran
        let late: Vec<Payment> =
            retry_transient("find_payments_by_hub", || self.payments.find_by_hub(&cmd.hub_id))
                .await?
                .into_iter()
                .filter(|p| {
                    p.is_refundable() && (pending.contains(&p.id) || !listed.contains(&p.id))
                })
                .collect();
        for payment in late {
            let counted_as_skipped = pending.contains(&payment.id);
            let outcome = self.refund_one(payment).await;
            if counted_as_skipped && !matches!(outcome, RefundOutcome::Skipped) {
                summary.skipped -= 1;
            }
            match outcome {
                RefundOutcome::Refunded => summary.refunded += 1,
                RefundOutcome::Skipped => {}
                RefundOutcome::Failed => summary.failed += 1,
            }
        }

        tracing::info!(
            hub_id = %cmd.hub_id,
            refunded = summary.refunded,
            skipped = summary.skipped,
            failed = summary.failed,
            already_cancelled = summary.already_cancelled,
            "Refund run finished"
        );

        Ok(summary)
    }

    async fn load_hub(&self, id: &HubId) -> Result<Hub, LedgerError> {
        retry_transient("find_hub", || self.hubs.find_by_id(id))
            .await?
            .ok_or(LedgerError::HubNotFound(*id))
    }

    async fn refund_one(&self, mut payment: Payment) -> RefundOutcome {
        if !payment.is_refundable() {
            return RefundOutcome::Skipped;
        }

        let request = RefundRequest {
            payment_id: payment.id,
            transaction_id: payment.transaction_id.clone(),
            amount: payment.amount,
            method: payment.payment_method,
        };

        if let Err(err) = self.gateway.refund(&request).await {
            tracing::warn!(
                payment_id = %payment.id,
                code = %err.code,
                retryable = err.retryable,
                "Gateway refund failed, payment stays completed"
            );
            return RefundOutcome::Failed;
        }

        if let Err(err) = payment.refund(Timestamp::now()) {
            tracing::error!(payment_id = %payment.id, error = %err, "Refund transition rejected");
            return RefundOutcome::Failed;
        }

        match self.payments.update(&payment).await {
            Ok(_) => RefundOutcome::Refunded,
            Err(err) if err.code == ErrorCode::ConcurrencyConflict => {
                // Someone else moved this payment; see where it ended up.
                match self.payments.find_by_id(&payment.id).await {
                    Ok(Some(current)) if current.status == PaymentStatus::Refunded => {
                        RefundOutcome::Skipped
                    }
                    _ => RefundOutcome::Failed,
                }
            }
            Err(err) => {
                tracing::error!(
                    payment_id = %payment.id,
                    error = %err,
                    "Gateway refunded but ledger update failed"
                );
                RefundOutcome::Failed
            }
        }
    }

    /// Returns whether the hub was already cancelled.
    ///
    /// Every lost race is a join that took a seat, so the retries end once the
    /// hub is full at the latest.
    async fn cancel_hub(&self, mut hub: Hub) -> Result<bool, LedgerError> {
        let mut attempt = 0usize;
        loop {
            attempt += 1;
            match hub.cancel(Timestamp::now()) {
                Ok(()) => {}
                Err(HubError::AlreadyCancelled(_)) => return Ok(true),
                Err(err) => return Err(err.into()),
            }

            match self.hubs.update(&hub).await {
                Ok(_) => {
                    tracing::info!(hub_id = %hub.id, "Hub cancelled");
                    return Ok(false);
                }
                Err(err) if err.code == ErrorCode::ConcurrencyConflict => {
                    tracing::debug!(hub_id = %hub.id, attempt, "Cancel lost a version race, reloading");
                    hub = self.load_hub(&hub.id).await?;
                }
                Err(err) => return Err(HubError::from_store(hub.id, err).into()),
            }
        }
    }
}
