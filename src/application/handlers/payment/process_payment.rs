//! ProcessPaymentHandler - records a charge attempt and applies the gateway result.
//!
//! The `pending` row is written before the gateway is called, so every
//! attempt is auditable even when the gateway call or the follow-up write
//! fails.
//!
//! A refund run may cancel the hub while the charge is in flight. Once the
//! completed row is written the hub is read again, and a charge that landed on
//! a cancelled hub is handed back through the gateway before `HubCancelled` is
//! returned.

use std::sync::Arc;

use crate::application::handlers::retry::retry_transient;
use crate::domain::foundation::{ErrorCode, HubId, PaymentId, Timestamp, UserId};
use crate::domain::hub::HubStatus;
use crate::domain::payment::{LedgerError, Payment, PaymentMethod, PaymentStatus};
use crate::ports::{
    ChargeRequest, HubRepository, PaymentGateway, PaymentRepository, RefundRequest, UserRepository,
};

#[derive(Debug, Clone)]
pub struct ProcessPaymentCommand {
    pub user_id: UserId,
    pub hub_id: HubId,
    pub amount: f64,
    /// Raw method name as supplied by the caller.
    pub payment_method: String,
}

#[derive(Debug, Clone)]
pub struct ProcessPaymentResult {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    pub payment: Payment,
}

pub struct ProcessPaymentHandler {
    users: Arc<dyn UserRepository>,
    hubs: Arc<dyn HubRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl ProcessPaymentHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hubs: Arc<dyn HubRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            users,
            hubs,
            payments,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessPaymentCommand,
    ) -> Result<ProcessPaymentResult, LedgerError> {
        // 1. Resolve references
        let user = retry_transient("find_user", || self.users.find_by_id(&cmd.user_id)).await?;
        if user.is_none() {
            return Err(LedgerError::InvalidUser(cmd.user_id));
        }

        let hub = retry_transient("find_hub", || self.hubs.find_by_id(&cmd.hub_id))
            .await?
            .ok_or(LedgerError::InvalidHub(cmd.hub_id))?;

        let method: PaymentMethod = cmd.payment_method.parse()?;

        if hub.status == HubStatus::Cancelled {
            return Err(LedgerError::HubCancelled(hub.id));
        }

        // 2. Record intent
        let mut payment = Payment::initiate(
            cmd.user_id,
            cmd.hub_id,
            cmd.amount,
            method,
            Timestamp::now(),
        )?;
        self.payments.save(&payment).await?;

        // 3. Charge
        let charge = ChargeRequest {
            payment_id: payment.id,
            user_id: payment.user_id.clone(),
            hub_id: payment.hub_id,
            amount: payment.amount,
            method,
        };

        match self.gateway.charge(&charge).await {
            Ok(receipt) => {
                payment.complete(receipt.transaction_id, Timestamp::now())?;
                let version = self.payments.update(&payment).await.map_err(|err| {
                    tracing::error!(
                        payment_id = %payment.id,
                        transaction_id = ?payment.transaction_id,
                        error = %err,
                        "Charge captured but ledger update failed"
                    );
                    err
                })?;
                payment.version = version;

                // 4. The hub may have been cancelled while the charge ran
                let hub_now =
                    retry_transient("find_hub", || self.hubs.find_by_id(&payment.hub_id)).await?;
                if hub_now.is_some_and(|h| h.status == HubStatus::Cancelled) {
                    self.refund_late_charge(payment).await;
                    return Err(LedgerError::HubCancelled(cmd.hub_id));
                }

                tracing::info!(
                    payment_id = %payment.id,
                    hub_id = %payment.hub_id,
                    amount = payment.amount,
                    method = %method,
                    "Payment completed"
                );

                Ok(ProcessPaymentResult {
                    payment_id: payment.id,
                    status: payment.status,
                    payment,
                })
            }
            Err(gateway_err) => {
                tracing::warn!(
                    payment_id = %payment.id,
                    code = %gateway_err.code,
                    retryable = gateway_err.retryable,
                    "Charge failed"
                );

                payment.fail(Timestamp::now())?;
                if let Err(err) = self.payments.update(&payment).await {
                    tracing::error!(
                        payment_id = %payment.id,
                        error = %err,
                        "Could not mark payment failed, row stays pending"
                    );
                }

                Err(LedgerError::gateway(payment.id, gateway_err.to_string()))
            }
        }
    }

    /// Returns a charge captured for a hub that is now cancelled. Failures
    /// leave the row `completed`, where the next refund run picks it up.
    async fn refund_late_charge(&self, mut payment: Payment) {
        let request = RefundRequest {
            payment_id: payment.id,
            transaction_id: payment.transaction_id.clone(),
            amount: payment.amount,
            method: payment.payment_method,
        };

        if let Err(err) = self.gateway.refund(&request).await {
            tracing::error!(
                payment_id = %payment.id,
                hub_id = %payment.hub_id,
                code = %err.code,
                "Charge landed on a cancelled hub and could not be refunded"
            );
            return;
        }

        if let Err(err) = payment.refund(Timestamp::now()) {
            tracing::error!(payment_id = %payment.id, error = %err, "Refund transition rejected");
            return;
        }

        match self.payments.update(&payment).await {
            Ok(_) => tracing::info!(
                payment_id = %payment.id,
                hub_id = %payment.hub_id,
                "Charge on cancelled hub refunded"
            ),
            // A concurrent refund run got to this row first
            Err(err) if err.code == ErrorCode::ConcurrencyConflict => {}
            Err(err) => tracing::error!(
                payment_id = %payment.id,
                error = %err,
                "Gateway refunded but ledger update failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::MockPaymentGateway;
    use crate::adapters::memory::{
        InMemoryHubRepository, InMemoryPaymentRepository, InMemoryUserRepository,
    };
    use crate::domain::foundation::{ErrorKind, VerifiedIdentity};
    use crate::domain::hub::{Hub, HubParams};
    use crate::application::handlers::{ProcessRefundCommand, ProcessRefundHandler};
    use crate::domain::user::User;
    use crate::ports::{GatewayError, GatewayReceipt};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct Fixture {
        handler: ProcessPaymentHandler,
        users: InMemoryUserRepository,
        hubs: InMemoryHubRepository,
        payments: InMemoryPaymentRepository,
        gateway: MockPaymentGateway,
        hub_id: HubId,
    }

    async fn fixture() -> Fixture {
        let users = InMemoryUserRepository::new();
        for id in ["host", "payer"] {
            users
                .insert(User::provision(
                    &VerifiedIdentity {
                        subject: UserId::new(id).unwrap(),
                        name: id.to_string(),
                        email: format!("{}@example.com", id),
                        photo_url: None,
                        email_verified: true,
                    },
                    Timestamp::now(),
                ))
                .await;
        }
        let hubs = InMemoryHubRepository::new();
        let hub = Hub::create(
            HubParams {
                host_id: UserId::new("host").unwrap(),
                location: "Nam Tu Liem".to_string(),
                time_slot: Timestamp::now().plus_hours(24),
                min_members: 1,
                max_members: 2,
                price_total: 100.0,
            },
            Timestamp::now(),
        )
        .unwrap();
        hubs.save(&hub).await.unwrap();

        let payments = InMemoryPaymentRepository::new();
        let gateway = MockPaymentGateway::new();
        let handler = ProcessPaymentHandler::new(
            Arc::new(users.clone()),
            Arc::new(hubs.clone()),
            Arc::new(payments.clone()),
            Arc::new(gateway.clone()),
        );
        Fixture {
            handler,
            users,
            hubs,
            payments,
            gateway,
            hub_id: hub.id,
        }
    }

    fn pay(hub_id: HubId, user: &str, method: &str) -> ProcessPaymentCommand {
        ProcessPaymentCommand {
            user_id: UserId::new(user).unwrap(),
            hub_id,
            amount: 50.0,
            payment_method: method.to_string(),
        }
    }

    #[tokio::test]
    async fn successful_charge_completes_payment() {
        let f = fixture().await;
        let result = f.handler.handle(pay(f.hub_id, "payer", "vnpay")).await.unwrap();

        assert_eq!(result.status, PaymentStatus::Completed);
        let stored = f.payments.find_by_id(&result.payment_id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Completed);
        assert_eq!(stored.transaction_id.as_deref(), Some("mock_txn_1"));
    }

    #[tokio::test]
    async fn gateway_failure_leaves_failed_row_and_surfaces_upstream_error() {
        let f = fixture().await;
        f.gateway.fail_next_charge(GatewayError::declined("insufficient funds"));

        let err = f.handler.handle(pay(f.hub_id, "payer", "google_pay")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);

        let rows = f.payments.find_by_hub(&f.hub_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn unknown_user_and_hub_are_rejected_before_writing() {
        let f = fixture().await;
        let err = f.handler.handle(pay(f.hub_id, "nobody", "vnpay")).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidUser(_)));

        let err = f.handler.handle(pay(HubId::new(), "payer", "vnpay")).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidHub(_)));

        assert_eq!(f.payments.count().await, 0);
        assert!(f.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let f = fixture().await;
        let err = f.handler.handle(pay(f.hub_id, "payer", "paypal")).await.unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedMethod(ref m) if m == "paypal"));
        assert_eq!(f.payments.count().await, 0);
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected() {
        let f = fixture().await;
        let mut cmd = pay(f.hub_id, "payer", "vnpay");
        cmd.amount = -5.0;
        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount));
    }

    #[tokio::test]
    async fn cancelled_hub_takes_no_payments() {
        let f = fixture().await;
        let mut hub = f.hubs.find_by_id(&f.hub_id).await.unwrap().unwrap();
        hub.cancel(Timestamp::now()).unwrap();
        f.hubs.update(&hub).await.unwrap();

        let err = f.handler.handle(pay(f.hub_id, "payer", "vnpay")).await.unwrap_err();
        assert!(matches!(err, LedgerError::HubCancelled(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    /// Holds every charge until released, so other work can run while the
    /// gateway call is in flight.
    struct HeldGateway {
        inner: MockPaymentGateway,
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl PaymentGateway for HeldGateway {
        async fn charge(&self, request: &ChargeRequest) -> Result<GatewayReceipt, GatewayError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.charge(request).await
        }

        async fn refund(&self, request: &RefundRequest) -> Result<GatewayReceipt, GatewayError> {
            self.inner.refund(request).await
        }
    }

    #[tokio::test]
    async fn charge_that_lands_after_cancellation_is_refunded() {
        let f = fixture().await;
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let held = HeldGateway {
            inner: f.gateway.clone(),
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        };
        let handler = ProcessPaymentHandler::new(
            Arc::new(f.users.clone()),
            Arc::new(f.hubs.clone()),
            Arc::new(f.payments.clone()),
            Arc::new(held),
        );
        let hub_id = f.hub_id;
        let payment = tokio::spawn(async move { handler.handle(pay(hub_id, "payer", "vnpay")).await });

        // Cancel the hub while the charge is held at the gateway
        entered.notified().await;
        let refunds = ProcessRefundHandler::new(
            Arc::new(f.hubs.clone()),
            Arc::new(f.payments.clone()),
            Arc::new(f.gateway.clone()),
        );
        let summary = refunds.handle(ProcessRefundCommand { hub_id }).await.unwrap();
        assert_eq!((summary.refunded, summary.skipped), (0, 1));

        release.notify_one();
        let err = payment.await.unwrap().unwrap_err();
        assert!(matches!(err, LedgerError::HubCancelled(id) if id == hub_id));

        let rows = f.payments.find_by_hub(&hub_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, PaymentStatus::Refunded);
        assert_eq!(f.gateway.refund_count(), 1);
        let hub = f.hubs.find_by_id(&hub_id).await.unwrap().unwrap();
        assert_eq!(hub.status, HubStatus::Cancelled);
    }

    #[tokio::test]
    async fn failed_refund_of_late_charge_stays_completed_for_next_run() {
        let f = fixture().await;
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let handler = ProcessPaymentHandler::new(
            Arc::new(f.users.clone()),
            Arc::new(f.hubs.clone()),
            Arc::new(f.payments.clone()),
            Arc::new(HeldGateway {
                inner: f.gateway.clone(),
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
            }),
        );
        let hub_id = f.hub_id;
        let payment = tokio::spawn(async move { handler.handle(pay(hub_id, "payer", "vnpay")).await });

        entered.notified().await;
        let mut hub = f.hubs.find_by_id(&hub_id).await.unwrap().unwrap();
        hub.cancel(Timestamp::now()).unwrap();
        f.hubs.update(&hub).await.unwrap();
        f.gateway.fail_next_refund(GatewayError::network("connection reset"));

        release.notify_one();
        let err = payment.await.unwrap().unwrap_err();
        assert!(matches!(err, LedgerError::HubCancelled(_)));

        let rows = f.payments.find_by_hub(&hub_id).await.unwrap();
        assert_eq!(rows[0].status, PaymentStatus::Completed);

        let refunds = ProcessRefundHandler::new(
            Arc::new(f.hubs.clone()),
            Arc::new(f.payments.clone()),
            Arc::new(f.gateway.clone()),
        );
        let summary = refunds.handle(ProcessRefundCommand { hub_id }).await.unwrap();
        assert_eq!(summary.refunded, 1);
        assert!(summary.already_cancelled);
        assert_eq!(
            f.payments.find_by_id(&rows[0].id).await.unwrap().unwrap().status,
            PaymentStatus::Refunded
        );
    }
}
