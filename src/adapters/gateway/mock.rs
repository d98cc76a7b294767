//! Deterministic payment gateway for development and tests.
//!
//! Succeeds by default and hands out sequential transaction ids
//! (`mock_txn_1`, `mock_txn_2`, ...). Failures can be injected per call,
//! per operation, or per payment so the ledger's failure paths get
//! exercised.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::foundation::PaymentId;
use crate::ports::{ChargeRequest, GatewayError, GatewayReceipt, PaymentGateway, RefundRequest};

#[derive(Debug, Clone, Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    next_txn: u64,
    charge_errors: VecDeque<GatewayError>,
    refund_errors: VecDeque<GatewayError>,
    always_decline_charges: bool,
    refund_failures: HashMap<PaymentId, GatewayError>,
    call_log: Vec<GatewayCall>,
}

/// Recorded call for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Charge { payment_id: PaymentId, amount: f64 },
    Refund { payment_id: PaymentId, transaction_id: Option<String> },
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that declines every charge.
    pub fn declining() -> Self {
        let mock = Self::new();
        mock.state().always_decline_charges = true;
        mock
    }

    /// Fails the next `charge` call with `err`. Queued errors are consumed in order.
    pub fn fail_next_charge(&self, err: GatewayError) {
        self.state().charge_errors.push_back(err);
    }

    pub fn fail_next_refund(&self, err: GatewayError) {
        self.state().refund_errors.push_back(err);
    }

    /// Fails every refund of `payment_id` until cleared.
    pub fn fail_refunds_for(&self, payment_id: PaymentId, err: GatewayError) {
        self.state().refund_failures.insert(payment_id, err);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.charge_errors.clear();
        state.refund_errors.clear();
        state.refund_failures.clear();
        state.always_decline_charges = false;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state().call_log.clone()
    }

    pub fn refund_count(&self) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| matches!(c, GatewayCall::Refund { .. }))
            .count()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MockState {
    fn receipt(&mut self) -> GatewayReceipt {
        self.next_txn += 1;
        GatewayReceipt {
            transaction_id: format!("mock_txn_{}", self.next_txn),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayReceipt, GatewayError> {
        let mut state = self.state();
        state.call_log.push(GatewayCall::Charge {
            payment_id: request.payment_id,
            amount: request.amount,
        });

        if let Some(err) = state.charge_errors.pop_front() {
            return Err(err);
        }
        if state.always_decline_charges {
            return Err(GatewayError::declined("Declined by mock gateway"));
        }
        Ok(state.receipt())
    }

    async fn refund(&self, request: &RefundRequest) -> Result<GatewayReceipt, GatewayError> {
        let mut state = self.state();
        state.call_log.push(GatewayCall::Refund {
            payment_id: request.payment_id,
            transaction_id: request.transaction_id.clone(),
        });

        if let Some(err) = state.refund_failures.get(&request.payment_id) {
            return Err(err.clone());
        }
        if let Some(err) = state.refund_errors.pop_front() {
            return Err(err);
        }
        Ok(state.receipt())
    }
}
