//! Request and response bodies for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::RefundSummary;
use crate::domain::foundation::PaymentId;
use crate::domain::payment::PaymentStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessPaymentRequest {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(alias = "bhubId", alias = "hub_id")]
    pub bhub_id: String,
    pub amount: f64,
    #[serde(alias = "paymentMethod")]
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPaymentResponse {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefundHubRequest {
    #[serde(alias = "bhubId", alias = "hub_id")]
    pub bhub_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundHubResponse {
    pub message: String,
    pub refunded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub already_cancelled: bool,
}

impl From<RefundSummary> for RefundHubResponse {
    fn from(summary: RefundSummary) -> Self {
        let message = if summary.failed == 0 {
            "Refunds processed and BHub cancelled"
        } else {
            "BHub cancelled; some refunds failed and will be retried on the next request"
        };
        Self {
            message: message.to_string(),
            refunded: summary.refunded,
            skipped: summary.skipped,
            failed: summary.failed,
            already_cancelled: summary.already_cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::HubId;

    #[test]
    fn payment_request_accepts_original_field_names() {
        let req: ProcessPaymentRequest = serde_json::from_value(serde_json::json!({
            "userId": "u1",
            "bhubId": "8f0f8c50-4a4f-4c8e-9a57-1c3c0d1b2a10",
            "amount": 50.0,
            "paymentMethod": "vnpay"
        }))
        .unwrap();
        assert_eq!(req.payment_method, "vnpay");
    }

    #[test]
    fn partial_refund_message_mentions_retry() {
        let response = RefundHubResponse::from(RefundSummary {
            hub_id: HubId::new(),
            refunded: 2,
            skipped: 0,
            failed: 1,
            already_cancelled: false,
        });
        assert!(response.message.contains("retried"));
    }
}
