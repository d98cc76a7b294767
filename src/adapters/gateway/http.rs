//! HTTP payment gateway adapter.
//!
//! Talks JSON to a VNPay-style gateway:
//!
//! - `POST {base}/v1/charges` and `POST {base}/v1/refunds`
//! - `Authorization: Bearer <api_key>`
//! - `X-Signature`: hex HMAC-SHA512 of the raw request body
//! - `Idempotency-Key`: the ledger payment id
//!
//! Responses carry the same `X-Signature` header over the response body and
//! are rejected when it does not verify.
//!
//! # Security
//!
//! - Signatures compared in constant time
//! - Secrets held as `secrecy::SecretString`

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use subtle::ConstantTimeEq;

use crate::domain::foundation::PaymentId;
use crate::ports::{
    ChargeRequest, GatewayError, GatewayErrorCode, GatewayReceipt, PaymentGateway, RefundRequest,
};

type HmacSha512 = Hmac<Sha512>;

pub const SIGNATURE_HEADER: &str = "X-Signature";

#[derive(Clone)]
pub struct HttpGatewayConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub signing_secret: SecretString,
    pub timeout: Duration,
}

/// Body sent for both charges and refunds.
#[derive(Debug, Serialize)]
struct GatewayRequestBody<'a> {
    reference: PaymentId,
    amount: f64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hub_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GatewayResponseBody {
    status: String,
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpPaymentGateway {
    config: HttpGatewayConfig,
    http_client: reqwest::Client,
}

impl HttpPaymentGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::new(GatewayErrorCode::Unavailable, e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn sign(&self, payload: &[u8]) -> Result<String, GatewayError> {
        sign_payload(self.config.signing_secret.expose_secret().as_bytes(), payload)
    }

    fn verify(&self, payload: &[u8], provided: &str) -> Result<(), GatewayError> {
        let expected = self.sign(payload)?;
        if expected.as_bytes().ct_eq(provided.trim().to_ascii_lowercase().as_bytes()).unwrap_u8() != 1 {
            tracing::warn!("Gateway response signature mismatch");
            return Err(GatewayError::invalid_response("invalid response signature"));
        }
        Ok(())
    }

    async fn post(
        &self,
        path: &str,
        idempotency_key: PaymentId,
        body: &GatewayRequestBody<'_>,
    ) -> Result<GatewayReceipt, GatewayError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let payload = serde_json::to_vec(body)
            .map_err(|e| GatewayError::new(GatewayErrorCode::InvalidResponse, e.to_string()))?;
        let signature = self.sign(&payload)?;

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header("Idempotency-Key", idempotency_key.to_string())
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Payment gateway unreachable");
                GatewayError::network(e.to_string())
            })?;

        let status = response.status();
        let provided_signature = response
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if let Some(code) = status_error(status) {
            let parsed: Option<GatewayResponseBody> = serde_json::from_slice(&bytes).ok();
            let message = parsed
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| format!("gateway returned {}", status));
            let mut err = GatewayError::new(code, message);
            if let Some(provider_code) = parsed.and_then(|b| b.code) {
                err = err.with_provider_code(provider_code);
            }
            tracing::warn!(http_status = %status, code = %err.code, "Payment gateway error");
            return Err(err);
        }

        let signature = provided_signature
            .ok_or_else(|| GatewayError::invalid_response("missing response signature"))?;
        self.verify(&bytes, &signature)?;

        let parsed: GatewayResponseBody = serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::invalid_response(format!("malformed body: {}", e)))?;
        receipt_from(parsed)
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayReceipt, GatewayError> {
        let body = GatewayRequestBody {
            reference: request.payment_id,
            amount: request.amount,
            method: request.method.as_str(),
            user_id: Some(request.user_id.as_str()),
            hub_id: Some(request.hub_id.to_string()),
            transaction_id: None,
        };
        tracing::debug!(payment_id = %request.payment_id, "Submitting charge");
        self.post("/v1/charges", request.payment_id, &body).await
    }

    async fn refund(&self, request: &RefundRequest) -> Result<GatewayReceipt, GatewayError> {
        let body = GatewayRequestBody {
            reference: request.payment_id,
            amount: request.amount,
            method: request.method.as_str(),
            user_id: None,
            hub_id: None,
            transaction_id: request.transaction_id.as_deref(),
        };
        tracing::debug!(payment_id = %request.payment_id, "Submitting refund");
        self.post("/v1/refunds", request.payment_id, &body).await
    }
}

fn sign_payload(secret: &[u8], payload: &[u8]) -> Result<String, GatewayError> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| GatewayError::new(GatewayErrorCode::AuthenticationError, e.to_string()))?;
    mac.update(payload);
    Ok(hex_encode(&mac.finalize().into_bytes()))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn status_error(status: StatusCode) -> Option<GatewayErrorCode> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayErrorCode::AuthenticationError,
        StatusCode::PAYMENT_REQUIRED | StatusCode::UNPROCESSABLE_ENTITY | StatusCode::CONFLICT => {
            GatewayErrorCode::Declined
        }
        StatusCode::TOO_MANY_REQUESTS => GatewayErrorCode::Unavailable,
        s if s.is_server_error() => GatewayErrorCode::Unavailable,
        _ => GatewayErrorCode::InvalidResponse,
    })
}

fn receipt_from(body: GatewayResponseBody) -> Result<GatewayReceipt, GatewayError> {
    match body.status.as_str() {
        "succeeded" | "approved" => body
            .transaction_id
            .filter(|t| !t.is_empty())
            .map(|transaction_id| GatewayReceipt { transaction_id })
            .ok_or_else(|| GatewayError::invalid_response("missing transaction_id")),
        _ => {
            let mut err = GatewayError::declined(
                body.message
                    .unwrap_or_else(|| format!("gateway status '{}'", body.status)),
            );
            if let Some(code) = body.code {
                err = err.with_provider_code(code);
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn gateway() -> HttpPaymentGateway {
        HttpPaymentGateway::new(HttpGatewayConfig {
            base_url: "http://gateway.invalid".to_string(),
            api_key: Secret::new("key".to_string()),
            signing_secret: Secret::new("signing-secret".to_string()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn signature_is_hex_sha512_length() {
        let sig = sign_payload(b"secret", b"{}").unwrap();
        assert_eq!(sig.len(), 128);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_depends_on_secret_and_payload() {
        let a = sign_payload(b"secret", b"{\"amount\":1}").unwrap();
        assert_eq!(a, sign_payload(b"secret", b"{\"amount\":1}").unwrap());
        assert_ne!(a, sign_payload(b"other", b"{\"amount\":1}").unwrap());
        assert_ne!(a, sign_payload(b"secret", b"{\"amount\":2}").unwrap());
    }

    #[test]
    fn verify_accepts_own_signature_in_any_case() {
        let gw = gateway();
        let body = br#"{"status":"succeeded","transaction_id":"t1"}"#;
        let sig = gw.sign(body).unwrap();

        assert!(gw.verify(body, &sig).is_ok());
        assert!(gw.verify(body, &sig.to_uppercase()).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let gw = gateway();
        let sig = gw.sign(br#"{"status":"succeeded"}"#).unwrap();
        let err = gw.verify(br#"{"status":"failed"}"#, &sig).unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::InvalidResponse);
    }

    #[test]
    fn statuses_map_to_error_codes() {
        assert_eq!(status_error(StatusCode::OK), None);
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED),
            Some(GatewayErrorCode::AuthenticationError)
        );
        assert_eq!(
            status_error(StatusCode::PAYMENT_REQUIRED),
            Some(GatewayErrorCode::Declined)
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY),
            Some(GatewayErrorCode::Unavailable)
        );
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST),
            Some(GatewayErrorCode::InvalidResponse)
        );
    }

    #[test]
    fn approved_body_yields_receipt() {
        let receipt = receipt_from(GatewayResponseBody {
            status: "approved".to_string(),
            transaction_id: Some("vnp_123".to_string()),
            code: None,
            message: None,
        })
        .unwrap();
        assert_eq!(receipt.transaction_id, "vnp_123");
    }

    #[test]
    fn declined_body_keeps_provider_code() {
        let err = receipt_from(GatewayResponseBody {
            status: "declined".to_string(),
            transaction_id: None,
            code: Some("51".to_string()),
            message: Some("insufficient funds".to_string()),
        })
        .unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::Declined);
        assert_eq!(err.provider_code.as_deref(), Some("51"));
        assert!(!err.retryable);
    }

    #[test]
    fn success_without_transaction_id_is_invalid() {
        let err = receipt_from(GatewayResponseBody {
            status: "succeeded".to_string(),
            transaction_id: None,
            code: None,
            message: None,
        })
        .unwrap_err();
        assert_eq!(err.code, GatewayErrorCode::InvalidResponse);
    }
}
