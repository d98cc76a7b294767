//! HTTP handlers for payment endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::params::{parse_hub_id, parse_user_id};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{ProcessPaymentCommand, ProcessRefundCommand};
use crate::domain::foundation::PaymentId;

use super::dto::{ProcessPaymentRequest, ProcessPaymentResponse, RefundHubRequest, RefundHubResponse};

/// POST /payment
pub async fn process_payment(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    payload: Result<Json<ProcessPaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let cmd = ProcessPaymentCommand {
        user_id: parse_user_id(req.user_id, "user_id")?,
        hub_id: parse_hub_id(&req.bhub_id)?,
        amount: req.amount,
        payment_method: req.payment_method,
    };

    let result = state.process_payment_handler().handle(cmd).await?;
    Ok(Json(ProcessPaymentResponse {
        payment_id: result.payment_id,
        status: result.status,
    }))
}

/// POST /payment/refund
pub async fn refund_hub(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    payload: Result<Json<RefundHubRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let hub_id = parse_hub_id(&req.bhub_id)?;

    tracing::info!(hub_id = %hub_id, requested_by = %caller.id, "Refund requested");
    let summary = state
        .process_refund_handler()
        .handle(ProcessRefundCommand { hub_id })
        .await?;
    Ok(Json(RefundHubResponse::from(summary)))
}

/// GET /payment/:id
pub async fn get_payment(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment_id = id
        .parse::<PaymentId>()
        .map_err(|_| ApiError::bad_request("Invalid payment ID").with_field("id"))?;
    let payment = state.payment_queries().get(payment_id).await?;
    Ok(Json(payment))
}

/// GET /payment/user/:id
pub async fn payments_by_user(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_user_id(id, "id")?;
    let payments = state.payment_queries().by_user(&user_id).await?;
    Ok(Json(payments))
}

/// GET /payment/bhub/:id
pub async fn payments_by_hub(
    State(state): State<AppState>,
    RequireAuth(_caller): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let hub_id = parse_hub_id(&id)?;
    let payments = state.payment_queries().by_hub(&hub_id).await?;
    Ok(Json(payments))
}
