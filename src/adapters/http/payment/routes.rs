//! HTTP routes for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_payment, payments_by_hub, payments_by_user, process_payment, refund_hub};
use crate::adapters::http::state::AppState;

/// Payment routes, mounted at `/payment`.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(process_payment))
        .route("/refund", post(refund_hub))
        .route("/user/:id", get(payments_by_user))
        .route("/bhub/:id", get(payments_by_hub))
        .route("/:id", get(get_payment))
}
