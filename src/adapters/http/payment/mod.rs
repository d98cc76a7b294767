//! HTTP adapter for payment endpoints.
//!
//! - `POST /payment` - Charge a user for a hub
//! - `POST /payment/refund` - Refund a hub's payments and cancel it
//! - `GET /payment/:id`, `/payment/user/:id`, `/payment/bhub/:id` - Ledger lookups

mod dto;
mod handlers;
mod routes;

pub use dto::{ProcessPaymentRequest, ProcessPaymentResponse, RefundHubRequest, RefundHubResponse};
pub use routes::payment_routes;
