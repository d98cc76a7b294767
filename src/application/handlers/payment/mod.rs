//! Payment ledger handlers.
//!
//! ## Commands
//! - Process a payment through the gateway
//! - Refund a hub's payments and cancel it
//!
//! ## Queries
//! - Payment by id, by user, by hub

mod payment_queries;
mod process_payment;
mod process_refund;

pub use payment_queries::PaymentQueryHandler;
pub use process_payment::{ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult};
pub use process_refund::{ProcessRefundCommand, ProcessRefundHandler, RefundSummary};
