//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod hub;
pub mod payment;
pub mod retry;
pub mod user;

pub use hub::{
    CreateHubCommand, CreateHubHandler, GetHubHandler, GetHubQuery, JoinHubCommand,
    JoinHubHandler, JoinHubResult, ListOpenHubsHandler, ListOpenHubsQuery,
    ListUpcomingHubsHandler, ListUpcomingHubsQuery,
};
pub use payment::{
    PaymentQueryHandler, ProcessPaymentCommand, ProcessPaymentHandler, ProcessPaymentResult,
    ProcessRefundCommand, ProcessRefundHandler, RefundSummary,
};
pub use user::{GetUserHandler, LoginCommand, LoginHandler, LoginResult};
