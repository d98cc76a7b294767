//! Payment module - the ledger of charge attempts and refunds.
//!
//! ```text
//! pending ──> completed ──> refunded
//!    │
//!    └──────> failed
//! ```

mod aggregate;
mod errors;
mod method;
mod status;

pub use aggregate::Payment;
pub use errors::LedgerError;
pub use method::PaymentMethod;
pub use status::PaymentStatus;
