//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, the error vocabulary and the state machine
//! trait used by every aggregate.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, VerifiedIdentity};
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{HubId, PaymentId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
