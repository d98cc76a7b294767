//! User module - accounts provisioned from the identity provider.

mod aggregate;
mod errors;

pub use aggregate::{User, UserRole};
pub use errors::UserError;
