//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machine)
//! - `user` - Accounts provisioned from the identity provider
//! - `hub` - Hub lifecycle and membership admission
//! - `payment` - Payment ledger

pub mod foundation;
pub mod hub;
pub mod payment;
pub mod user;
