//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (create, join, pay, refund, login) and queries (listings,
//! lookups) each get their own handler.

pub mod handlers;

pub use handlers::*;
