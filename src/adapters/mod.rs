//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process stores for development and tests
//! - `postgres` - sqlx-backed stores
//! - `gateway` - Payment gateway clients
//! - `auth` - Identity provider, session tokens and their mocks
//! - `http` - axum REST surface

pub mod auth;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod postgres;
