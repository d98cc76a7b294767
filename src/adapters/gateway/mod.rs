//! Payment gateway adapters.
//!
//! - `mock` - Deterministic gateway with failure injection
//! - `http` - Signed JSON gateway client

mod http;
mod mock;

pub use http::{HttpGatewayConfig, HttpPaymentGateway, SIGNATURE_HEADER};
pub use mock::{GatewayCall, MockPaymentGateway};
