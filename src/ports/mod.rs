//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Stores
//!
//! - `UserRepository` - Accounts keyed by identity-provider id
//! - `HubRepository` - Hubs, with compare-and-set updates
//! - `PaymentRepository` - Ledger entries, with compare-and-set updates
//!
//! ## External services
//!
//! - `PaymentGateway` - Charge and refund capability
//! - `IdentityProvider` - Verifies login credentials
//! - `TokenIssuer` / `SessionValidator` - Issue and check bearer tokens

mod hub_repository;
mod identity_provider;
mod payment_gateway;
mod payment_repository;
mod session_validator;
mod token_issuer;
mod user_repository;

pub use hub_repository::HubRepository;
pub use identity_provider::IdentityProvider;
pub use payment_gateway::{
    ChargeRequest, GatewayError, GatewayErrorCode, GatewayReceipt, PaymentGateway, RefundRequest,
};
pub use payment_repository::PaymentRepository;
pub use session_validator::SessionValidator;
pub use token_issuer::TokenIssuer;
pub use user_repository::UserRepository;
