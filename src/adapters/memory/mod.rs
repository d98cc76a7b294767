//! In-memory store adapters.
//!
//! Back the repository ports with `tokio::sync::RwLock<HashMap>`. Used when
//! no database is configured and throughout the test suites. Compare-and-set
//! updates check the version under the write lock, so the concurrency
//! contract holds exactly as it does in Postgres.

mod hub_repository;
mod payment_repository;
mod user_repository;

pub use hub_repository::InMemoryHubRepository;
pub use payment_repository::InMemoryPaymentRepository;
pub use user_repository::InMemoryUserRepository;
