//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Accounts, provisioned with `ON CONFLICT DO NOTHING`
//! - `PostgresHubRepository` - Hubs with version compare-and-set updates
//! - `PostgresPaymentRepository` - Ledger rows with version compare-and-set updates
//!
//! Schema lives in `migrations/` and is applied by [`run_migrations`].

mod hub_repository;
mod payment_repository;
mod user_repository;

pub use hub_repository::PostgresHubRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}

fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, err))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// A stored row that no longer satisfies domain rules.
fn corrupt_row(table: &str, reason: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("Corrupt {} row: {}", table, reason),
    )
}
