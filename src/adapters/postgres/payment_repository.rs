//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, HubId, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::ports::PaymentRepository;

#[derive(Clone)]
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: String,
    hub_id: Uuid,
    amount: f64,
    payment_method: String,
    status: String,
    transaction_id: Option<String>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| corrupt_row("payments", e))?,
            hub_id: HubId::from_uuid(row.hub_id),
            amount: row.amount,
            payment_method: row
                .payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| corrupt_row("payments", e))?,
            status: row
                .status
                .parse::<PaymentStatus>()
                .map_err(|e| corrupt_row("payments", e))?,
            transaction_id: row.transaction_id,
            version: row.version,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_PAYMENT: &str = r#"
    SELECT id, user_id, hub_id, amount, payment_method, status, transaction_id,
           version, created_at, updated_at
    FROM payments
"#;

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, user_id, hub_id, amount, payment_method, status,
                transaction_id, version, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.user_id.as_str())
        .bind(payment.hub_id.as_uuid())
        .bind(payment.amount)
        .bind(payment.payment_method.as_str())
        .bind(payment.status.as_str())
        .bind(payment.transaction_id.as_deref())
        .bind(payment.version)
        .bind(payment.created_at.as_datetime())
        .bind(payment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    format!("Payment already exists: {}", payment.id),
                )
            } else {
                db_error("insert payment", e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<i64, DomainError> {
        let next: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE payments SET
                status = $3,
                transaction_id = $4,
                updated_at = $5,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING version
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.version)
        .bind(payment.status.as_str())
        .bind(payment.transaction_id.as_deref())
        .bind(payment.updated_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update payment", e))?;

        if let Some((version,)) = next {
            return Ok(version);
        }

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM payments WHERE id = $1)")
                .bind(payment.id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("check payment existence", e))?;

        if exists {
            Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Payment {} was modified concurrently", payment.id),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                format!("Payment not found: {}", payment.id),
            ))
        }
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PAYMENT))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("fetch payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at",
            SELECT_PAYMENT
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch payments by user", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn find_by_hub(&self, hub_id: &HubId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE hub_id = $1 ORDER BY created_at",
            SELECT_PAYMENT
        ))
        .bind(hub_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch payments by hub", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}
