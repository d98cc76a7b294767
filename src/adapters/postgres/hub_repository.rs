//! PostgreSQL implementation of HubRepository.
//!
//! Members live in a `TEXT[]` column next to the hub so a join is a single
//! row write. `update` is a compare-and-set on `version`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{corrupt_row, db_error, is_unique_violation};
use crate::domain::foundation::{DomainError, ErrorCode, HubId, Timestamp, UserId};
use crate::domain::hub::{Hub, HubStatus};
use crate::ports::HubRepository;

#[derive(Clone)]
pub struct PostgresHubRepository {
    pool: PgPool,
}

impl PostgresHubRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct HubRow {
    id: Uuid,
    host_id: String,
    location: String,
    time_slot: DateTime<Utc>,
    min_members: i64,
    max_members: i64,
    price_total: f64,
    price_per_person: f64,
    status: String,
    members: Vec<String>,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<HubRow> for Hub {
    type Error = DomainError;

    fn try_from(row: HubRow) -> Result<Self, Self::Error> {
        let members = row
            .members
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt_row("hubs", e))?;

        Ok(Hub {
            id: HubId::from_uuid(row.id),
            host_id: UserId::new(row.host_id).map_err(|e| corrupt_row("hubs", e))?,
            location: row.location,
            time_slot: Timestamp::from_datetime(row.time_slot),
            min_members: u32::try_from(row.min_members).map_err(|e| corrupt_row("hubs", e))?,
            max_members: u32::try_from(row.max_members).map_err(|e| corrupt_row("hubs", e))?,
            price_total: row.price_total,
            price_per_person: row.price_per_person,
            status: row
                .status
                .parse::<HubStatus>()
                .map_err(|e| corrupt_row("hubs", e))?,
            members,
            version: row.version,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_HUB: &str = r#"
    SELECT id, host_id, location, time_slot, min_members, max_members,
           price_total, price_per_person, status, members, version,
           created_at, updated_at
    FROM hubs
"#;

fn member_strings(hub: &Hub) -> Vec<String> {
    hub.members.iter().map(|m| m.as_str().to_string()).collect()
}

#[async_trait]
impl HubRepository for PostgresHubRepository {
    async fn save(&self, hub: &Hub) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO hubs (
                id, host_id, location, time_slot, min_members, max_members,
                price_total, price_per_person, status, members, version,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(hub.id.as_uuid())
        .bind(hub.host_id.as_str())
        .bind(&hub.location)
        .bind(hub.time_slot.as_datetime())
        .bind(i64::from(hub.min_members))
        .bind(i64::from(hub.max_members))
        .bind(hub.price_total)
        .bind(hub.price_per_person)
        .bind(hub.status.as_str())
        .bind(member_strings(hub))
        .bind(hub.version)
        .bind(hub.created_at.as_datetime())
        .bind(hub.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::ConcurrencyConflict,
                    format!("Hub already exists: {}", hub.id),
                )
            } else {
                db_error("insert hub", e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, hub: &Hub) -> Result<i64, DomainError> {
        let next: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE hubs SET
                location = $3,
                time_slot = $4,
                status = $5,
                members = $6,
                updated_at = $7,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING version
            "#,
        )
        .bind(hub.id.as_uuid())
        .bind(hub.version)
        .bind(&hub.location)
        .bind(hub.time_slot.as_datetime())
        .bind(hub.status.as_str())
        .bind(member_strings(hub))
        .bind(hub.updated_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update hub", e))?;

        if let Some((version,)) = next {
            return Ok(version);
        }

        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM hubs WHERE id = $1)")
            .bind(hub.id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check hub existence", e))?;

        if exists {
            Err(DomainError::new(
                ErrorCode::ConcurrencyConflict,
                format!("Hub {} was modified (expected version {})", hub.id, hub.version),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::HubNotFound,
                format!("Hub not found: {}", hub.id),
            ))
        }
    }

    async fn find_by_id(&self, id: &HubId) -> Result<Option<Hub>, DomainError> {
        let row: Option<HubRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_HUB))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch hub", e))?;

        row.map(Hub::try_from).transpose()
    }

    async fn list_open(&self, now: Timestamp) -> Result<Vec<Hub>, DomainError> {
        let rows: Vec<HubRow> = sqlx::query_as(&format!(
            "{} WHERE status = 'open' AND time_slot >= $1 ORDER BY time_slot",
            SELECT_HUB
        ))
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list open hubs", e))?;

        rows.into_iter().map(Hub::try_from).collect()
    }

    async fn list_upcoming(
        &self,
        now: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<Hub>, DomainError> {
        let rows: Vec<HubRow> = sqlx::query_as(&format!(
            "{} WHERE status = 'open' AND time_slot >= $1 AND time_slot <= $2 ORDER BY time_slot",
            SELECT_HUB
        ))
        .bind(now.as_datetime())
        .bind(until.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list upcoming hubs", e))?;

        rows.into_iter().map(Hub::try_from).collect()
    }
}
