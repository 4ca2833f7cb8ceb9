//! PostgreSQL implementation of RegistrationRepository.
//!
//! Active uniqueness is backed by the partial unique index
//! `event_registrations_active_key`. Waitlist order follows insertion
//! order through the `seq` identity column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MemberId, Percentage, RegistrationId, Timestamp,
};
use crate::domain::registration::{Registration, RegistrationStatus};
use crate::ports::RegistrationRepository;

const ACTIVE_KEY: &str = "event_registrations_active_key";

/// PostgreSQL implementation of the RegistrationRepository port.
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn update_in(
        tx: &mut Transaction<'_, Postgres>,
        registration: &Registration,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE event_registrations SET
                status = $2,
                waitlist_position = $3,
                updated_at = $4,
                cancelled_at = $5,
                refund_percentage = $6
            WHERE id = $1
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.status.as_str())
        .bind(registration.waitlist_position.map(position_to_db))
        .bind(registration.updated_at.as_datetime())
        .bind(registration.cancelled_at.as_ref().map(Timestamp::as_datetime))
        .bind(registration.refund_percentage.map(|p| i16::from(p.value())))
        .execute(&mut **tx)
        .await
        .map_err(|e| map_write_error("Failed to update registration", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RegistrationNotFound,
                format!("Registration not found: {}", registration.id),
            ));
        }
        Ok(())
    }
}

/// Database row representation of a registration.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    event_id: Uuid,
    member_id: Uuid,
    status: String,
    waitlist_position: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
    refund_percentage: Option<i16>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let status = RegistrationStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid registration status value: {}", row.status),
            )
        })?;

        let refund_percentage = row
            .refund_percentage
            .map(|p| {
                u8::try_from(p)
                    .ok()
                    .and_then(|p| Percentage::try_new(p).ok())
                    .ok_or_else(|| {
                        DomainError::new(
                            ErrorCode::DatabaseError,
                            format!("Invalid refund percentage: {}", p),
                        )
                    })
            })
            .transpose()?;

        Ok(Registration {
            id: RegistrationId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            member_id: MemberId::from_uuid(row.member_id),
            status,
            waitlist_position: row
                .waitlist_position
                .and_then(|p| u32::try_from(p).ok()),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
            refund_percentage,
        })
    }
}

fn position_to_db(position: u32) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}

fn map_write_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(ACTIVE_KEY) {
            return DomainError::new(
                ErrorCode::DuplicateRegistration,
                "Member already has an active registration for this event",
            );
        }
    }
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

fn read_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

const REGISTRATION_COLUMNS: &str = "id, event_id, member_id, status, waitlist_position, \
     created_at, updated_at, cancelled_at, refund_percentage";

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn create(&self, registration: &Registration) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO event_registrations (
                id, event_id, member_id, status, waitlist_position,
                created_at, updated_at, cancelled_at, refund_percentage
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.event_id.as_uuid())
        .bind(registration.member_id.as_uuid())
        .bind(registration.status.as_str())
        .bind(registration.waitlist_position.map(position_to_db))
        .bind(registration.created_at.as_datetime())
        .bind(registration.updated_at.as_datetime())
        .bind(registration.cancelled_at.as_ref().map(Timestamp::as_datetime))
        .bind(registration.refund_percentage.map(|p| i16::from(p.value())))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("Failed to save registration", e))?;

        Ok(())
    }

    async fn update_status(&self, registration: &Registration) -> Result<(), DomainError> {
        self.update_statuses(std::slice::from_ref(registration)).await
    }

    async fn update_statuses(&self, registrations: &[Registration]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| read_error("Failed to begin transaction", e))?;

        for registration in registrations {
            Self::update_in(&mut tx, registration).await?;
        }

        tx.commit()
            .await
            .map_err(|e| read_error("Failed to commit registration batch", e))?;
        Ok(())
    }

    async fn find_active_for(
        &self,
        event_id: &EventId,
        member_id: &MemberId,
    ) -> Result<Option<Registration>, DomainError> {
        let sql = format!(
            "SELECT {} FROM event_registrations \
             WHERE event_id = $1 AND member_id = $2 AND status IN ('registered', 'waitlisted')",
            REGISTRATION_COLUMNS
        );
        let row: Option<RegistrationRow> = sqlx::query_as(&sql)
            .bind(event_id.as_uuid())
            .bind(member_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find registration", e))?;

        row.map(Registration::try_from).transpose()
    }

    async fn list_waitlist_ordered(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, DomainError> {
        let sql = format!(
            "SELECT {} FROM event_registrations \
             WHERE event_id = $1 AND status = 'waitlisted' \
             ORDER BY seq ASC",
            REGISTRATION_COLUMNS
        );
        let rows: Vec<RegistrationRow> = sqlx::query_as(&sql)
            .bind(event_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list waitlist", e))?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn count_registered(&self, event_id: &EventId) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM event_registrations
            WHERE event_id = $1 AND status = 'registered'
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| read_error("Failed to count registrations", e))?;

        u32::try_from(count).map_err(|_| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid registration count: {}", count))
        })
    }

    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Registration>, DomainError> {
        let sql = format!(
            "SELECT {} FROM event_registrations \
             WHERE member_id = $1 \
             ORDER BY created_at DESC",
            REGISTRATION_COLUMNS
        );
        let rows: Vec<RegistrationRow> = sqlx::query_as(&sql)
            .bind(member_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list registrations", e))?;

        rows.into_iter().map(Registration::try_from).collect()
    }
}
