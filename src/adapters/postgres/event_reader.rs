//! PostgreSQL implementation of EventReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::event::{Event, EventCategory};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, Timestamp};
use crate::ports::EventReader;

/// PostgreSQL implementation of the EventReader port.
pub struct PostgresEventReader {
    pool: PgPool,
}

impl PostgresEventReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an event.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    category: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    location: String,
    capacity: Option<i32>,
    cost_cents: i64,
    is_public: bool,
    members_only: bool,
    board_only: bool,
    requires_certification: Option<String>,
    registration_deadline: Option<DateTime<Utc>>,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let category = EventCategory::parse(&row.category).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid category value: {}", row.category),
            )
        })?;

        // Negative capacity is upstream garbage; treat it as no free slots.
        let capacity = row.capacity.map(|c| u32::try_from(c).unwrap_or(0));

        Ok(Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            category,
            start_time: Timestamp::from_datetime(row.start_time),
            end_time: Timestamp::from_datetime(row.end_time),
            location: row.location,
            capacity,
            cost_cents: row.cost_cents.max(0),
            is_public: row.is_public,
            members_only: row.members_only,
            board_only: row.board_only,
            requires_certification: row.requires_certification,
            registration_deadline: row.registration_deadline.map(Timestamp::from_datetime),
        })
    }
}

const EVENT_COLUMNS: &str = "id, title, category, start_time, end_time, location, capacity, \
     cost_cents, is_public, members_only, board_only, requires_certification, registration_deadline";

#[async_trait]
impl EventReader for PostgresEventReader {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let row: Option<EventRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to find event: {}", e))
            })?;

        row.map(Event::try_from).transpose()
    }

    async fn list_upcoming(&self, now: &Timestamp, limit: u32) -> Result<Vec<Event>, DomainError> {
        let sql = format!(
            "SELECT {} FROM events \
             WHERE end_time > $1 OR start_time > $1 \
             ORDER BY start_time ASC \
             LIMIT $2",
            EVENT_COLUMNS
        );
        let rows: Vec<EventRow> = sqlx::query_as(&sql)
            .bind(now.as_datetime())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list upcoming events: {}", e),
                )
            })?;

        rows.into_iter().map(Event::try_from).collect()
    }
}
