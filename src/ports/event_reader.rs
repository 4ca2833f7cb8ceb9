//! Event reader port (read-only).
//!
//! Events are ingested by a separate process; the engine only reads them.

use async_trait::async_trait;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId, Timestamp};

/// Read access to the event catalog.
#[async_trait]
pub trait EventReader: Send + Sync {
    /// Event by id.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Events ending after `now`, ordered by start time.
    ///
    /// No visibility filtering is applied here.
    async fn list_upcoming(&self, now: &Timestamp, limit: u32) -> Result<Vec<Event>, DomainError>;
}
