//! In-memory event catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId, Timestamp};
use crate::ports::EventReader;

/// Event catalog held in memory, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventCatalog {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
}

impl InMemoryEventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an event.
    pub async fn insert(&self, event: Event) {
        self.events.write().await.insert(event.id, event);
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventReader for InMemoryEventCatalog {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.events.read().await.get(id).cloned())
    }

    async fn list_upcoming(&self, now: &Timestamp, limit: u32) -> Result<Vec<Event>, DomainError> {
        let events = self.events.read().await;
        let mut upcoming: Vec<Event> = events
            .values()
            .filter(|e| e.end_time.is_after(now) || e.start_time.is_after(now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|e| e.start_time);
        upcoming.truncate(limit as usize);
        Ok(upcoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventCategory;

    fn event_at(start: Timestamp) -> Event {
        Event {
            id: EventId::new(),
            title: "Work day".to_string(),
            category: EventCategory::WorkDay,
            start_time: start,
            end_time: start.add_hours(2),
            location: "Range".to_string(),
            capacity: None,
            cost_cents: 0,
            is_public: true,
            members_only: false,
            board_only: false,
            requires_certification: None,
            registration_deadline: None,
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_inserted_event() {
        let catalog = InMemoryEventCatalog::new();
        let event = event_at(Timestamp::now().add_days(1));
        catalog.insert(event.clone()).await;

        assert_eq!(catalog.find_by_id(&event.id).await.unwrap(), Some(event));
        assert_eq!(catalog.find_by_id(&EventId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_upcoming_skips_past_events_and_sorts() {
        let catalog = InMemoryEventCatalog::new();
        let now = Timestamp::now();
        let later = event_at(now.add_days(5));
        let sooner = event_at(now.add_days(1));
        catalog.insert(event_at(now.minus_days(3))).await;
        catalog.insert(later.clone()).await;
        catalog.insert(sooner.clone()).await;

        let upcoming = catalog.list_upcoming(&now, 10).await.unwrap();
        assert_eq!(upcoming, vec![sooner.clone(), later]);

        let limited = catalog.list_upcoming(&now, 1).await.unwrap();
        assert_eq!(limited, vec![sooner]);
    }
}
