//! GetEventHandler - Query handler for a single event as seen by the caller.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::access::{AccessEvaluator, Eligibility};
use crate::domain::event::Event;
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::registration::{Registration, RegistrationError};
use crate::ports::{EventReader, RegistrationRepository};

use super::AccessContextBuilder;

/// Query for one event.
#[derive(Debug, Clone)]
pub struct GetEventQuery {
    pub event_id: EventId,
    pub user_id: Option<UserId>,
}

/// Event detail tailored to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    pub event: Event,
    /// Whether the caller could register right now (access rules only).
    pub eligibility: Eligibility,
    /// Caller's active registration, if any.
    pub registration: Option<Registration>,
    pub registration_closed: bool,
    pub confirmed_count: u32,
    pub waitlist_length: u32,
}

/// Handler for event detail.
pub struct GetEventHandler {
    events: Arc<dyn EventReader>,
    access: Arc<AccessContextBuilder>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl GetEventHandler {
    pub fn new(
        events: Arc<dyn EventReader>,
        access: Arc<AccessContextBuilder>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            access,
            registrations,
        }
    }

    /// Returns `None` for unknown events and for events the caller may not
    /// view, so the response does not reveal their existence.
    #[instrument(skip(self, query), fields(event_id = %query.event_id))]
    pub async fn handle(&self, query: GetEventQuery) -> Result<Option<EventDetail>, RegistrationError> {
        let now = Timestamp::now();

        let Some(event) = self.events.find_by_id(&query.event_id).await? else {
            return Ok(None);
        };
        let ctx = self.access.build(query.user_id.as_ref(), &now).await?;
        if !AccessEvaluator::can_view(&event, &ctx) {
            return Ok(None);
        }

        let registration = match ctx.member() {
            Some(member) => {
                self.registrations
                    .find_active_for(&event.id, &member.id)
                    .await?
            }
            None => None,
        };
        let (confirmed_count, waitlist) = futures::try_join!(
            self.registrations.count_registered(&event.id),
            self.registrations.list_waitlist_ordered(&event.id),
        )?;

        Ok(Some(EventDetail {
            eligibility: AccessEvaluator::can_register(&event, &ctx),
            registration_closed: event.is_registration_closed(&now),
            registration,
            confirmed_count,
            waitlist_length: u32::try_from(waitlist.len()).unwrap_or(u32::MAX),
            event,
        }))
    }
}
