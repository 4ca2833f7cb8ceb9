//! ListEventsHandler - Query handler for upcoming events visible to the caller.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::access::AccessEvaluator;
use crate::domain::event::Event;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::registration::RegistrationError;
use crate::ports::EventReader;

use super::AccessContextBuilder;

/// Default number of upcoming events fetched per listing.
pub const DEFAULT_EVENT_LIST_LIMIT: u32 = 50;

/// Query for upcoming events.
#[derive(Debug, Clone)]
pub struct ListEventsQuery {
    pub user_id: Option<UserId>,
    pub limit: Option<u32>,
}

impl ListEventsQuery {
    pub fn for_caller(user_id: Option<UserId>) -> Self {
        Self {
            user_id,
            limit: None,
        }
    }
}

/// Handler for listing events.
pub struct ListEventsHandler {
    events: Arc<dyn EventReader>,
    access: Arc<AccessContextBuilder>,
}

impl ListEventsHandler {
    pub fn new(events: Arc<dyn EventReader>, access: Arc<AccessContextBuilder>) -> Self {
        Self { events, access }
    }

    /// Upcoming events ordered by start time, filtered to what the caller
    /// may view. Filtering happens after the limit is applied.
    #[instrument(skip(self, query))]
    pub async fn handle(&self, query: ListEventsQuery) -> Result<Vec<Event>, RegistrationError> {
        let now = Timestamp::now();
        let limit = query.limit.unwrap_or(DEFAULT_EVENT_LIST_LIMIT);

        let (ctx, upcoming) = futures::try_join!(
            self.access.build(query.user_id.as_ref(), &now),
            self.events.list_upcoming(&now, limit),
        )?;

        Ok(upcoming
            .into_iter()
            .filter(|event| AccessEvaluator::can_view(event, &ctx))
            .collect())
    }
}
