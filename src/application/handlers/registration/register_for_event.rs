//! RegisterForEventHandler - Command handler for event registration.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::registration::{
    RegisterOutcome, RegistrationError, RegistrationEvent, RegistrationRejection,
};
use crate::ports::{EventPublisher, EventReader};

use super::{publish_committed, AccessContextBuilder, RegistrationEngine};

/// Command to register the caller for an event.
#[derive(Debug, Clone)]
pub struct RegisterForEventCommand {
    pub event_id: EventId,
    /// Authenticated caller, `None` for anonymous requests.
    pub user_id: Option<UserId>,
}

/// Handler for registering for events.
///
/// The access context is assembled before the engine takes the event lock.
pub struct RegisterForEventHandler {
    events: Arc<dyn EventReader>,
    access: Arc<AccessContextBuilder>,
    engine: Arc<RegistrationEngine>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RegisterForEventHandler {
    pub fn new(
        events: Arc<dyn EventReader>,
        access: Arc<AccessContextBuilder>,
        engine: Arc<RegistrationEngine>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            events,
            access,
            engine,
            event_publisher,
        }
    }

    #[instrument(skip(self, cmd), fields(event_id = %cmd.event_id))]
    pub async fn handle(
        &self,
        cmd: RegisterForEventCommand,
    ) -> Result<RegisterOutcome, RegistrationError> {
        let now = Timestamp::now();

        // 1. Load the event
        let Some(event) = self.events.find_by_id(&cmd.event_id).await? else {
            return Ok(RegisterOutcome::Rejected(RegistrationRejection::EventNotFound));
        };

        // 2. Build the caller's context outside the event lock
        let ctx = self.access.build(cmd.user_id.as_ref(), &now).await?;

        // 3. Register (engine serializes per event)
        let admission = self.engine.admit(&event, &ctx, now).await?;

        // 4. Notify
        let mut events: Vec<RegistrationEvent> = admission
            .promoted
            .iter()
            .map(RegistrationEvent::promoted)
            .collect();
        match &admission.outcome {
            RegisterOutcome::Registered(r) => events.push(RegistrationEvent::registered(r)),
            RegisterOutcome::Waitlisted(r) => events.push(RegistrationEvent::waitlisted(r)),
            RegisterOutcome::Rejected(_) => {}
        }
        if !events.is_empty() {
            publish_committed(self.event_publisher.as_ref(), events, cmd.user_id.as_ref()).await;
        }

        Ok(admission.outcome)
    }
}
