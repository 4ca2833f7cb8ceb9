//! CancelRegistrationHandler - Command handler for cancelling a registration.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::access::DenialReason;
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::registration::{
    CancelOutcome, RegistrationError, RegistrationEvent, RegistrationRejection,
};
use crate::ports::{EventPublisher, EventReader, MemberDirectory};

use super::{publish_committed, RegistrationEngine};

/// Command to cancel the caller's registration for an event.
#[derive(Debug, Clone)]
pub struct CancelRegistrationCommand {
    pub event_id: EventId,
    pub user_id: Option<UserId>,
}

/// Handler for cancelling registrations.
///
/// Cancellation needs no eligibility check: anyone holding an active
/// registration may give it up.
pub struct CancelRegistrationHandler {
    events: Arc<dyn EventReader>,
    members: Arc<dyn MemberDirectory>,
    engine: Arc<RegistrationEngine>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelRegistrationHandler {
    pub fn new(
        events: Arc<dyn EventReader>,
        members: Arc<dyn MemberDirectory>,
        engine: Arc<RegistrationEngine>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            events,
            members,
            engine,
            event_publisher,
        }
    }

    #[instrument(skip(self, cmd), fields(event_id = %cmd.event_id))]
    pub async fn handle(
        &self,
        cmd: CancelRegistrationCommand,
    ) -> Result<CancelOutcome, RegistrationError> {
        let now = Timestamp::now();

        let Some(user_id) = cmd.user_id.as_ref() else {
            return Ok(CancelOutcome::Rejected(RegistrationRejection::denied(
                DenialReason::AuthRequired,
            )));
        };
        let Some(event) = self.events.find_by_id(&cmd.event_id).await? else {
            return Ok(CancelOutcome::Rejected(RegistrationRejection::EventNotFound));
        };
        let Some(member) = self.members.find_by_user_id(user_id).await? else {
            return Ok(CancelOutcome::Rejected(RegistrationRejection::NotRegistered));
        };

        let outcome = self.engine.cancel(&event, &member.id, now).await?;

        if let CancelOutcome::Cancelled(receipt) = &outcome {
            let mut events = vec![RegistrationEvent::cancelled(
                &receipt.registration,
                receipt.previous_status,
                receipt.refund_percentage,
            )];
            events.extend(receipt.promoted.iter().map(RegistrationEvent::promoted));
            publish_committed(self.event_publisher.as_ref(), events, Some(user_id)).await;
        }

        Ok(outcome)
    }
}
