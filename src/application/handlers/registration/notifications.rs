//! Best-effort dispatch of committed registration events.

use crate::domain::foundation::{SerializableDomainEvent, UserId};
use crate::domain::registration::{RegistrationChange, RegistrationEvent};
use crate::ports::EventPublisher;

/// Publishes events for an already-committed transition.
///
/// `user_id` is the acting caller. Promotions happen to another member, so
/// their envelopes are left without a user id.
///
/// Failures are logged and swallowed: the state change is durable, and a
/// client retry would only hit `ALREADY_REGISTERED` / `NOT_REGISTERED`.
pub(crate) async fn publish_committed(
    publisher: &dyn EventPublisher,
    events: Vec<RegistrationEvent>,
    user_id: Option<&UserId>,
) {
    let mut envelopes = Vec::with_capacity(events.len());
    for event in &events {
        match event.to_envelope() {
            Ok(envelope) => {
                let envelope = match (user_id, &event.change) {
                    (_, RegistrationChange::Promoted) | (None, _) => envelope,
                    (Some(user), _) => envelope.with_user_id(user.as_str()),
                };
                envelopes.push(envelope);
            }
            Err(e) => tracing::warn!(
                registration_id = %event.registration_id,
                error = %e,
                "failed to serialize registration event"
            ),
        }
    }

    if envelopes.is_empty() {
        return;
    }
    if let Err(e) = publisher.publish_all(envelopes).await {
        tracing::warn!(error = %e, "failed to publish registration events");
    }
}
