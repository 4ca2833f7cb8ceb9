//! Registration notification events.
//!
//! Emitted after a transition has been committed. Downstream notification
//! delivery (email, SMS) subscribes to these; the engine never calls it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainEvent, EnvelopeId, EventId, MemberId, Percentage, RegistrationId, Timestamp,
};

use super::{Registration, RegistrationStatus};

/// What happened to the registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrationChange {
    /// Unregistered → Registered
    Registered,

    /// Unregistered → Waitlisted
    Waitlisted { position: u32 },

    /// Registered | Waitlisted → Cancelled
    Cancelled {
        previous_status: RegistrationStatus,
        refund_percentage: Percentage,
    },

    /// Waitlisted → Registered after a slot was freed.
    Promoted,
}

/// A committed registration transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    pub envelope_id: EnvelopeId,
    pub registration_id: RegistrationId,
    pub event_id: EventId,
    pub member_id: MemberId,
    pub change: RegistrationChange,
    pub occurred_at: Timestamp,
}

impl RegistrationEvent {
    fn for_registration(registration: &Registration, change: RegistrationChange, at: Timestamp) -> Self {
        Self {
            envelope_id: EnvelopeId::new(),
            registration_id: registration.id,
            event_id: registration.event_id,
            member_id: registration.member_id,
            change,
            occurred_at: at,
        }
    }

    pub fn registered(registration: &Registration) -> Self {
        Self::for_registration(registration, RegistrationChange::Registered, registration.updated_at)
    }

    pub fn waitlisted(registration: &Registration) -> Self {
        let position = registration.waitlist_position.unwrap_or_default();
        Self::for_registration(
            registration,
            RegistrationChange::Waitlisted { position },
            registration.updated_at,
        )
    }

    pub fn cancelled(
        registration: &Registration,
        previous_status: RegistrationStatus,
        refund_percentage: Percentage,
    ) -> Self {
        Self::for_registration(
            registration,
            RegistrationChange::Cancelled {
                previous_status,
                refund_percentage,
            },
            registration.updated_at,
        )
    }

    pub fn promoted(registration: &Registration) -> Self {
        Self::for_registration(registration, RegistrationChange::Promoted, registration.updated_at)
    }
}

impl DomainEvent for RegistrationEvent {
    fn event_type(&self) -> &'static str {
        match self.change {
            RegistrationChange::Registered => "registration.registered.v1",
            RegistrationChange::Waitlisted { .. } => "registration.waitlisted.v1",
            RegistrationChange::Cancelled { .. } => "registration.cancelled.v1",
            RegistrationChange::Promoted => "registration.promoted.v1",
        }
    }

    fn aggregate_id(&self) -> String {
        self.registration_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Registration"
    }

    fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    fn envelope_id(&self) -> EnvelopeId {
        self.envelope_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn event_types_are_versioned() {
        let reg = Registration::waitlisted(EventId::new(), MemberId::new(), 3, Timestamp::now());

        assert_eq!(RegistrationEvent::waitlisted(&reg).event_type(), "registration.waitlisted.v1");
        assert_eq!(RegistrationEvent::promoted(&reg).event_type(), "registration.promoted.v1");
        assert_eq!(
            RegistrationEvent::cancelled(&reg, RegistrationStatus::Waitlisted, Percentage::ZERO)
                .event_type(),
            "registration.cancelled.v1"
        );
    }

    #[test]
    fn envelope_carries_refund_in_payload() {
        let mut reg = Registration::registered(EventId::new(), MemberId::new(), Timestamp::now());
        let previous = reg.cancel(Percentage::HUNDRED, Timestamp::now()).unwrap();
        let event = RegistrationEvent::cancelled(&reg, previous, Percentage::HUNDRED);

        let envelope = event.to_envelope().unwrap();

        assert_eq!(envelope.aggregate_type, "Registration");
        assert_eq!(envelope.aggregate_id, reg.id.to_string());
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.payload["change"]["kind"], "cancelled");
        assert_eq!(envelope.payload["change"]["refund_percentage"], 100);

        let decoded: RegistrationEvent = envelope.payload_as().unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn waitlisted_event_reports_position() {
        let reg = Registration::waitlisted(EventId::new(), MemberId::new(), 4, Timestamp::now());
        assert_eq!(
            RegistrationEvent::waitlisted(&reg).change,
            RegistrationChange::Waitlisted { position: 4 }
        );
    }
}
