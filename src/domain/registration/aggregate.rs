//! Event registration aggregate.
//!
//! # Invariants
//!
//! - At most one active (registered or waitlisted) registration per
//!   (event, member); enforced by the engine and by a partial unique index
//! - `waitlist_position` is `Some` only while waitlisted
//! - Records are never deleted; cancellation is a terminal status

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    EventId, MemberId, Percentage, RegistrationId, StateMachine, Timestamp, ValidationError,
};

use super::RegistrationStatus;

/// A member's registration for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub member_id: MemberId,
    pub status: RegistrationStatus,

    /// 1-based position at the time of enqueue. Advisory only; promotion
    /// order comes from the queue itself.
    pub waitlist_position: Option<u32>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,

    /// Refund applied on cancellation.
    pub refund_percentage: Option<Percentage>,
}

impl Registration {
    /// A confirmed registration that holds a capacity slot.
    pub fn registered(event_id: EventId, member_id: MemberId, now: Timestamp) -> Self {
        Self::fresh(event_id, member_id, RegistrationStatus::Registered, None, now)
    }

    /// A waitlisted registration at the given queue position.
    pub fn waitlisted(event_id: EventId, member_id: MemberId, position: u32, now: Timestamp) -> Self {
        Self::fresh(
            event_id,
            member_id,
            RegistrationStatus::Waitlisted,
            Some(position),
            now,
        )
    }

    fn fresh(
        event_id: EventId,
        member_id: MemberId,
        status: RegistrationStatus,
        waitlist_position: Option<u32>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: RegistrationId::new(),
            event_id,
            member_id,
            status,
            waitlist_position,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
            refund_percentage: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Moves a waitlisted registration into a confirmed slot.
    ///
    /// # Errors
    ///
    /// Returns error unless the registration is waitlisted.
    pub fn promote(&mut self, now: Timestamp) -> Result<(), ValidationError> {
        self.transition_to(RegistrationStatus::Registered)?;
        self.waitlist_position = None;
        self.updated_at = now;
        Ok(())
    }

    /// Cancels the registration, recording the refund applied.
    ///
    /// Returns the status held before cancellation.
    ///
    /// # Errors
    ///
    /// Returns error if the registration is already cancelled.
    pub fn cancel(
        &mut self,
        refund: Percentage,
        now: Timestamp,
    ) -> Result<RegistrationStatus, ValidationError> {
        let previous = self.status;
        self.transition_to(RegistrationStatus::Cancelled)?;
        self.waitlist_position = None;
        self.cancelled_at = Some(now);
        self.refund_percentage = Some(refund);
        self.updated_at = now;
        Ok(previous)
    }

    fn transition_to(&mut self, target: RegistrationStatus) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }
}
