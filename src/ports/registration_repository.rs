//! Registration repository port.
//!
//! # Design
//!
//! - **Append and update only**: records are never deleted
//! - **One active per member**: at most one registered-or-waitlisted
//!   record per (event, member); implementations should back this with a
//!   unique constraint
//! - **Atomic batches**: `update_statuses` writes all records or none

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventId, MemberId};
use crate::domain::registration::Registration;

/// Persistence for event registrations.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a new registration.
    ///
    /// # Errors
    ///
    /// - `DuplicateRegistration` if an active record already exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, registration: &Registration) -> Result<(), DomainError>;

    /// Persist the status fields of an existing registration.
    ///
    /// # Errors
    ///
    /// - `RegistrationNotFound` if the record does not exist
    /// - `DatabaseError` on persistence failure
    async fn update_status(&self, registration: &Registration) -> Result<(), DomainError>;

    /// Persist several status changes as one atomic batch.
    async fn update_statuses(&self, registrations: &[Registration]) -> Result<(), DomainError>;

    /// The member's registered or waitlisted record for the event.
    async fn find_active_for(
        &self,
        event_id: &EventId,
        member_id: &MemberId,
    ) -> Result<Option<Registration>, DomainError>;

    /// Waitlisted records for the event in promotion order.
    async fn list_waitlist_ordered(&self, event_id: &EventId)
        -> Result<Vec<Registration>, DomainError>;

    /// Number of registered (confirmed) records for the event.
    async fn count_registered(&self, event_id: &EventId) -> Result<u32, DomainError>;

    /// Every registration of the member, newest first.
    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Registration>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn RegistrationRepository) {}
}
