//! In-memory registration repository.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, MemberId};
use crate::domain::registration::{Registration, RegistrationStatus};
use crate::ports::RegistrationRepository;

/// Registration records held in memory, for development and tests.
///
/// Records are kept in insertion order, which is also waitlist order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrationRepository {
    records: Arc<RwLock<Vec<Registration>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a database error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Every stored record, in insertion order.
    pub async fn all(&self) -> Vec<Registration> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("simulated write failure"));
        }
        Ok(())
    }
}

fn not_found(registration: &Registration) -> DomainError {
    DomainError::new(
        ErrorCode::RegistrationNotFound,
        format!("Registration not found: {}", registration.id),
    )
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn create(&self, registration: &Registration) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;

        let duplicate = records.iter().any(|r| {
            r.event_id == registration.event_id
                && r.member_id == registration.member_id
                && r.is_active()
        });
        if duplicate && registration.is_active() {
            return Err(DomainError::new(
                ErrorCode::DuplicateRegistration,
                "Member already has an active registration for this event",
            )
            .with_detail("event_id", registration.event_id.to_string())
            .with_detail("member_id", registration.member_id.to_string()));
        }

        records.push(registration.clone());
        Ok(())
    }

    async fn update_status(&self, registration: &Registration) -> Result<(), DomainError> {
        self.update_statuses(std::slice::from_ref(registration)).await
    }

    async fn update_statuses(&self, registrations: &[Registration]) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;

        let mut indices = Vec::with_capacity(registrations.len());
        for registration in registrations {
            let index = records
                .iter()
                .position(|r| r.id == registration.id)
                .ok_or_else(|| not_found(registration))?;
            indices.push(index);
        }

        for (index, registration) in indices.into_iter().zip(registrations) {
            records[index] = registration.clone();
        }
        Ok(())
    }

    async fn find_active_for(
        &self,
        event_id: &EventId,
        member_id: &MemberId,
    ) -> Result<Option<Registration>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| &r.event_id == event_id && &r.member_id == member_id && r.is_active())
            .cloned())
    }

    async fn list_waitlist_ordered(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| &r.event_id == event_id && r.status == RegistrationStatus::Waitlisted)
            .cloned()
            .collect())
    }

    async fn count_registered(&self, event_id: &EventId) -> Result<u32, DomainError> {
        let records = self.records.read().await;
        let count = records
            .iter()
            .filter(|r| &r.event_id == event_id && r.status == RegistrationStatus::Registered)
            .count();
        u32::try_from(count).map_err(|_| DomainError::new(ErrorCode::InternalError, "count overflow"))
    }

    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Registration>, DomainError> {
        let records = self.records.read().await;
        let mut mine: Vec<Registration> = records
            .iter()
            .filter(|r| &r.member_id == member_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}
