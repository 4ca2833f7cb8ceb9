//! In-memory member directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, MemberId, UserId};
use crate::domain::member::{BoardMembership, Certification, Member};
use crate::ports::MemberDirectory;

#[derive(Debug, Default)]
struct Directory {
    members: HashMap<MemberId, Member>,
    certifications: HashMap<MemberId, Vec<Certification>>,
    board_seats: HashMap<MemberId, BoardMembership>,
}

/// Member directory held in memory, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberDirectory {
    inner: Arc<RwLock<Directory>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a member profile.
    pub async fn insert_member(&self, member: Member) {
        self.inner.write().await.members.insert(member.id, member);
    }

    pub async fn grant_certification(&self, certification: Certification) {
        self.inner
            .write()
            .await
            .certifications
            .entry(certification.member_id)
            .or_default()
            .push(certification);
    }

    /// Records whether the member currently holds a board seat.
    pub async fn set_board_seat(&self, member_id: MemberId, is_current: bool) {
        self.inner.write().await.board_seats.insert(
            member_id,
            BoardMembership {
                member_id,
                is_current,
            },
        );
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Member>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner
            .members
            .values()
            .find(|m| &m.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.inner.read().await.members.get(id).cloned())
    }

    async fn certifications_for(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Certification>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .certifications
            .get(member_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn current_board_seat(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<BoardMembership>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .board_seats
            .get(member_id)
            .filter(|seat| seat.is_current)
            .copied())
    }
}
