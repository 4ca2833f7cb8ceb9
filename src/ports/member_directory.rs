//! Member directory port (read-only).
//!
//! Member profiles, certification grants, and board seats are owned by the
//! membership administration side of the club. The registration engine
//! only reads them to build an `AccessContext`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId, UserId};
use crate::domain::member::{BoardMembership, Certification, Member};

/// Read access to member data.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Member profile linked to an authenticated user, if any.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Member>, DomainError>;

    /// Member profile by id.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Every certification grant held by the member, expired ones included.
    async fn certifications_for(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Certification>, DomainError>;

    /// The member's current board seat, if they hold one.
    async fn current_board_seat(
        &self,
        member_id: &MemberId,
    ) -> Result<Option<BoardMembership>, DomainError>;
}
