//! AccessContextBuilder - Assembles the caller's AccessContext.
//!
//! The only component that reads collaborator stores for access decisions.
//! Runs before any per-event lock is taken.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::access::AccessContext;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::member::CertificationMatcher;
use crate::ports::MemberDirectory;

/// Builds an [`AccessContext`] from the member directory.
pub struct AccessContextBuilder {
    members: Arc<dyn MemberDirectory>,
}

impl AccessContextBuilder {
    pub fn new(members: Arc<dyn MemberDirectory>) -> Self {
        Self { members }
    }

    /// Context for the given caller as of `now`.
    ///
    /// Expired certifications are dropped here, so the evaluator only ever
    /// sees currently valid types.
    #[instrument(skip(self, user, now), fields(user_id = user.map(UserId::as_str)))]
    pub async fn build(
        &self,
        user: Option<&UserId>,
        now: &Timestamp,
    ) -> Result<AccessContext, DomainError> {
        let Some(user) = user else {
            return Ok(AccessContext::anonymous());
        };

        let ctx = AccessContext::for_user(user.clone());
        let Some(member) = self.members.find_by_user_id(user).await? else {
            return Ok(ctx);
        };

        let (certifications, board_seat) = futures::try_join!(
            self.members.certifications_for(&member.id),
            self.members.current_board_seat(&member.id),
        )?;

        let valid = CertificationMatcher::valid_ids(&certifications, now);
        let is_board_member = board_seat.is_some_and(|seat| seat.is_current);

        Ok(ctx
            .with_member(member)
            .with_certifications(valid)
            .with_board_seat(is_board_member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberDirectory;
    use crate::domain::foundation::MemberId;
    use crate::domain::member::{Certification, CertificationType, Member, MemberStatus};

    async fn directory_with_member() -> (InMemoryMemberDirectory, Member) {
        let directory = InMemoryMemberDirectory::new();
        let member = Member::new(
            MemberId::new(),
            UserId::new("user-jo").unwrap(),
            "Jo",
            MemberStatus::Active,
        );
        directory.insert_member(member.clone()).await;
        (directory, member)
    }

    #[tokio::test]
    async fn anonymous_without_user() {
        let builder = AccessContextBuilder::new(Arc::new(InMemoryMemberDirectory::new()));
        let ctx = builder.build(None, &Timestamp::now()).await.unwrap();
        assert_eq!(ctx, AccessContext::anonymous());
    }

    #[tokio::test]
    async fn user_without_profile_has_no_member() {
        let builder = AccessContextBuilder::new(Arc::new(InMemoryMemberDirectory::new()));
        let user = UserId::new("user-new").unwrap();

        let ctx = builder.build(Some(&user), &Timestamp::now()).await.unwrap();

        assert_eq!(ctx.user(), Some(&user));
        assert!(ctx.member().is_none());
    }

    #[tokio::test]
    async fn drops_expired_certifications() {
        let (directory, member) = directory_with_member().await;
        let now = Timestamp::now();
        for (kind, expires_at) in [("rso", Some(now.minus_days(1))), ("cpr_first_aid", None)] {
            directory
                .grant_certification(Certification {
                    member_id: member.id,
                    certification_type: CertificationType::new(kind),
                    earned_date: now.minus_days(500),
                    expires_at,
                })
                .await;
        }
        let builder = AccessContextBuilder::new(Arc::new(directory));

        let ctx = builder.build(Some(&member.user_id), &now).await.unwrap();

        assert_eq!(ctx.member(), Some(&member));
        assert!(ctx
            .valid_certification_ids()
            .contains(&CertificationType::new("cpr_first_aid")));
        assert!(!ctx.valid_certification_ids().contains(&CertificationType::new("rso")));
    }

    #[tokio::test]
    async fn current_board_seat_sets_flag() {
        let (directory, member) = directory_with_member().await;
        directory.set_board_seat(member.id, true).await;
        let builder = AccessContextBuilder::new(Arc::new(directory));

        let ctx = builder.build(Some(&member.user_id), &Timestamp::now()).await.unwrap();

        assert!(ctx.is_board_member());
    }
}
