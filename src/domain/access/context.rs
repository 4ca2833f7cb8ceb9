//! Request-scoped access context.

use std::collections::BTreeSet;

use crate::domain::foundation::UserId;
use crate::domain::member::{CertificationType, Member, MemberStatus};

/// Everything the evaluator needs to know about the caller.
///
/// Built once per request before any decision is made and passed by value
/// or reference afterwards. There is no ambient caller state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    user: Option<UserId>,
    member: Option<Member>,
    valid_certification_ids: BTreeSet<CertificationType>,
    is_board_member: bool,
}

impl AccessContext {
    /// Context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated user without a member profile.
    pub fn for_user(user: UserId) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    pub fn with_certifications<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = CertificationType>,
    {
        self.valid_certification_ids = ids.into_iter().collect();
        self
    }

    pub fn with_board_seat(mut self, is_board_member: bool) -> Self {
        self.is_board_member = is_board_member;
        self
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    pub fn member_status(&self) -> Option<MemberStatus> {
        self.member.as_ref().map(|m| m.status)
    }

    pub fn valid_certification_ids(&self) -> &BTreeSet<CertificationType> {
        &self.valid_certification_ids
    }

    pub fn is_board_member(&self) -> bool {
        self.is_board_member
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;

    #[test]
    fn anonymous_context_is_empty() {
        let ctx = AccessContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert!(ctx.member().is_none());
        assert!(ctx.valid_certification_ids().is_empty());
        assert!(!ctx.is_board_member());
    }

    #[test]
    fn builder_sets_every_field() {
        let user = UserId::new("user-7").unwrap();
        let member = Member::new(MemberId::new(), user.clone(), "Pat", MemberStatus::Active);

        let ctx = AccessContext::for_user(user.clone())
            .with_member(member.clone())
            .with_certifications([CertificationType::new("rso"), CertificationType::new("rso")])
            .with_board_seat(true);

        assert_eq!(ctx.user(), Some(&user));
        assert_eq!(ctx.member(), Some(&member));
        assert_eq!(ctx.member_status(), Some(MemberStatus::Active));
        assert_eq!(ctx.valid_certification_ids().len(), 1);
        assert!(ctx.is_board_member());
    }
}
