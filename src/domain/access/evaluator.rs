//! View and registration eligibility rules.
//!
//! Both decisions are pure functions of an [`Event`] and an
//! [`AccessContext`]. Rules are evaluated in order and the first match wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::event::Event;
use crate::domain::member::{CertificationMatcher, CertificationType, MemberStatus};

use super::AccessContext;

/// Why a caller may not register for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    /// Caller cannot see the event at all.
    NoAccess,
    AuthRequired,
    NoMemberProfile,
    Suspended,
    Terminated,
    /// Inactive member whose dues have lapsed.
    DuesLapsed,
    /// Members-only event and the caller is still a prospect.
    ProspectOnlyRestricted,
    MembershipNotActive,
    MissingCertifications,
}

impl DenialReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            DenialReason::NoAccess => "NO_ACCESS",
            DenialReason::AuthRequired => "AUTH_REQUIRED",
            DenialReason::NoMemberProfile => "NO_MEMBER_PROFILE",
            DenialReason::Suspended => "SUSPENDED",
            DenialReason::Terminated => "TERMINATED",
            DenialReason::DuesLapsed => "DUES_LAPSED",
            DenialReason::ProspectOnlyRestricted => "PROSPECT_ONLY_RESTRICTED",
            DenialReason::MembershipNotActive => "MEMBERSHIP_NOT_ACTIVE",
            DenialReason::MissingCertifications => "MISSING_CERTIFICATIONS",
        }
    }

    /// User-facing explanation.
    pub fn user_message(&self) -> &'static str {
        match self {
            DenialReason::NoAccess => "You do not have access to this event.",
            DenialReason::AuthRequired => "Please sign in to register for events.",
            DenialReason::NoMemberProfile => "A member profile is required to register.",
            DenialReason::Suspended => "Your membership is currently suspended.",
            DenialReason::Terminated => "Your membership has been terminated.",
            DenialReason::DuesLapsed => "Your dues have lapsed. Renew to register for events.",
            DenialReason::ProspectOnlyRestricted => {
                "This event is open to members only. Prospects may attend education and club events."
            }
            DenialReason::MembershipNotActive => "An active membership is required for this event.",
            DenialReason::MissingCertifications => {
                "You are missing certifications required for this event."
            }
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of a registration-eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub allowed: bool,
    pub reason: Option<DenialReason>,
    /// Required certifications the caller lacks, in requirement order.
    pub missing_certifications: Vec<CertificationType>,
}

impl Eligibility {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            missing_certifications: Vec::new(),
        }
    }

    pub fn denied(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            missing_certifications: Vec::new(),
        }
    }

    pub fn missing(certifications: Vec<CertificationType>) -> Self {
        Self {
            allowed: false,
            reason: Some(DenialReason::MissingCertifications),
            missing_certifications: certifications,
        }
    }
}

/// Pure eligibility decisions. No I/O.
pub struct AccessEvaluator;

impl AccessEvaluator {
    /// Whether the caller may see the event.
    pub fn can_view(event: &Event, ctx: &AccessContext) -> bool {
        if event.board_only {
            return ctx.is_board_member();
        }
        if event.is_public {
            return true;
        }
        if !ctx.is_authenticated() {
            return false;
        }
        let Some(status) = ctx.member_status() else {
            return false;
        };

        match status {
            MemberStatus::Prospect => event.category.is_open_to_prospects(),
            MemberStatus::Suspended | MemberStatus::Terminated | MemberStatus::Inactive => {
                !event.members_only
            }
            MemberStatus::Active | MemberStatus::Probationary => true,
        }
    }

    /// Whether the caller may register, and if not, why.
    pub fn can_register(event: &Event, ctx: &AccessContext) -> Eligibility {
        if !Self::can_view(event, ctx) {
            return Eligibility::denied(DenialReason::NoAccess);
        }
        if !ctx.is_authenticated() {
            return Eligibility::denied(DenialReason::AuthRequired);
        }
        let Some(status) = ctx.member_status() else {
            return Eligibility::denied(DenialReason::NoMemberProfile);
        };

        match status {
            MemberStatus::Suspended => return Eligibility::denied(DenialReason::Suspended),
            MemberStatus::Terminated => return Eligibility::denied(DenialReason::Terminated),
            MemberStatus::Inactive => return Eligibility::denied(DenialReason::DuesLapsed),
            MemberStatus::Prospect | MemberStatus::Probationary | MemberStatus::Active => {}
        }

        if event.members_only && !status.is_in_good_standing() {
            let reason = if status == MemberStatus::Prospect {
                DenialReason::ProspectOnlyRestricted
            } else {
                DenialReason::MembershipNotActive
            };
            return Eligibility::denied(reason);
        }

        let required = event.required_certifications();
        let missing = CertificationMatcher::missing(&required, ctx.valid_certification_ids());
        if !missing.is_empty() {
            return Eligibility::missing(missing);
        }

        Eligibility::allowed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventCategory;
    use crate::domain::foundation::{EventId, MemberId, Timestamp, UserId};
    use crate::domain::member::Member;
    use proptest::prelude::*;

    // ════════════════════════════════════════════════════════════════════════
    // Fixtures
    // ════════════════════════════════════════════════════════════════════════

    fn event(category: EventCategory) -> Event {
        let start = Timestamp::now().add_days(10);
        Event {
            id: EventId::new(),
            title: "Event".to_string(),
            category,
            start_time: start,
            end_time: start.add_hours(3),
            location: "Clubhouse".to_string(),
            capacity: None,
            cost_cents: 0,
            is_public: false,
            members_only: false,
            board_only: false,
            requires_certification: None,
            registration_deadline: None,
        }
    }

    fn ctx_with_status(status: MemberStatus) -> AccessContext {
        let user = UserId::new("user-1").unwrap();
        let member = Member::new(MemberId::new(), user.clone(), "Sam", status);
        AccessContext::for_user(user).with_member(member)
    }

    // ════════════════════════════════════════════════════════════════════════
    // can_view
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn board_only_overrides_public() {
        let mut e = event(EventCategory::Meeting);
        e.board_only = true;
        e.is_public = true;

        assert!(!AccessEvaluator::can_view(&e, &AccessContext::anonymous()));
        assert!(!AccessEvaluator::can_view(&e, &ctx_with_status(MemberStatus::Active)));
        assert!(AccessEvaluator::can_view(
            &e,
            &ctx_with_status(MemberStatus::Active).with_board_seat(true)
        ));
    }

    #[test]
    fn public_event_is_visible_to_anonymous() {
        let mut e = event(EventCategory::Match);
        e.is_public = true;
        assert!(AccessEvaluator::can_view(&e, &AccessContext::anonymous()));
    }

    #[test]
    fn private_event_hidden_from_anonymous_and_profileless_users() {
        let e = event(EventCategory::Education);
        assert!(!AccessEvaluator::can_view(&e, &AccessContext::anonymous()));
        let ctx = AccessContext::for_user(UserId::new("u").unwrap());
        assert!(!AccessEvaluator::can_view(&e, &ctx));
    }

    #[test]
    fn prospects_see_only_education_and_club_events() {
        let ctx = ctx_with_status(MemberStatus::Prospect);
        assert!(AccessEvaluator::can_view(&event(EventCategory::Education), &ctx));
        assert!(AccessEvaluator::can_view(&event(EventCategory::ClubEvent), &ctx));
        assert!(!AccessEvaluator::can_view(&event(EventCategory::Match), &ctx));
        assert!(!AccessEvaluator::can_view(&event(EventCategory::WorkDay), &ctx));
    }

    #[test]
    fn restricted_members_lose_members_only_events() {
        let mut e = event(EventCategory::Match);
        for status in [MemberStatus::Suspended, MemberStatus::Terminated, MemberStatus::Inactive] {
            let ctx = ctx_with_status(status);
            e.members_only = false;
            assert!(AccessEvaluator::can_view(&e, &ctx));
            e.members_only = true;
            assert!(!AccessEvaluator::can_view(&e, &ctx));
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // can_register
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn invisible_event_is_no_access() {
        let e = event(EventCategory::Match);
        let result = AccessEvaluator::can_register(&e, &AccessContext::anonymous());
        assert_eq!(result, Eligibility::denied(DenialReason::NoAccess));
    }

    #[test]
    fn public_event_requires_authentication_to_register() {
        let mut e = event(EventCategory::ClubEvent);
        e.is_public = true;

        let result = AccessEvaluator::can_register(&e, &AccessContext::anonymous());
        assert_eq!(result.reason, Some(DenialReason::AuthRequired));

        let ctx = AccessContext::for_user(UserId::new("u").unwrap());
        let result = AccessEvaluator::can_register(&e, &ctx);
        assert_eq!(result.reason, Some(DenialReason::NoMemberProfile));
    }

    #[test]
    fn restricted_statuses_have_specific_reasons() {
        let mut e = event(EventCategory::ClubEvent);
        e.is_public = true;

        let cases = [
            (MemberStatus::Suspended, DenialReason::Suspended),
            (MemberStatus::Terminated, DenialReason::Terminated),
            (MemberStatus::Inactive, DenialReason::DuesLapsed),
        ];
        for (status, reason) in cases {
            let result = AccessEvaluator::can_register(&e, &ctx_with_status(status));
            assert_eq!(result.reason, Some(reason), "status {:?}", status);
        }
    }

    #[test]
    fn prospect_cannot_register_for_members_only_event() {
        let mut e = event(EventCategory::Education);
        e.members_only = true;

        let result = AccessEvaluator::can_register(&e, &ctx_with_status(MemberStatus::Prospect));
        assert_eq!(result.reason, Some(DenialReason::ProspectOnlyRestricted));

        let result = AccessEvaluator::can_register(&e, &ctx_with_status(MemberStatus::Probationary));
        assert!(result.allowed);
    }

    #[test]
    fn expired_certification_reports_missing_requirement() {
        let mut e = event(EventCategory::Match);
        e.requires_certification = Some(r#"["rso"]"#.to_string());

        // Expired grants never reach the context.
        let result = AccessEvaluator::can_register(&e, &ctx_with_status(MemberStatus::Active));

        assert!(!result.allowed);
        assert_eq!(result.reason, Some(DenialReason::MissingCertifications));
        assert_eq!(result.missing_certifications, vec![CertificationType::new("rso")]);
    }

    #[test]
    fn missing_certifications_keep_requirement_order() {
        let mut e = event(EventCategory::Match);
        e.requires_certification = Some(r#"["chief_rso", "cpr_first_aid", "rso"]"#.to_string());
        let ctx = ctx_with_status(MemberStatus::Active)
            .with_certifications([CertificationType::new("cpr_first_aid")]);

        let result = AccessEvaluator::can_register(&e, &ctx);
        assert_eq!(
            result.missing_certifications,
            vec![CertificationType::new("chief_rso"), CertificationType::new("rso")]
        );
    }

    #[test]
    fn malformed_requirement_allows_active_member() {
        let mut e = event(EventCategory::Match);
        e.requires_certification = Some("not-json-list".to_string());

        let result = AccessEvaluator::can_register(&e, &ctx_with_status(MemberStatus::Active));
        assert_eq!(result, Eligibility::allowed());
    }

    #[test]
    fn denial_reason_serializes_as_code() {
        for reason in [DenialReason::DuesLapsed, DenialReason::ProspectOnlyRestricted] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.code()));
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════

    const CERT_POOL: [&str; 4] = ["rso", "chief_rso", "cpr_first_aid", "nra_basic_pistol"];

    fn arb_cert_ids() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(CERT_POOL.to_vec(), 0..=CERT_POOL.len())
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        (
            prop::sample::select(EventCategory::ALL.to_vec()),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(arb_cert_ids()),
        )
            .prop_map(|(category, is_public, members_only, board_only, required)| {
                let mut e = event(category);
                e.is_public = is_public;
                e.members_only = members_only;
                e.board_only = board_only;
                e.requires_certification =
                    required.map(|ids| serde_json::to_string(&ids).unwrap_or_default());
                e
            })
    }

    fn arb_context() -> impl Strategy<Value = AccessContext> {
        (
            any::<bool>(),
            proptest::option::of(prop::sample::select(MemberStatus::ALL.to_vec())),
            arb_cert_ids(),
            any::<bool>(),
        )
            .prop_map(|(authenticated, status, certs, board)| {
                let ctx = if authenticated {
                    let user = UserId::new("prop-user").unwrap();
                    let ctx = AccessContext::for_user(user.clone());
                    match status {
                        Some(status) => {
                            ctx.with_member(Member::new(MemberId::new(), user, "Prop", status))
                        }
                        None => ctx,
                    }
                } else {
                    AccessContext::anonymous()
                };
                ctx.with_certifications(certs.into_iter().map(CertificationType::new))
                    .with_board_seat(board)
            })
    }

    proptest! {
        #[test]
        fn board_only_visibility_tracks_board_seat(mut e in arb_event(), ctx in arb_context()) {
            e.board_only = true;
            prop_assert_eq!(AccessEvaluator::can_view(&e, &ctx), ctx.is_board_member());
        }

        #[test]
        fn public_events_are_always_visible(mut e in arb_event(), ctx in arb_context()) {
            e.board_only = false;
            e.is_public = true;
            prop_assert!(AccessEvaluator::can_view(&e, &ctx));
        }

        #[test]
        fn prospect_visibility_follows_category(mut e in arb_event(), board in any::<bool>()) {
            e.board_only = false;
            e.is_public = false;
            let ctx = ctx_with_status(MemberStatus::Prospect).with_board_seat(board);
            prop_assert_eq!(
                AccessEvaluator::can_view(&e, &ctx),
                e.category.is_open_to_prospects()
            );
        }

        #[test]
        fn adding_a_certification_never_revokes_eligibility(
            e in arb_event(),
            ctx in arb_context(),
            extra in prop::sample::select(CERT_POOL.to_vec()),
        ) {
            let before = AccessEvaluator::can_register(&e, &ctx);
            let mut certs = ctx.valid_certification_ids().clone();
            certs.insert(CertificationType::new(extra));
            let richer = ctx.clone().with_certifications(certs);
            let after = AccessEvaluator::can_register(&e, &richer);

            if before.allowed {
                prop_assert!(after.allowed);
            }
        }

        #[test]
        fn allowed_implies_visible(e in arb_event(), ctx in arb_context()) {
            if AccessEvaluator::can_register(&e, &ctx).allowed {
                prop_assert!(AccessEvaluator::can_view(&e, &ctx));
            }
        }
    }
}
