//! Member profile and membership status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, StateMachine, UserId};

/// Membership status of a club member.
///
/// Status is the single source of truth for eligibility; there are
/// no implicit states beyond these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Applicant who has not yet been accepted.
    Prospect,
    /// Accepted, serving the probationary period.
    Probationary,
    /// Full member in good standing.
    Active,
    /// Dues lapsed.
    Inactive,
    /// Temporarily barred by the board.
    Suspended,
    /// Membership ended.
    Terminated,
}

impl MemberStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [MemberStatus; 6] = [
        MemberStatus::Prospect,
        MemberStatus::Probationary,
        MemberStatus::Active,
        MemberStatus::Inactive,
        MemberStatus::Suspended,
        MemberStatus::Terminated,
    ];

    /// Returns true for members in good standing (active or probationary).
    pub fn is_in_good_standing(&self) -> bool {
        matches!(self, MemberStatus::Active | MemberStatus::Probationary)
    }

    /// Returns true for statuses that lost member privileges.
    pub fn is_restricted(&self) -> bool {
        matches!(
            self,
            MemberStatus::Suspended | MemberStatus::Terminated | MemberStatus::Inactive
        )
    }

    /// Stable string form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Prospect => "prospect",
            MemberStatus::Probationary => "probationary",
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Suspended => "suspended",
            MemberStatus::Terminated => "terminated",
        }
    }

    /// Parses the storage form; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        MemberStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl StateMachine for MemberStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MemberStatus::*;
        matches!(
            (self, target),
            // From PROSPECT
            (Prospect, Probationary)
                | (Prospect, Terminated)
            // From PROBATIONARY
                | (Probationary, Active)
                | (Probationary, Inactive)
                | (Probationary, Suspended)
                | (Probationary, Terminated)
            // From ACTIVE
                | (Active, Inactive)
                | (Active, Suspended)
                | (Active, Terminated)
            // From INACTIVE (dues paid again)
                | (Inactive, Active)
                | (Inactive, Suspended)
                | (Inactive, Terminated)
            // From SUSPENDED
                | (Suspended, Active)
                | (Suspended, Terminated)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MemberStatus::*;
        match self {
            Prospect => vec![Probationary, Terminated],
            Probationary => vec![Active, Inactive, Suspended, Terminated],
            Active => vec![Inactive, Suspended, Terminated],
            Inactive => vec![Active, Suspended, Terminated],
            Suspended => vec![Active, Terminated],
            Terminated => vec![],
        }
    }
}

/// A club member profile linked to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    pub display_name: String,
    pub status: MemberStatus,
}

impl Member {
    pub fn new(
        id: MemberId,
        user_id: UserId,
        display_name: impl Into<String>,
        status: MemberStatus,
    ) -> Self {
        Self {
            id,
            user_id,
            display_name: display_name.into(),
            status,
        }
    }
}

/// Current-truth fact about a member's board seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardMembership {
    pub member_id: MemberId,
    pub is_current: bool,
}
