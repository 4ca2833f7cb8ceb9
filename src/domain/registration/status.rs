//! Registration status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of an event registration.
///
/// `Unregistered` is never persisted. It stands for "no record yet" so that
/// the transition table covers every state.
///
/// ```text
/// Unregistered ──► Registered ──► Cancelled
///      │               ▲
///      └─► Waitlisted ─┴────────► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Unregistered,
    Registered,
    Waitlisted,
    Cancelled,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 4] = [
        RegistrationStatus::Unregistered,
        RegistrationStatus::Registered,
        RegistrationStatus::Waitlisted,
        RegistrationStatus::Cancelled,
    ];

    /// Registered or waitlisted.
    pub fn is_active(&self) -> bool {
        matches!(self, RegistrationStatus::Registered | RegistrationStatus::Waitlisted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Unregistered => "unregistered",
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Waitlisted => "waitlisted",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        RegistrationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for RegistrationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RegistrationStatus::*;
        matches!(
            (self, target),
            (Unregistered, Registered)
                | (Unregistered, Waitlisted)
                | (Waitlisted, Registered)
                | (Waitlisted, Cancelled)
                | (Registered, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RegistrationStatus::*;
        match self {
            Unregistered => vec![Registered, Waitlisted],
            Waitlisted => vec![Registered, Cancelled],
            Registered => vec![Cancelled],
            Cancelled => vec![],
        }
    }
}
