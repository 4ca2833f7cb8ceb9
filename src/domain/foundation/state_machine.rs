//! State machine trait for status enums.
//!
//! Registration and member statuses both implement this so that every
//! transition goes through one validated path.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = RegistrationStatus::Waitlisted.transition_to(RegistrationStatus::Registered)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Open,
        Closed,
        Locked,
        Removed,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Door::*;
            matches!(
                (self, target),
                (Open, Closed) | (Closed, Open) | (Closed, Locked) | (Locked, Closed) | (_, Removed)
            ) && *self != Removed
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Door::*;
            match self {
                Open => vec![Closed, Removed],
                Closed => vec![Open, Locked, Removed],
                Locked => vec![Closed, Removed],
                Removed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Door::Closed.transition_to(Door::Locked), Ok(Door::Locked));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Door::Open.transition_to(Door::Locked).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Open to Locked"));
    }

    #[test]
    fn is_terminal_only_without_outgoing_edges() {
        assert!(Door::Removed.is_terminal());
        assert!(!Door::Locked.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for status in [Door::Open, Door::Closed, Door::Locked, Door::Removed] {
            for target in status.valid_transitions() {
                assert!(status.can_transition_to(&target), "{:?} -> {:?}", status, target);
            }
        }
    }
}
