//! Registration outcomes and errors.
//!
//! Access denials and state conflicts are ordinary outcomes, returned inside
//! [`RegisterOutcome`] / [`CancelOutcome`]. Only collaborator failures and
//! broken invariants surface as [`RegistrationError`].
//!
//! # HTTP Status Mapping
//!
//! | Outcome | HTTP Status |
//! |---------|-------------|
//! | Denied(AuthRequired) | 401 |
//! | Denied(other) | 403 |
//! | AlreadyRegistered | 409 |
//! | RegistrationClosed | 409 |
//! | NotRegistered | 404 |
//! | EventNotFound | 404 |
//! | Infrastructure | 503 |
//! | InvariantViolation | 500 |

use thiserror::Error;

use crate::domain::access::{DenialReason, Eligibility};
use crate::domain::foundation::{DomainError, Percentage};
use crate::domain::member::CertificationType;

use super::{Registration, RegistrationStatus};

/// Why a register or cancel request was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationRejection {
    Denied {
        reason: DenialReason,
        missing_certifications: Vec<CertificationType>,
    },
    AlreadyRegistered,
    NotRegistered,
    RegistrationClosed,
    EventNotFound,
}

impl RegistrationRejection {
    pub fn denied(reason: DenialReason) -> Self {
        RegistrationRejection::Denied {
            reason,
            missing_certifications: Vec::new(),
        }
    }

    /// Converts a failed eligibility check. Returns `None` when allowed.
    pub fn from_eligibility(eligibility: Eligibility) -> Option<Self> {
        if eligibility.allowed {
            return None;
        }
        let reason = eligibility.reason.unwrap_or(DenialReason::NoAccess);
        Some(RegistrationRejection::Denied {
            reason,
            missing_certifications: eligibility.missing_certifications,
        })
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationRejection::Denied { reason, .. } => reason.code(),
            RegistrationRejection::AlreadyRegistered => "ALREADY_REGISTERED",
            RegistrationRejection::NotRegistered => "NOT_REGISTERED",
            RegistrationRejection::RegistrationClosed => "REGISTRATION_CLOSED",
            RegistrationRejection::EventNotFound => "EVENT_NOT_FOUND",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RegistrationRejection::Denied { reason, .. } => reason.user_message(),
            RegistrationRejection::AlreadyRegistered => {
                "You are already registered or waitlisted for this event."
            }
            RegistrationRejection::NotRegistered => "You are not registered for this event.",
            RegistrationRejection::RegistrationClosed => "Registration for this event is closed.",
            RegistrationRejection::EventNotFound => "Event not found.",
        }
    }
}

/// Failures that abort a registration operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A storage or collaborator call failed. Not retried inside the engine.
    #[error("infrastructure failure: {0}")]
    Infrastructure(String),

    /// In-memory bookkeeping and persisted records disagree.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        RegistrationError::Infrastructure(err.to_string())
    }
}

/// Result of a register request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(Registration),
    /// Added to the waitlist; `waitlist_position` is set.
    Waitlisted(Registration),
    Rejected(RegistrationRejection),
}

impl RegisterOutcome {
    pub fn registration(&self) -> Option<&Registration> {
        match self {
            RegisterOutcome::Registered(r) | RegisterOutcome::Waitlisted(r) => Some(r),
            RegisterOutcome::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, RegisterOutcome::Rejected(_))
    }
}

/// Details of a committed cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationReceipt {
    /// The cancelled registration.
    pub registration: Registration,
    /// Status held before cancellation.
    pub previous_status: RegistrationStatus,
    pub refund_percentage: Percentage,
    /// Waitlisted registrations moved into free slots, in queue order.
    pub promoted: Vec<Registration>,
}

/// Result of a cancel request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled(CancellationReceipt),
    Rejected(RegistrationRejection),
}
