//! Event aggregate.
//!
//! Events are produced by a separate ingestion process and are read-only to
//! the registration engine. Upstream data is trusted only as far as needed:
//! an inverted time range or a malformed certification requirement must
//! never make registration fail.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp};
use crate::domain::member::CertificationType;

use super::EventCategory;

/// A schedulable club activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub category: EventCategory,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: String,

    /// Maximum confirmed participants. `None` is unlimited.
    pub capacity: Option<u32>,

    /// Cost in cents.
    pub cost_cents: i64,

    pub is_public: bool,
    pub members_only: bool,

    /// Overrides both `is_public` and `members_only`.
    pub board_only: bool,

    /// Raw serialized list of certification-type identifiers.
    pub requires_certification: Option<String>,

    pub registration_deadline: Option<Timestamp>,
}

impl Event {
    /// Certification types required to register, in declared order.
    ///
    /// Anything other than a JSON array of strings is treated as no
    /// requirement. Blank entries and duplicates are dropped.
    pub fn required_certifications(&self) -> Vec<CertificationType> {
        let Some(raw) = self.requires_certification.as_deref() else {
            return Vec::new();
        };

        let Ok(ids) = serde_json::from_str::<Vec<String>>(raw) else {
            return Vec::new();
        };

        let mut required: Vec<CertificationType> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.trim();
            if id.is_empty() {
                continue;
            }
            let cert = CertificationType::new(id);
            if !required.contains(&cert) {
                required.push(cert);
            }
        }
        required
    }

    /// True once registration should no longer be accepted.
    ///
    /// Registration closes after the deadline, or once the event has started
    /// when no deadline is set.
    pub fn is_registration_closed(&self, now: &Timestamp) -> bool {
        match &self.registration_deadline {
            Some(deadline) => now.is_after(deadline),
            None => !now.is_before(&self.start_time),
        }
    }

    /// True when the time range is well-formed.
    pub fn has_valid_time_range(&self) -> bool {
        self.end_time.is_after(&self.start_time)
    }
}
