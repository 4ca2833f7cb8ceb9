//! HTTP DTOs (Data Transfer Objects) for event and registration endpoints.

use serde::Serialize;

use crate::application::EventDetail;
use crate::domain::event::{Event, EventCategory};
use crate::domain::member::CertificationType;
use crate::domain::registration::{CancellationReceipt, Registration, RegistrationStatus};

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A certification identifier with its display name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CertificationResponse {
    pub id: String,
    pub display_name: String,
}

impl From<&CertificationType> for CertificationResponse {
    fn from(certification: &CertificationType) -> Self {
        Self {
            id: certification.as_str().to_string(),
            display_name: certification.display_name().to_string(),
        }
    }
}

/// Event as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub category: EventCategory,
    /// ISO 8601
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    /// Null means unlimited.
    pub capacity: Option<u32>,
    pub cost_cents: i64,
    pub is_public: bool,
    pub members_only: bool,
    pub board_only: bool,
    pub required_certifications: Vec<CertificationResponse>,
    pub registration_deadline: Option<String>,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            category: event.category,
            start_time: event.start_time.as_datetime().to_rfc3339(),
            end_time: event.end_time.as_datetime().to_rfc3339(),
            location: event.location.clone(),
            capacity: event.capacity,
            cost_cents: event.cost_cents,
            is_public: event.is_public,
            members_only: event.members_only,
            board_only: event.board_only,
            required_certifications: event
                .required_certifications()
                .iter()
                .map(CertificationResponse::from)
                .collect(),
            registration_deadline: event
                .registration_deadline
                .map(|deadline| deadline.as_datetime().to_rfc3339()),
        }
    }
}

/// Upcoming events list.
#[derive(Debug, Clone, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
}

/// A registration as returned to its owner.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub id: String,
    pub event_id: String,
    pub status: RegistrationStatus,
    pub waitlist_position: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
    pub cancelled_at: Option<String>,
    pub refund_percentage: Option<u8>,
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id.to_string(),
            event_id: registration.event_id.to_string(),
            status: registration.status,
            waitlist_position: registration.waitlist_position,
            created_at: registration.created_at.as_datetime().to_rfc3339(),
            updated_at: registration.updated_at.as_datetime().to_rfc3339(),
            cancelled_at: registration
                .cancelled_at
                .map(|at| at.as_datetime().to_rfc3339()),
            refund_percentage: registration.refund_percentage.map(|p| p.value()),
        }
    }
}

/// Event detail for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub can_register: bool,
    /// Denial code when `can_register` is false.
    pub reason: Option<&'static str>,
    pub reason_message: Option<&'static str>,
    pub missing_certifications: Vec<CertificationResponse>,
    pub registration_closed: bool,
    pub confirmed_count: u32,
    pub waitlist_length: u32,
    pub my_registration: Option<RegistrationResponse>,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(detail: EventDetail) -> Self {
        let eligibility = &detail.eligibility;
        Self {
            event: EventResponse::from(&detail.event),
            can_register: eligibility.allowed,
            reason: eligibility.reason.map(|r| r.code()),
            reason_message: eligibility.reason.map(|r| r.user_message()),
            missing_certifications: eligibility
                .missing_certifications
                .iter()
                .map(CertificationResponse::from)
                .collect(),
            registration_closed: detail.registration_closed,
            confirmed_count: detail.confirmed_count,
            waitlist_length: detail.waitlist_length,
            my_registration: detail.registration.as_ref().map(RegistrationResponse::from),
        }
    }
}

/// Response to a successful cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct CancellationResponse {
    pub registration: RegistrationResponse,
    pub refund_percentage: u8,
    /// Whether a waitlisted member was moved into a free slot.
    pub waitlist_promoted: bool,
}

impl From<&CancellationReceipt> for CancellationResponse {
    fn from(receipt: &CancellationReceipt) -> Self {
        Self {
            registration: RegistrationResponse::from(&receipt.registration),
            refund_percentage: receipt.refund_percentage.value(),
            waitlist_promoted: !receipt.promoted.is_empty(),
        }
    }
}

/// The caller's registrations, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationListResponse {
    pub registrations: Vec<RegistrationResponse>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}
