//! HTTP handlers for event and registration endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::adapters::http::middleware::Caller;
use crate::application::{
    AccessContextBuilder, CancelRegistrationCommand, CancelRegistrationHandler, GetEventHandler,
    GetEventQuery, ListEventsHandler, ListEventsQuery, ListMyRegistrationsHandler,
    ListMyRegistrationsQuery, RegisterForEventCommand, RegisterForEventHandler,
    RegistrationEngine,
};
use crate::domain::access::DenialReason;
use crate::domain::foundation::EventId;
use crate::domain::registration::{
    CancelOutcome, RefundPolicy, RegisterOutcome, RegistrationError, RegistrationRejection,
};
use crate::ports::{EventPublisher, EventReader, MemberDirectory, RegistrationRepository};

use super::dto::{
    CancellationResponse, CertificationResponse, ErrorResponse, EventDetailResponse,
    EventListResponse, EventResponse, RegistrationListResponse, RegistrationResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the events API.
///
/// The engine and access builder are shared so that every request for an
/// event goes through the same per-event lock.
#[derive(Clone)]
pub struct EventsAppState {
    pub events: Arc<dyn EventReader>,
    pub members: Arc<dyn MemberDirectory>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub access: Arc<AccessContextBuilder>,
    pub engine: Arc<RegistrationEngine>,
}

impl EventsAppState {
    pub fn new(
        events: Arc<dyn EventReader>,
        members: Arc<dyn MemberDirectory>,
        registrations: Arc<dyn RegistrationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        refund_policy: RefundPolicy,
    ) -> Self {
        let access = Arc::new(AccessContextBuilder::new(members.clone()));
        let engine = Arc::new(RegistrationEngine::new(registrations.clone(), refund_policy));
        Self {
            events,
            members,
            registrations,
            event_publisher,
            access,
            engine,
        }
    }

    pub fn list_events_handler(&self) -> ListEventsHandler {
        ListEventsHandler::new(self.events.clone(), self.access.clone())
    }

    pub fn get_event_handler(&self) -> GetEventHandler {
        GetEventHandler::new(
            self.events.clone(),
            self.access.clone(),
            self.registrations.clone(),
        )
    }

    pub fn register_handler(&self) -> RegisterForEventHandler {
        RegisterForEventHandler::new(
            self.events.clone(),
            self.access.clone(),
            self.engine.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn cancel_handler(&self) -> CancelRegistrationHandler {
        CancelRegistrationHandler::new(
            self.events.clone(),
            self.members.clone(),
            self.engine.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn my_registrations_handler(&self) -> ListMyRegistrationsHandler {
        ListMyRegistrationsHandler::new(self.members.clone(), self.registrations.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/events - Upcoming events visible to the caller
pub async fn list_events(
    State(state): State<EventsAppState>,
    Caller(user): Caller,
) -> Result<impl IntoResponse, EventsApiError> {
    let events = state
        .list_events_handler()
        .handle(ListEventsQuery::for_caller(user))
        .await?;

    Ok(Json(EventListResponse {
        events: events.iter().map(EventResponse::from).collect(),
    }))
}

/// GET /api/events/:id - Event detail with the caller's eligibility
pub async fn get_event(
    State(state): State<EventsAppState>,
    Caller(user): Caller,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, EventsApiError> {
    let detail = state
        .get_event_handler()
        .handle(GetEventQuery {
            event_id,
            user_id: user,
        })
        .await?
        .ok_or(EventsApiError::Rejected(RegistrationRejection::EventNotFound))?;

    Ok(Json(EventDetailResponse::from(detail)))
}

/// GET /api/me/registrations - The caller's registrations
pub async fn list_my_registrations(
    State(state): State<EventsAppState>,
    Caller(user): Caller,
) -> Result<impl IntoResponse, EventsApiError> {
    let user_id = user.ok_or(EventsApiError::Rejected(RegistrationRejection::denied(
        DenialReason::AuthRequired,
    )))?;

    let registrations = state
        .my_registrations_handler()
        .handle(ListMyRegistrationsQuery { user_id })
        .await?;

    Ok(Json(RegistrationListResponse {
        registrations: registrations.iter().map(RegistrationResponse::from).collect(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/events/:id/register - Register or join the waitlist
pub async fn register_for_event(
    State(state): State<EventsAppState>,
    Caller(user): Caller,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, EventsApiError> {
    let outcome = state
        .register_handler()
        .handle(RegisterForEventCommand {
            event_id,
            user_id: user,
        })
        .await?;

    match outcome {
        RegisterOutcome::Registered(registration) | RegisterOutcome::Waitlisted(registration) => {
            Ok((
                StatusCode::CREATED,
                Json(RegistrationResponse::from(&registration)),
            ))
        }
        RegisterOutcome::Rejected(rejection) => Err(EventsApiError::Rejected(rejection)),
    }
}

/// DELETE /api/events/:id/register - Cancel the caller's registration
pub async fn cancel_registration(
    State(state): State<EventsAppState>,
    Caller(user): Caller,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, EventsApiError> {
    let outcome = state
        .cancel_handler()
        .handle(CancelRegistrationCommand {
            event_id,
            user_id: user,
        })
        .await?;

    match outcome {
        CancelOutcome::Cancelled(receipt) => Ok(Json(CancellationResponse::from(&receipt))),
        CancelOutcome::Rejected(rejection) => Err(EventsApiError::Rejected(rejection)),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts rejections and failures to HTTP responses.
#[derive(Debug)]
pub enum EventsApiError {
    Rejected(RegistrationRejection),
    Failed(RegistrationError),
}

impl From<RegistrationError> for EventsApiError {
    fn from(err: RegistrationError) -> Self {
        Self::Failed(err)
    }
}

impl EventsApiError {
    fn status(&self) -> StatusCode {
        match self {
            EventsApiError::Rejected(rejection) => match rejection {
                RegistrationRejection::Denied {
                    reason: DenialReason::AuthRequired,
                    ..
                } => StatusCode::UNAUTHORIZED,
                RegistrationRejection::Denied { .. } => StatusCode::FORBIDDEN,
                RegistrationRejection::AlreadyRegistered
                | RegistrationRejection::RegistrationClosed => StatusCode::CONFLICT,
                RegistrationRejection::NotRegistered | RegistrationRejection::EventNotFound => {
                    StatusCode::NOT_FOUND
                }
            },
            EventsApiError::Failed(RegistrationError::Infrastructure(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            EventsApiError::Failed(RegistrationError::InvariantViolation(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for EventsApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            EventsApiError::Rejected(RegistrationRejection::Denied {
                reason,
                missing_certifications,
            }) if !missing_certifications.is_empty() => {
                let missing: Vec<CertificationResponse> = missing_certifications
                    .iter()
                    .map(CertificationResponse::from)
                    .collect();
                ErrorResponse::with_details(
                    reason.code(),
                    reason.user_message(),
                    json!({ "missing_certifications": missing }),
                )
            }
            EventsApiError::Rejected(rejection) => {
                ErrorResponse::new(rejection.code(), rejection.message())
            }
            EventsApiError::Failed(RegistrationError::Infrastructure(detail)) => {
                tracing::error!(error = %detail, "registration request failed");
                ErrorResponse::new(
                    "SERVICE_UNAVAILABLE",
                    "The service is temporarily unavailable. Please try again.",
                )
            }
            EventsApiError::Failed(RegistrationError::InvariantViolation(_)) => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred.")
            }
        };
        (status, Json(body)).into_response()
    }
}
