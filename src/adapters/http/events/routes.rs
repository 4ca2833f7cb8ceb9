//! Axum router configuration for event and registration endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_registration, get_event, list_events, list_my_registrations, register_for_event,
    EventsAppState,
};

/// Create the events API router.
///
/// # Routes
/// - `GET /events` - Upcoming events visible to the caller
/// - `GET /events/:id` - Event detail with eligibility
/// - `POST /events/:id/register` - Register or join the waitlist
/// - `DELETE /events/:id/register` - Cancel registration
/// - `GET /me/registrations` - Caller's registrations
pub fn events_routes() -> Router<EventsAppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
        .route(
            "/events/:id/register",
            post(register_for_event).delete(cancel_registration),
        )
        .route("/me/registrations", get(list_my_registrations))
}

/// Create the complete router mounted under `/api`, with state applied.
pub fn events_router(state: EventsAppState) -> Router {
    Router::new()
        .nest("/api", events_routes())
        .with_state(state)
}
