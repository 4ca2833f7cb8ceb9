//! HTTP adapter for event and registration endpoints.
//!
//! - `GET /api/events` - Upcoming events visible to the caller
//! - `GET /api/events/:id` - Event detail, eligibility, and caller's registration
//! - `POST /api/events/:id/register` - Register (or waitlist)
//! - `DELETE /api/events/:id/register` - Cancel registration
//! - `GET /api/me/registrations` - Caller's registration history

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{EventsApiError, EventsAppState};
pub use routes::{events_router, events_routes};
