//! HTTP adapters - REST API implementations.

pub mod events;
pub mod middleware;

pub use events::{events_router, EventsAppState};
