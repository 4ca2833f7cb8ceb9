//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event bus implementations
//! - `http` - REST API (axum)
//! - `memory` - In-memory stores for development and tests
//! - `postgres` - PostgreSQL stores (sqlx)

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;

pub use events::{InMemoryEventBus, LoggingEventPublisher};
