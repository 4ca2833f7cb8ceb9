//! EventPublisher port - Interface for dispatching notification events.
//!
//! The registration engine emits `RegistrationEvent`s wrapped in
//! `EventEnvelope`s. Delivery (email, SMS, audit) subscribes downstream and
//! is never called directly.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - `publish_all` preserves the given order
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
