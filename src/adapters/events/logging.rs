//! Logging event publisher.
//!
//! Writes each envelope to the `tracing` output and drops it. Used by the
//! binary until an external notification transport is wired in.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Publisher that logs envelopes and retains nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            envelope_id = %event.envelope_id,
            user_id = event.metadata.user_id.as_deref(),
            payload = %event.payload,
            "registration notification"
        );
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EnvelopeId, EventMetadata, Timestamp};
    use serde_json::json;

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope {
            envelope_id: EnvelopeId::new(),
            event_type: event_type.to_string(),
            schema_version: 1,
            aggregate_id: "reg-1".to_string(),
            aggregate_type: "Registration".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({ "change": { "kind": "registered" } }),
            metadata: EventMetadata::default(),
        }
    }

    #[tokio::test]
    async fn publishing_always_succeeds() {
        let publisher = LoggingEventPublisher::new();

        assert!(publisher.publish(envelope("registration.registered.v1")).await.is_ok());
        assert!(publisher
            .publish_all(vec![
                envelope("registration.cancelled.v1"),
                envelope("registration.promoted.v1"),
            ])
            .await
            .is_ok());
    }
}
