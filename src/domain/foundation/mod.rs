//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the event
//! envelope that form the vocabulary of the club events domain.

mod errors;
mod events;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EnvelopeId, EventEnvelope, EventMetadata, SerializableDomainEvent};
pub use ids::{EventId, MemberId, RegistrationId, UserId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
