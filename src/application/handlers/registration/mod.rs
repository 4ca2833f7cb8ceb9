//! Event registration command and query handlers.

mod access_context_builder;
mod cancel_registration;
mod get_event;
mod list_events;
mod list_my_registrations;
mod notifications;
mod register_for_event;
mod registration_engine;

pub use access_context_builder::AccessContextBuilder;
pub use cancel_registration::{CancelRegistrationCommand, CancelRegistrationHandler};
pub use get_event::{EventDetail, GetEventHandler, GetEventQuery};
pub use list_events::{ListEventsHandler, ListEventsQuery, DEFAULT_EVENT_LIST_LIMIT};
pub use list_my_registrations::{ListMyRegistrationsHandler, ListMyRegistrationsQuery};
pub(crate) use notifications::publish_committed;
pub use register_for_event::{RegisterForEventCommand, RegisterForEventHandler};
pub use registration_engine::{Admission, RegistrationEngine};
