//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod registration;

pub use registration::{
    AccessContextBuilder, Admission, CancelRegistrationCommand, CancelRegistrationHandler, EventDetail,
    GetEventHandler, GetEventQuery, ListEventsHandler, ListEventsQuery,
    ListMyRegistrationsHandler, ListMyRegistrationsQuery, RegisterForEventCommand,
    RegisterForEventHandler, RegistrationEngine, DEFAULT_EVENT_LIST_LIMIT,
};
