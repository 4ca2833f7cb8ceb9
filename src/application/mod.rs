//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Registration commands
    CancelRegistrationCommand, CancelRegistrationHandler, RegisterForEventCommand,
    RegisterForEventHandler,
    // Event queries
    EventDetail, GetEventHandler, GetEventQuery, ListEventsHandler, ListEventsQuery,
    ListMyRegistrationsHandler, ListMyRegistrationsQuery,
    // Shared services
    AccessContextBuilder, Admission, RegistrationEngine,
};
