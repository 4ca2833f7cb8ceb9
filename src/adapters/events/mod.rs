//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that records envelopes (tests)
//! - `LoggingEventPublisher` - Logs envelopes and drops them (binary)

mod in_memory;
mod logging;

pub use in_memory::InMemoryEventBus;
pub use logging::LoggingEventPublisher;
