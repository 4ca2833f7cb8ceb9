//! Event domain module.
//!
//! - `aggregate` - Event entity and defensive requirement parsing
//! - `category` - Closed set of event categories

mod aggregate;
mod category;

pub use aggregate::Event;
pub use category::EventCategory;
