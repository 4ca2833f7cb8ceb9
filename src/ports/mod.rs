//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Read Ports
//!
//! - `MemberDirectory` - Member profiles, certifications, board seats
//! - `EventReader` - Event catalog
//!
//! ## Write Ports
//!
//! - `RegistrationRepository` - Registration records
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Notification event dispatch

mod event_publisher;
mod event_reader;
mod member_directory;
mod registration_repository;

pub use event_publisher::EventPublisher;
pub use event_reader::EventReader;
pub use member_directory::MemberDirectory;
pub use registration_repository::RegistrationRepository;
