//! In-memory adapters for development and tests.

mod event_catalog;
mod member_directory;
mod registration_repository;

pub use event_catalog::InMemoryEventCatalog;
pub use member_directory::InMemoryMemberDirectory;
pub use registration_repository::InMemoryRegistrationRepository;
