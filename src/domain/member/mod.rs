//! Member domain module.
//!
//! Member profiles, status lifecycle, board seats, and certification grants.

mod certification;
mod profile;

pub use certification::{Certification, CertificationCatalog, CertificationMatcher, CertificationType};
pub use profile::{BoardMembership, Member, MemberStatus};
