//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `member` - Member profiles, status lifecycle, certifications
//! - `event` - Club events and their categories
//! - `access` - View and registration eligibility rules
//! - `registration` - Registration lifecycle, capacity, waitlist, refunds

pub mod access;
pub mod event;
pub mod foundation;
pub mod member;
pub mod registration;
