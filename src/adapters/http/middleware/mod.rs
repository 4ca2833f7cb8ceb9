//! HTTP middleware for axum.
//!
//! - `auth` - Caller identity extractor
//! - `logging` - Tracing subscriber setup

pub mod auth;
pub mod logging;

pub use auth::{Caller, USER_ID_HEADER};
pub use logging::init_logging;
