//! Access control for club events.
//!
//! - `context` - Immutable per-request caller context
//! - `evaluator` - Pure view and registration eligibility rules

mod context;
mod evaluator;

pub use context::AccessContext;
pub use evaluator::{AccessEvaluator, DenialReason, Eligibility};
