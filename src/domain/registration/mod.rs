//! Event registration domain module.
//!
//! - `status` - Registration lifecycle state machine
//! - `aggregate` - Registration record and its transitions
//! - `ledger` - Capacity accounting per event
//! - `waitlist` - FIFO waitlist per event
//! - `refund` - Time-based cancellation refund policy
//! - `errors` - Outcomes, rejections, and failures
//! - `events` - Notification events for committed transitions

mod aggregate;
mod errors;
mod events;
mod ledger;
mod refund;
mod status;
mod waitlist;

pub use aggregate::Registration;
pub use errors::{
    CancelOutcome, CancellationReceipt, RegisterOutcome, RegistrationError, RegistrationRejection,
};
pub use events::{RegistrationChange, RegistrationEvent};
pub use ledger::CapacityLedger;
pub use refund::{RefundPolicy, DEFAULT_FULL_REFUND_THRESHOLD_HOURS};
pub use status::RegistrationStatus;
pub use waitlist::WaitlistQueue;
