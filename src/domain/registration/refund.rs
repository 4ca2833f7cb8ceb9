//! Cancellation refund policy.

use chrono::Duration;

use crate::domain::foundation::{Percentage, Timestamp};

/// Default notice required for a full refund.
pub const DEFAULT_FULL_REFUND_THRESHOLD_HOURS: i64 = 48;

/// Maps the notice given before an event to a refund percentage.
///
/// Cancelling at least `full_refund_threshold` before the start refunds
/// 100%. Anything later refunds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundPolicy {
    full_refund_threshold: Duration,
}

impl RefundPolicy {
    pub fn new(full_refund_threshold: Duration) -> Self {
        Self {
            full_refund_threshold,
        }
    }

    pub fn with_threshold_hours(hours: i64) -> Self {
        Self::new(Duration::hours(hours))
    }

    pub fn full_refund_threshold(&self) -> Duration {
        self.full_refund_threshold
    }

    /// Refund for a cancellation at `now` of an event starting at `start_time`.
    pub fn refund_percentage(&self, now: &Timestamp, start_time: &Timestamp) -> Percentage {
        if start_time.duration_since(now) >= self.full_refund_threshold {
            Percentage::HUNDRED
        } else {
            Percentage::ZERO
        }
    }
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self::with_threshold_hours(DEFAULT_FULL_REFUND_THRESHOLD_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn start() -> Timestamp {
        Timestamp::now().add_days(30)
    }

    #[test]
    fn exactly_threshold_is_full_refund() {
        let start = start();
        let now = start.add_hours(-48);
        assert_eq!(RefundPolicy::default().refund_percentage(&now, &start), Percentage::HUNDRED);
    }

    #[test]
    fn one_second_short_is_no_refund() {
        let start = start();
        let now = start.add_hours(-48).plus_secs(1);
        assert_eq!(RefundPolicy::default().refund_percentage(&now, &start), Percentage::ZERO);
    }

    #[test]
    fn after_start_is_no_refund() {
        let start = start();
        let now = start.add_hours(2);
        assert_eq!(RefundPolicy::default().refund_percentage(&now, &start), Percentage::ZERO);
    }

    #[test]
    fn threshold_is_configurable() {
        let policy = RefundPolicy::with_threshold_hours(24);
        let start = start();
        let now = start.add_hours(-30);
        assert_eq!(policy.refund_percentage(&now, &start), Percentage::HUNDRED);
        assert_eq!(
            RefundPolicy::default().refund_percentage(&now, &start),
            Percentage::ZERO
        );
    }

    proptest! {
        #[test]
        fn refund_is_all_or_nothing_around_threshold(offset_secs in -200_000i64..400_000i64) {
            let start = start();
            let now = start.minus_secs(offset_secs);
            let refund = RefundPolicy::default().refund_percentage(&now, &start);
            let expected = if offset_secs >= 48 * 3600 {
                Percentage::HUNDRED
            } else {
                Percentage::ZERO
            };
            prop_assert_eq!(refund, expected);
        }
    }
}
