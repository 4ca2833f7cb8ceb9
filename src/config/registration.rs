//! Registration policy configuration

use serde::Deserialize;

use crate::domain::registration::{RefundPolicy, DEFAULT_FULL_REFUND_THRESHOLD_HOURS};

use super::error::ValidationError;

const MAX_THRESHOLD_HOURS: i64 = 24 * 30;

/// Registration policy settings
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Cancellations at least this many hours before start get a full refund
    #[serde(default = "default_full_refund_threshold_hours")]
    pub full_refund_threshold_hours: i64,
}

impl RegistrationConfig {
    pub fn refund_policy(&self) -> RefundPolicy {
        RefundPolicy::with_threshold_hours(self.full_refund_threshold_hours)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0..=MAX_THRESHOLD_HOURS).contains(&self.full_refund_threshold_hours) {
            return Err(ValidationError::InvalidRefundThreshold(
                self.full_refund_threshold_hours,
            ));
        }
        Ok(())
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            full_refund_threshold_hours: default_full_refund_threshold_hours(),
        }
    }
}

fn default_full_refund_threshold_hours() -> i64 {
    DEFAULT_FULL_REFUND_THRESHOLD_HOURS
}
