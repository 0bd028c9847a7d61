//! Operator-configurable threshold policy.
//!
//! The policy is process-wide and persisted outside the core. It is reloaded
//! at the start of every read and threaded explicitly into categorization;
//! nothing in the pipeline holds on to it between calls.

use serde::{Deserialize, Serialize};

/// Score boundaries for the live risk category, plus the page size.
///
/// `high_threshold > medium_threshold` is expected but not enforced. With
/// inverted thresholds every score at or above `high_threshold` is `High` and
/// `Medium` becomes unreachable; this is propagated, never corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    /// Scores at or above this value are `High`.
    pub high_threshold: f64,
    /// Scores at or above this value (and below `high_threshold`) are `Medium`.
    pub medium_threshold: f64,
    /// Number of patients per page.
    pub page_size: usize,
}

impl ThresholdPolicy {
    pub const DEFAULT_HIGH_THRESHOLD: f64 = 90.0;
    pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 50.0;
    pub const DEFAULT_PAGE_SIZE: usize = 15;

    /// Return a copy of this policy with every field set in `update` replaced.
    ///
    /// Fields left as `None` keep their current value.
    pub fn merged(&self, update: &ThresholdUpdate) -> Self {
        Self {
            high_threshold: update.high_threshold.unwrap_or(self.high_threshold),
            medium_threshold: update.medium_threshold.unwrap_or(self.medium_threshold),
            page_size: update.page_size.unwrap_or(self.page_size),
        }
    }

    /// True when the thresholds are in the expected order.
    pub fn is_ordered(&self) -> bool {
        self.high_threshold > self.medium_threshold
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            high_threshold: Self::DEFAULT_HIGH_THRESHOLD,
            medium_threshold: Self::DEFAULT_MEDIUM_THRESHOLD,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// A partial policy update. Unset fields are left untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl ThresholdUpdate {
    pub fn is_empty(&self) -> bool {
        self.high_threshold.is_none() && self.medium_threshold.is_none() && self.page_size.is_none()
    }
}
