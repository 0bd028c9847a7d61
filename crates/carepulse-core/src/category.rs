//! Score → category mappings.
//!
//! There are deliberately two of them. `provisional_category` uses fixed
//! boundaries and runs once, at extraction. `categorize` uses the operator's
//! current `ThresholdPolicy` and runs on every read; its result is the only
//! category ever shown as live.

use carepulse_contracts::{patient::RiskCategory, policy::ThresholdPolicy};

/// Extraction-time lower bound for `High`.
pub const PROVISIONAL_HIGH: f64 = 10.0;
/// Extraction-time lower bound for `Medium`.
pub const PROVISIONAL_MEDIUM: f64 = 5.0;

/// Label a freshly extracted score with the fixed extraction boundaries.
pub fn provisional_category(score: f64) -> RiskCategory {
    if score >= PROVISIONAL_HIGH {
        RiskCategory::High
    } else if score >= PROVISIONAL_MEDIUM {
        RiskCategory::Medium
    } else {
        RiskCategory::Low
    }
}

/// Label a persisted score under `policy`.
///
/// `high_threshold` is checked first, so inverted thresholds make `Medium`
/// unreachable rather than being swapped.
pub fn categorize(score: f64, policy: &ThresholdPolicy) -> RiskCategory {
    if score >= policy.high_threshold {
        RiskCategory::High
    } else if score >= policy.medium_threshold {
        RiskCategory::Medium
    } else {
        RiskCategory::Low
    }
}
