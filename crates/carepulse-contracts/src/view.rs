//! View query and materialized page types.
//!
//! A `ViewPage` is what the presentation layer receives: one page of enriched
//! patients plus population-wide statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    patient::{PatientRecord, RiskCategory},
    schedule::PatientStatus,
};

/// Which live category a view is restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl RiskFilter {
    /// True if a patient in `category` passes this filter.
    pub fn admits(&self, category: RiskCategory) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::High => category == RiskCategory::High,
            RiskFilter::Medium => category == RiskCategory::Medium,
            RiskFilter::Low => category == RiskCategory::Low,
        }
    }
}

impl fmt::Display for RiskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskFilter::All => "All",
            RiskFilter::High => "High",
            RiskFilter::Medium => "Medium",
            RiskFilter::Low => "Low",
        };
        f.write_str(s)
    }
}

impl FromStr for RiskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(RiskFilter::All),
            "high" => Ok(RiskFilter::High),
            "medium" => Ok(RiskFilter::Medium),
            "low" => Ok(RiskFilter::Low),
            other => Err(format!("unknown risk filter '{other}' (expected all, high, medium or low)")),
        }
    }
}

/// Filter and page selection for a single view. Sorting is fixed:
/// `risk_score` descending, ties in ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// 1-based page number. `0` is treated as `1`.
    pub page: usize,
    pub risk_filter: RiskFilter,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            page: 1,
            risk_filter: RiskFilter::All,
        }
    }
}

/// Category counts over the whole population, independent of any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskStats {
    pub total: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

impl RiskStats {
    /// Count one patient in `category`.
    pub fn record(&mut self, category: RiskCategory) {
        self.total += 1;
        match category {
            RiskCategory::High => self.high_risk += 1,
            RiskCategory::Medium => self.medium_risk += 1,
            RiskCategory::Low => self.low_risk += 1,
        }
    }
}

/// A patient record with its read-time category and status attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPatient {
    #[serde(flatten)]
    pub record: PatientRecord,
    /// Live category under the policy loaded for this read.
    pub risk_category: RiskCategory,
    pub status: PatientStatus,
}

/// One materialized page of the patient view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage {
    pub patients: Vec<EnrichedPatient>,
    pub stats: RiskStats,
    pub current_page: usize,
    pub total_pages: usize,
    pub current_filter: RiskFilter,
}
