//! The view assembler: the read path from persisted records to a page.
//!
//! Every call follows the same order:
//!
//!   Records → Categorize (policy) → Status (ledger) → Stats → Filter → Sort → Page
//!
//! Stats are taken before filtering, so they always describe the whole
//! population; the page itself is always filtered.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use carepulse_contracts::{
    patient::{strip_reserved, PatientRecord},
    policy::ThresholdPolicy,
    schedule::{format_timestamp, ScheduleLedger},
    view::{EnrichedPatient, RiskStats, ViewPage, ViewQuery},
};

use crate::{
    category::categorize,
    status::status,
    traits::{LedgerStore, ThresholdSource},
};

/// Attach the live category and status to one record.
///
/// Carried-through columns that reuse a computed field name are left out.
pub fn enrich(
    record: &PatientRecord,
    policy: &ThresholdPolicy,
    ledger: &ScheduleLedger,
    now: &str,
) -> EnrichedPatient {
    let mut record = record.clone();
    strip_reserved(&mut record.extra);
    let risk_category = categorize(record.risk_score, policy);
    let status = status(&record.patient_id, ledger, now);
    EnrichedPatient {
        record,
        risk_category,
        status,
    }
}

/// Number of pages needed for `count` items; never less than 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Materialize one page of the patient view.
///
/// `query.page == 0` is clamped to 1 and `policy.page_size == 0` is treated
/// as 1. A page past the end is empty, not an error.
pub fn assemble(
    records: &[PatientRecord],
    policy: &ThresholdPolicy,
    ledger: &ScheduleLedger,
    query: &ViewQuery,
    now: &str,
) -> ViewPage {
    let enriched: Vec<EnrichedPatient> = records
        .iter()
        .map(|record| enrich(record, policy, ledger, now))
        .collect();

    let mut stats = RiskStats::default();
    for patient in &enriched {
        stats.record(patient.risk_category);
    }

    let mut filtered: Vec<EnrichedPatient> = enriched
        .into_iter()
        .filter(|p| query.risk_filter.admits(p.risk_category))
        .collect();

    // `sort_by` is stable: equal scores keep their ingestion order.
    filtered.sort_by(|a, b| b.record.risk_score.total_cmp(&a.record.risk_score));

    let page_size = policy.page_size.max(1);
    let page = query.page.max(1);
    let total_pages = total_pages(filtered.len(), page_size);
    let start = (page - 1).saturating_mul(page_size);

    let patients: Vec<EnrichedPatient> = filtered.into_iter().skip(start).take(page_size).collect();

    debug!(
        filter = %query.risk_filter,
        page,
        total_pages,
        shown = patients.len(),
        population = stats.total,
        "assembled view page"
    );

    ViewPage {
        patients,
        stats,
        current_page: page,
        total_pages,
        current_filter: query.risk_filter,
    }
}

/// Load `source`, or the default policy with a warning if it cannot be read.
pub fn policy_or_default(source: &dyn ThresholdSource) -> ThresholdPolicy {
    source.load().unwrap_or_else(|e| {
        warn!(error = %e, "threshold policy unavailable; using defaults");
        ThresholdPolicy::default()
    })
}

/// Orchestrates reads against live policy and ledger sources.
///
/// Policy and ledger are reloaded on every call to `render`; neither is held
/// between calls. A source that fails to load is replaced by its documented
/// default (default policy, empty ledger) so the caller always gets a page.
pub struct ViewAssembler {
    thresholds: Box<dyn ThresholdSource>,
    ledger: Box<dyn LedgerStore>,
}

impl ViewAssembler {
    pub fn new(thresholds: Box<dyn ThresholdSource>, ledger: Box<dyn LedgerStore>) -> Self {
        Self { thresholds, ledger }
    }

    /// Load the policy in force right now, falling back to the default.
    pub fn current_policy(&self) -> ThresholdPolicy {
        policy_or_default(self.thresholds.as_ref())
    }

    /// Load a fresh ledger snapshot, falling back to an empty ledger.
    pub fn current_ledger(&self) -> ScheduleLedger {
        self.ledger.snapshot().unwrap_or_else(|e| {
            warn!(error = %e, "schedule ledger unavailable; treating every patient as pending");
            ScheduleLedger::new()
        })
    }

    /// Materialize a page as of `now`.
    pub fn render(&self, records: &[PatientRecord], query: &ViewQuery, now: DateTime<Utc>) -> ViewPage {
        let policy = self.current_policy();
        let ledger = self.current_ledger();
        assemble(records, &policy, &ledger, query, &format_timestamp(now))
    }
}
