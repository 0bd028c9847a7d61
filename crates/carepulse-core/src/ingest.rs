//! Ingestion: conversation rows → scored patient records.
//!
//! Each row is cleaned, assigned an identifier if it has none, and run
//! through the extractor. A row that cannot be scored still produces a
//! record with fallback values, so the batch always has one record per row.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use carepulse_contracts::{
    patient::{strip_reserved, ConversationRow, PatientRecord, RiskCategory},
    view::RiskStats,
};

use crate::{extract::extract_value, normalize::normalize_value, traits::Sentiment};

/// How many provisional-High patients the analysis summary lists.
pub const TOP_HIGH_RISK: usize = 5;

/// Positional identifier for the row at zero-based `index`: `P001`, `P002`, …
pub fn default_patient_id(index: usize) -> String {
    format!("P{:03}", index + 1)
}

/// Score every row in order.
pub fn ingest(rows: Vec<ConversationRow>, sentiment: &dyn Sentiment) -> Vec<PatientRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let patient_id = row.patient_id.unwrap_or_else(|| default_patient_id(index));
        if !seen.insert(patient_id.clone()) {
            warn!(patient_id = %patient_id, row = index, "duplicate patient id in batch");
        }

        let assessment = extract_value(&row.conversation, sentiment);

        let mut extra = row.extra;
        for field in strip_reserved(&mut extra) {
            warn!(patient_id = %patient_id, field, "dropping source column that shadows a computed field");
        }
        extra.insert(
            "cleaned_text".to_string(),
            Value::String(normalize_value(&row.conversation)),
        );

        let conversation = match row.conversation {
            Value::String(text) => Some(text),
            _ => None,
        };

        records.push(PatientRecord {
            patient_id,
            conversation,
            symptoms: assessment.symptoms,
            risk_score: assessment.score,
            provisional_category: assessment.category,
            extra,
        });
    }

    info!(records = records.len(), "ingestion complete");
    records
}

/// Batch-level overview produced right after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Counts by provisional (extraction-time) category.
    pub distribution: RiskStats,
    /// The first `TOP_HIGH_RISK` provisional-High records, in ingestion order.
    pub top_high_risk: Vec<PatientRecord>,
}

/// Summarize a freshly ingested batch.
pub fn summarize(records: &[PatientRecord]) -> AnalysisSummary {
    let mut distribution = RiskStats::default();
    for record in records {
        distribution.record(record.provisional_category);
    }

    let top_high_risk = records
        .iter()
        .filter(|r| r.provisional_category == RiskCategory::High)
        .take(TOP_HIGH_RISK)
        .cloned()
        .collect();

    AnalysisSummary {
        distribution,
        top_high_risk,
    }
}

/// First `max_chars` characters of a conversation, for console previews.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use carepulse_contracts::error::CarePulseResult;

    use super::*;

    struct NeutralSentiment;

    impl Sentiment for NeutralSentiment {
        fn polarity(&self, _text: &str) -> CarePulseResult<f64> {
            Ok(0.0)
        }
    }

    fn rows() -> Vec<ConversationRow> {
        serde_json::from_value(json!([
            { "conversation": "Crushing chest pain since this morning." },
            { "patient_id": "MRN-77", "conversation": "I have had a fever for two days.", "clinic": "north" },
            { "conversation": null },
            { "conversation": "Routine checkup." }
        ]))
        .unwrap()
    }

    #[test]
    fn assigns_positional_ids_only_where_missing() {
        let records = ingest(rows(), &NeutralSentiment);
        let ids: Vec<&str> = records.iter().map(|r| r.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "MRN-77", "P003", "P004"]);
    }

    #[test]
    fn scores_and_keeps_source_columns() {
        let records = ingest(rows(), &NeutralSentiment);

        assert_eq!(records[0].symptoms, vec!["chest pain", "crushing"]);
        assert_eq!(records[0].risk_score, 20.0);
        assert_eq!(records[0].provisional_category, RiskCategory::High);
        assert_eq!(records[0].extra["cleaned_text"], "crushing chest pain since this morning");

        assert_eq!(records[1].extra["clinic"], "north");
        assert_eq!(records[1].provisional_category, RiskCategory::Medium);
    }

    #[test]
    fn source_columns_never_shadow_computed_fields() {
        let rows: Vec<ConversationRow> = serde_json::from_value(json!([{
            "patient_id": "A",
            "conversation": "chest pain",
            "risk_score": 3,
            "symptoms": [],
            "status": "Addressed",
            "ward": 7
        }]))
        .unwrap();

        let record = &ingest(rows, &NeutralSentiment)[0];
        assert_eq!(record.risk_score, 10.0);
        assert_eq!(record.symptoms, vec!["chest pain"]);
        assert!(record.extra.get("risk_score").is_none());
        assert!(record.extra.get("symptoms").is_none());
        assert!(record.extra.get("status").is_none());
        assert_eq!(record.extra["ward"], 7);
    }

    #[test]
    fn non_text_rows_get_fallback_values() {
        let records = ingest(rows(), &NeutralSentiment);
        let blank = &records[2];
        assert_eq!(blank.conversation, None);
        assert_eq!(blank.risk_score, 0.0);
        assert!(blank.symptoms.is_empty());
        assert_eq!(blank.provisional_category, RiskCategory::Low);
        assert_eq!(blank.extra["cleaned_text"], "");
    }

    #[test]
    fn summary_counts_provisional_categories() {
        let records = ingest(rows(), &NeutralSentiment);
        let summary = summarize(&records);
        assert_eq!(summary.distribution.total, 4);
        assert_eq!(summary.distribution.high_risk, 1);
        assert_eq!(summary.distribution.medium_risk, 1);
        assert_eq!(summary.distribution.low_risk, 2);
        assert_eq!(summary.top_high_risk.len(), 1);
        assert_eq!(summary.top_high_risk[0].patient_id, "P001");
    }

    #[test]
    fn summary_lists_at_most_five_high_risk() {
        let rows = (0..8).map(|_| ConversationRow::from_text("seizure")).collect();
        let summary = summarize(&ingest(rows, &NeutralSentiment));
        assert_eq!(summary.top_high_risk.len(), TOP_HIGH_RISK);
        assert_eq!(summary.top_high_risk[4].patient_id, "P005");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("fièvre élevée", 3), "fiè");
        assert_eq!(preview("short", 100), "short");
    }
}
