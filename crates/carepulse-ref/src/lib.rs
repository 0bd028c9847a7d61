//! # carepulse-ref
//!
//! Reference implementations of the CarePulse capability traits:
//!
//! 1. **Lexicon sentiment**: a deterministic word-lexicon `Sentiment`.
//! 2. **Mock calendar**: a `Scheduler` that books by risk category and keeps
//!    its bookings in memory.
//! 3. **Sample data**: a small fictional conversation batch.
//!
//! No external services are contacted.

pub mod calendar;
pub mod lexicon;
pub mod mock_data;

pub use calendar::MockCalendar;
pub use lexicon::LexiconSentiment;

#[cfg(test)]
mod tests {
    use carepulse_contracts::patient::RiskCategory;
    use carepulse_core::ingest::{ingest, summarize};

    use super::{mock_data::sample_conversations, LexiconSentiment};

    /// The sample batch run through the real lexicon produces the expected
    /// provisional picture.
    #[test]
    fn sample_batch_end_to_end() {
        let records = ingest(sample_conversations(), &LexiconSentiment::new());
        assert_eq!(records.len(), 12);

        let chest = &records[0];
        assert_eq!(chest.patient_id, "P001");
        assert_eq!(chest.provisional_category, RiskCategory::High);
        assert!(chest.symptoms.contains(&"chest pain".to_string()));

        let headache = &records[1];
        assert_eq!(headache.provisional_category, RiskCategory::Low);
        assert_eq!(headache.risk_score, 0.0);

        let sad = &records[2];
        assert_eq!(sad.risk_score, 2.0);

        let summary = summarize(&records);
        assert_eq!(summary.distribution.total, 12);
        assert_eq!(summary.top_high_risk.len(), 5);
    }
}
