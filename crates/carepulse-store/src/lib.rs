//! # carepulse-store
//!
//! File-backed persistence for CarePulse: processed patient records, the
//! conversation input batch, and the appointment ledger.
//!
//! ## Overview
//!
//! - [`RecordStore`]: JSON array of scored `PatientRecord`s.
//! - [`JsonLedgerStore`]: JSON `patient_id → timestamp` ledger implementing
//!   [`LedgerStore`](carepulse_core::traits::LedgerStore), with one-time
//!   migration of the legacy list layout.
//! - [`InMemoryLedger`]: the same trait over a shared in-process map.
//!
//! Every load re-reads its file; nothing is cached between calls.

pub mod ledger;
pub mod memory;
pub mod records;

use std::path::Path;

use carepulse_contracts::error::{CarePulseError, CarePulseResult};

pub use ledger::{migrate_legacy, JsonLedgerStore, LedgerDocument};
pub use memory::InMemoryLedger;
pub use records::{load_conversations, parse_conversations, RecordStore};

/// Write `contents` to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: &str) -> CarePulseResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to create '{}': {}", parent.display(), e),
        })?;
    }
    std::fs::write(path, contents).map_err(|e| CarePulseError::StorageError {
        reason: format!("failed to write '{}': {}", path.display(), e),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use carepulse_contracts::{
        error::CarePulseError,
        patient::{PatientRecord, RiskCategory},
        schedule::ScheduleLedger,
    };
    use carepulse_contracts::error::CarePulseResult;
    use carepulse_core::{
        ingest::ingest,
        traits::{LedgerStore, Sentiment},
    };

    use super::{migrate_legacy, parse_conversations, InMemoryLedger, JsonLedgerStore, RecordStore};

    struct Neutral;

    impl Sentiment for Neutral {
        fn polarity(&self, _text: &str) -> CarePulseResult<f64> {
            Ok(0.0)
        }
    }

    // ── Ledger migration ──────────────────────────────────────────────────────

    /// Every legacy id is scheduled exactly one day after the migration moment.
    #[test]
    fn test_migrate_legacy_schedules_one_day_out() {
        let migrated_at = Utc.with_ymd_and_hms(2024, 2, 28, 15, 30, 0).unwrap();
        let ledger = migrate_legacy(vec!["P001".to_string(), "P007".to_string()], migrated_at);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("P001"), Some("2024-02-29T15:30:00"));
        assert_eq!(ledger.get("P007"), Some("2024-02-29T15:30:00"));
    }

    /// A legacy file is migrated on load and rewritten in the current layout.
    #[test]
    fn test_legacy_file_is_migrated_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("schedule.json"));
        std::fs::write(store.path(), r#"["P001", "P002"]"#).unwrap();

        let first = store
            .load_at(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap())
            .unwrap();
        assert_eq!(first.get("P002"), Some("2024-01-02T08:00:00"));

        // A later load must not re-migrate with a new timestamp.
        let second = store
            .load_at(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap())
            .unwrap();
        assert_eq!(second, first);
    }

    // ── JsonLedgerStore ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_ledger_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("nested").join("schedule.json"));
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_record_merges_into_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("nested").join("schedule.json"));

        store.record("P001", "2030-01-01T09:00:00").unwrap();
        store.record("P002", "2030-01-03T09:00:00").unwrap();
        store.record("P001", "2030-02-01T09:00:00").unwrap();

        let ledger = store.snapshot().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("P001"), Some("2030-02-01T09:00:00"));
        assert_eq!(ledger.get("P002"), Some("2030-01-03T09:00:00"));
    }

    #[test]
    fn test_corrupt_ledger_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedgerStore::new(dir.path().join("schedule.json"));
        std::fs::write(store.path(), r#"{ "P001": 42 }"#).unwrap();

        assert!(matches!(store.snapshot(), Err(CarePulseError::StorageError { .. })));
    }

    // ── InMemoryLedger ────────────────────────────────────────────────────────

    #[test]
    fn test_in_memory_snapshot_is_a_copy() {
        let ledger = InMemoryLedger::with_ledger(ScheduleLedger::new());
        let shared = ledger.clone();

        ledger.record("P001", "2030-01-01T09:00:00").unwrap();
        let snapshot = shared.snapshot().unwrap();
        ledger.record("P002", "2030-01-01T09:00:00").unwrap();

        assert_eq!(snapshot.len(), 1, "snapshot must not see later writes");
        assert_eq!(shared.snapshot().unwrap().len(), 2, "clones share one ledger");
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let ledger = InMemoryLedger::new();
        let inner = std::sync::Arc::clone(&ledger.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("poison the ledger lock");
        })
        .join();

        assert!(matches!(ledger.snapshot(), Err(CarePulseError::StorageError { .. })));
    }

    // ── RecordStore ───────────────────────────────────────────────────────────

    #[test]
    fn test_records_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("processed_patients.json"));
        assert!(store.load().unwrap().is_empty());

        let mut record = PatientRecord::scored("P001", 17.0);
        record.symptoms = vec!["seizure".to_string(), "fever".to_string()];
        record.provisional_category = RiskCategory::High;
        record.conversation = Some("Had a seizure and a fever.".to_string());

        store.save(&[record.clone(), PatientRecord::scored("P002", 0.0)]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], record);
    }

    #[test]
    fn test_records_load_skips_bad_entries_and_zeroes_bad_scores() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("processed_patients.json"));
        std::fs::write(
            store.path(),
            r#"[
                { "patient_id": "A", "risk_score": 12 },
                { "patient_id": "B", "risk_score": "NaN" },
                { "risk_score": 40 },
                "not a record"
            ]"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        let scores: Vec<(&str, f64)> = loaded.iter().map(|r| (r.patient_id.as_str(), r.risk_score)).collect();
        assert_eq!(scores, vec![("A", 12.0), ("B", 0.0)]);
    }

    #[test]
    fn test_records_file_with_not_an_array_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("processed_patients.json"));
        std::fs::write(store.path(), r#"{ "patient_id": "A" }"#).unwrap();
        assert!(matches!(store.load(), Err(CarePulseError::StorageError { .. })));
    }

    /// Rows whose columns reuse computed field names still produce a
    /// loadable file, and re-analysing that file's rows stays loadable.
    #[test]
    fn test_colliding_source_columns_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("processed_patients.json"));

        let rows = parse_conversations(
            r#"[{ "patient_id": "A", "conversation": "chest pain", "risk_score": 3, "symptoms": [] }]"#,
        )
        .unwrap();
        store.save(&ingest(rows, &Neutral)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].risk_score, 10.0);
        assert_eq!(loaded[0].symptoms, vec!["chest pain"]);

        let again = parse_conversations(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        store.save(&ingest(again, &Neutral)).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].risk_score, 10.0);
        assert_eq!(reloaded[0].provisional_category, RiskCategory::High);
    }

    // ── Conversation input ────────────────────────────────────────────────────

    #[test]
    fn test_conversation_batch_skips_bad_rows() {
        let rows = parse_conversations(
            r#"[
                { "conversation": "chest pain" },
                "I feel dizzy",
                42,
                { "patient_id": ["not", "an", "id"], "conversation": "fever" },
                { "patient_id": "A-1", "conversation": "fine", "ward": 3 }
            ]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].conversation, "I feel dizzy");
        assert_eq!(rows[2].patient_id, None);
        assert_eq!(rows[3].patient_id.as_deref(), Some("A-1"));
        assert_eq!(rows[3].extra["ward"], 3);
    }

    #[test]
    fn test_conversation_batch_must_be_an_array() {
        let result = parse_conversations(r#"{ "conversation": "chest pain" }"#);
        assert!(matches!(result, Err(CarePulseError::StorageError { .. })));
    }
}
