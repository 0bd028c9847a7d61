//! JSON file ledger with legacy migration.
//!
//! The ledger file is a JSON object mapping patient ids to ledger-format
//! timestamps. Older deployments stored a bare array of scheduled ids; such a
//! file is migrated the first time it is loaded, with every entry scheduled
//! exactly one day after the migration moment, and the migrated map is
//! written back so the assigned times do not drift on later loads.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    schedule::{format_timestamp, ScheduleLedger},
};
use carepulse_core::traits::LedgerStore;

/// On-disk ledger layouts, current first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerDocument {
    /// `{ "P001": "2030-01-01T09:00:00", … }`
    Current(ScheduleLedger),
    /// `[ "P001", "P002", … ]`
    Legacy(Vec<String>),
}

/// Convert a legacy id list into a ledger, scheduling every id one day after
/// `migrated_at`.
pub fn migrate_legacy(ids: Vec<String>, migrated_at: DateTime<Utc>) -> ScheduleLedger {
    let scheduled_at = format_timestamp(migrated_at + Duration::days(1));
    ids.into_iter().map(|id| (id, scheduled_at.clone())).collect()
}

/// A `LedgerStore` persisted as a JSON file, re-read on every snapshot.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
}

impl JsonLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger, migrating a legacy file as of `now`.
    ///
    /// A missing file is an empty ledger.
    pub fn load_at(&self, now: DateTime<Utc>) -> CarePulseResult<ScheduleLedger> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no ledger file; starting empty");
            return Ok(ScheduleLedger::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to read ledger '{}': {}", self.path.display(), e),
        })?;
        let document: LedgerDocument =
            serde_json::from_str(&contents).map_err(|e| CarePulseError::StorageError {
                reason: format!("failed to parse ledger '{}': {}", self.path.display(), e),
            })?;

        match document {
            LedgerDocument::Current(ledger) => Ok(ledger),
            LedgerDocument::Legacy(ids) => {
                let ledger = migrate_legacy(ids, now);
                info!(
                    path = %self.path.display(),
                    entries = ledger.len(),
                    "migrated legacy ledger list"
                );
                if let Err(e) = self.write(&ledger) {
                    warn!(error = %e, "could not persist migrated ledger; will migrate again next load");
                }
                Ok(ledger)
            }
        }
    }

    fn write(&self, ledger: &ScheduleLedger) -> CarePulseResult<()> {
        let contents = serde_json::to_string_pretty(ledger).map_err(|e| CarePulseError::StorageError {
            reason: format!("failed to serialize ledger: {}", e),
        })?;
        crate::write_file(&self.path, &contents)
    }
}

impl LedgerStore for JsonLedgerStore {
    fn snapshot(&self) -> CarePulseResult<ScheduleLedger> {
        self.load_at(Utc::now())
    }

    /// Read-merge-write a single entry.
    fn record(&self, patient_id: &str, scheduled_at: &str) -> CarePulseResult<()> {
        let mut ledger = self.load_at(Utc::now())?;
        if let Some(previous) = ledger.insert(patient_id, scheduled_at) {
            debug!(patient_id, previous = %previous, "overwriting ledger entry");
        }
        self.write(&ledger)
    }
}
