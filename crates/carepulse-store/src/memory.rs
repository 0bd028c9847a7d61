//! In-memory implementation of `LedgerStore`.
//!
//! `InMemoryLedger` keeps the ledger behind an `Arc<Mutex<_>>`, so clones
//! share one ledger and it is safe to hand across threads. Each snapshot is
//! a copy; later writes never show up in an already-taken snapshot.

use std::sync::{Arc, Mutex};

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    schedule::ScheduleLedger,
};
use carepulse_core::traits::LedgerStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    pub(crate) inner: Arc<Mutex<ScheduleLedger>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger.
    pub fn with_ledger(ledger: ScheduleLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }
}

impl LedgerStore for InMemoryLedger {
    fn snapshot(&self) -> CarePulseResult<ScheduleLedger> {
        let ledger = self.inner.lock().map_err(|e| CarePulseError::StorageError {
            reason: format!("ledger lock poisoned: {}", e),
        })?;
        Ok(ledger.clone())
    }

    fn record(&self, patient_id: &str, scheduled_at: &str) -> CarePulseResult<()> {
        let mut ledger = self.inner.lock().map_err(|e| CarePulseError::StorageError {
            reason: format!("ledger lock poisoned: {}", e),
        })?;
        ledger.insert(patient_id, scheduled_at);
        Ok(())
    }
}
