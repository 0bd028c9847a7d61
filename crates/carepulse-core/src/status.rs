//! Read-time appointment status.

use carepulse_contracts::schedule::{PatientStatus, ScheduleLedger};

/// Derive a patient's status from a ledger snapshot and the current time.
///
/// `now` must be in the ledger timestamp format; the comparison is a plain
/// string comparison, so an appointment exactly at `now` is still `Scheduled`.
pub fn status(patient_id: &str, ledger: &ScheduleLedger, now: &str) -> PatientStatus {
    match ledger.get(patient_id) {
        None => PatientStatus::Pending,
        Some(scheduled_at) if scheduled_at >= now => PatientStatus::Scheduled,
        Some(_) => PatientStatus::Addressed,
    }
}
