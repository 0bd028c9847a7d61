//! Booking workflow: hand a patient to the scheduler and record the result.
//!
//! The scheduler receives the live category (under the policy passed in), not
//! the provisional one stored on the record. The ledger is only written once
//! the scheduler has confirmed a time.

use tracing::info;

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    patient::PatientRecord,
    policy::ThresholdPolicy,
    schedule::{Appointment, AppointmentRequest},
};

use crate::{
    category::categorize,
    traits::{LedgerStore, Scheduler},
};

/// Reason used when a patient has no matched symptoms.
pub const GENERIC_REASON: &str = "General Follow-up";

/// Human-readable booking reason for a symptom list.
pub fn follow_up_reason(symptoms: &[String]) -> String {
    if symptoms.is_empty() {
        GENERIC_REASON.to_string()
    } else {
        format!("Follow-up for: {}", symptoms.join(", "))
    }
}

/// Build the scheduler request for `record` under `policy`.
pub fn booking_request(record: &PatientRecord, policy: &ThresholdPolicy) -> AppointmentRequest {
    AppointmentRequest {
        patient_id: record.patient_id.clone(),
        risk_category: categorize(record.risk_score, policy),
        reason: follow_up_reason(&record.symptoms),
    }
}

/// Book a follow-up for `patient_id` and record it in the ledger.
///
/// # Errors
///
/// - `PatientNotFound` if no record carries `patient_id`.
/// - Whatever the scheduler or ledger return; on a scheduler failure the
///   ledger is left untouched.
pub fn book_follow_up(
    patient_id: &str,
    records: &[PatientRecord],
    policy: &ThresholdPolicy,
    scheduler: &dyn Scheduler,
    ledger: &dyn LedgerStore,
) -> CarePulseResult<Appointment> {
    let record = records
        .iter()
        .find(|r| r.patient_id == patient_id)
        .ok_or_else(|| CarePulseError::PatientNotFound {
            patient_id: patient_id.to_string(),
        })?;

    let request = booking_request(record, policy);
    let appointment = scheduler.schedule(&request)?;
    ledger.record(&appointment.patient_id, &appointment.scheduled_at)?;

    info!(
        patient_id = %appointment.patient_id,
        scheduled_at = %appointment.scheduled_at,
        priority = %appointment.priority,
        "follow-up booked"
    );

    Ok(appointment)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use carepulse_contracts::{
        patient::RiskCategory,
        schedule::{Priority, ScheduleLedger},
    };

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Scheduler stand-in that books everything at a fixed time and remembers
    /// the requests it saw.
    struct FixedScheduler {
        seen: Mutex<Vec<AppointmentRequest>>,
    }

    impl FixedScheduler {
        fn new() -> Self {
            Self { seen: Mutex::new(Vec::new()) }
        }
    }

    impl Scheduler for FixedScheduler {
        fn schedule(&self, request: &AppointmentRequest) -> CarePulseResult<Appointment> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(Appointment {
                patient_id: request.patient_id.clone(),
                scheduled_at: "2030-01-01T09:00:00".to_string(),
                risk_category: request.risk_category,
                reason: request.reason.clone(),
                priority: Priority::Standard,
                status: "Scheduled (Test)".to_string(),
            })
        }
    }

    struct FailingScheduler;

    impl Scheduler for FailingScheduler {
        fn schedule(&self, _request: &AppointmentRequest) -> CarePulseResult<Appointment> {
            Err(CarePulseError::SchedulerFailed {
                reason: "calendar unreachable".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MemoryLedger(Mutex<ScheduleLedger>);

    impl LedgerStore for MemoryLedger {
        fn snapshot(&self) -> CarePulseResult<ScheduleLedger> {
            Ok(self.0.lock().unwrap().clone())
        }

        fn record(&self, patient_id: &str, scheduled_at: &str) -> CarePulseResult<()> {
            self.0.lock().unwrap().insert(patient_id, scheduled_at);
            Ok(())
        }
    }

    fn records() -> Vec<PatientRecord> {
        let mut chest = PatientRecord::scored("P001", 60.0);
        chest.symptoms = vec!["chest pain".to_string(), "fever".to_string()];
        chest.provisional_category = RiskCategory::High;
        vec![chest, PatientRecord::scored("P002", 0.0)]
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn reason_lists_symptoms_or_falls_back() {
        assert_eq!(
            follow_up_reason(&["chest pain".to_string(), "fever".to_string()]),
            "Follow-up for: chest pain, fever"
        );
        assert_eq!(follow_up_reason(&[]), GENERIC_REASON);
    }

    #[test]
    fn request_carries_live_category() {
        let request = booking_request(&records()[0], &ThresholdPolicy::default());
        assert_eq!(request.risk_category, RiskCategory::Medium);
        assert_eq!(request.reason, "Follow-up for: chest pain, fever");
    }

    #[test]
    fn booking_writes_confirmed_time_to_ledger() {
        let scheduler = FixedScheduler::new();
        let ledger = MemoryLedger::default();

        let appt = book_follow_up("P002", &records(), &ThresholdPolicy::default(), &scheduler, &ledger)
            .unwrap();

        assert_eq!(appt.reason, GENERIC_REASON);
        assert_eq!(appt.risk_category, RiskCategory::Low);
        assert_eq!(ledger.snapshot().unwrap().get("P002"), Some("2030-01-01T09:00:00"));
        assert_eq!(scheduler.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn unknown_patient_is_an_error() {
        let ledger = MemoryLedger::default();
        let result = book_follow_up(
            "P999",
            &records(),
            &ThresholdPolicy::default(),
            &FixedScheduler::new(),
            &ledger,
        );
        match result {
            Err(CarePulseError::PatientNotFound { patient_id }) => assert_eq!(patient_id, "P999"),
            other => panic!("expected PatientNotFound, got {:?}", other),
        }
    }

    #[test]
    fn scheduler_failure_leaves_ledger_untouched() {
        let ledger = MemoryLedger::default();
        let result = book_follow_up("P001", &records(), &ThresholdPolicy::default(), &FailingScheduler, &ledger);
        assert!(matches!(result, Err(CarePulseError::SchedulerFailed { .. })));
        assert!(ledger.snapshot().unwrap().is_empty());
    }
}
