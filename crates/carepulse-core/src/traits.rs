//! Capability traits at the boundary of the CarePulse core.
//!
//! The core is a set of pure transformations. Everything that talks to the
//! outside world sits behind one of these traits:
//!
//! - `Sentiment`: text polarity scoring (may be backed by a model)
//! - `Scheduler`: books follow-up appointments
//! - `ThresholdSource`: loads the operator's current threshold policy
//! - `LedgerStore`: reads and writes the appointment ledger
//!
//! Deterministic stand-ins for tests live next to the tests that use them;
//! reference implementations live in `carepulse-ref`, `carepulse-policy` and
//! `carepulse-store`.

use carepulse_contracts::{
    error::CarePulseResult,
    policy::ThresholdPolicy,
    schedule::{Appointment, AppointmentRequest, ScheduleLedger},
};

/// Scores the emotional polarity of a text.
pub trait Sentiment: Send + Sync {
    /// Return a polarity in `[-1.0, 1.0]`; negative means distressed.
    ///
    /// A failure here never aborts a batch: the extractor degrades the
    /// affected record to the fallback assessment.
    fn polarity(&self, text: &str) -> CarePulseResult<f64>;
}

/// Books a follow-up appointment with an external calendar.
pub trait Scheduler: Send + Sync {
    /// Book `request` and return the confirmed appointment.
    ///
    /// The returned `scheduled_at` must use the ledger timestamp format so it
    /// can be compared against "now" by plain string ordering.
    fn schedule(&self, request: &AppointmentRequest) -> CarePulseResult<Appointment>;
}

/// Supplies the threshold policy in force right now.
///
/// Called at the start of every read. Implementations must not cache across
/// calls, or concurrent operator updates would be masked.
pub trait ThresholdSource: Send + Sync {
    fn load(&self) -> CarePulseResult<ThresholdPolicy>;
}

/// Persisted appointment ledger.
pub trait LedgerStore: Send + Sync {
    /// Load a fresh snapshot of the ledger.
    fn snapshot(&self) -> CarePulseResult<ScheduleLedger>;

    /// Record (or overwrite) the appointment time for `patient_id`.
    fn record(&self, patient_id: &str, scheduled_at: &str) -> CarePulseResult<()>;
}
