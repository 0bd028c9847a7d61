//! Error types for the CarePulse pipeline.
//!
//! Fallible store and capability calls return `CarePulseResult<T>`. The read
//! path never surfaces these to the operator: it logs them and substitutes a
//! documented default instead.

use thiserror::Error;

/// The unified error type for CarePulse.
#[derive(Debug, Error)]
pub enum CarePulseError {
    /// A configuration document could not be parsed or written.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A persisted file (records, ledger) could not be read or written.
    #[error("storage error: {reason}")]
    StorageError { reason: String },

    /// No processed record carries the requested patient identifier.
    #[error("patient '{patient_id}' not found")]
    PatientNotFound { patient_id: String },

    /// The scheduling collaborator could not book an appointment.
    #[error("scheduler failed: {reason}")]
    SchedulerFailed { reason: String },

    /// The sentiment capability could not score a text.
    #[error("sentiment analysis failed: {reason}")]
    SentimentFailed { reason: String },
}

/// Convenience alias used throughout the CarePulse crates.
pub type CarePulseResult<T> = Result<T, CarePulseError>;
