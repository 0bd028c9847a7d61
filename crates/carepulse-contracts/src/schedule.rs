//! Schedule ledger, patient status, and appointment types.
//!
//! Ledger timestamps are ISO-8601 strings in a single fixed format
//! (`TIMESTAMP_FORMAT`, UTC). Status derivation compares them as plain
//! strings, which is only sound while every timestamp shares that format.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patient::RiskCategory;

/// The one timestamp layout written to and compared within the ledger.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render `at` in the ledger's timestamp format.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Snapshot of the persisted `patient_id → scheduled_at` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleLedger {
    entries: BTreeMap<String, String>,
}

impl ScheduleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scheduled timestamp for `patient_id`, if any.
    pub fn get(&self, patient_id: &str) -> Option<&str> {
        self.entries.get(patient_id).map(String::as_str)
    }

    /// Record or overwrite an appointment. Returns the previous timestamp.
    pub fn insert(&mut self, patient_id: impl Into<String>, scheduled_at: impl Into<String>) -> Option<String> {
        self.entries.insert(patient_id.into(), scheduled_at.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScheduleLedger {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Where a patient stands relative to their appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    /// No appointment on the ledger.
    Pending,
    /// Appointment at or after the current time.
    Scheduled,
    /// Appointment already in the past.
    Addressed,
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatientStatus::Pending => "Pending",
            PatientStatus::Scheduled => "Scheduled",
            PatientStatus::Addressed => "Addressed",
        };
        f.write_str(s)
    }
}

/// Booking priority assigned by the scheduling collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "URGENT")]
    Urgent,
    Standard,
    Routine,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Urgent => "URGENT",
            Priority::Standard => "Standard",
            Priority::Routine => "Routine",
        };
        f.write_str(s)
    }
}

/// What the core hands to the scheduler to book a follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub patient_id: String,
    /// Live category under the threshold policy in force at booking time.
    pub risk_category: RiskCategory,
    /// Human-readable reason built from the symptom list.
    pub reason: String,
}

/// A booked appointment as reported back by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub patient_id: String,
    /// Ledger-format timestamp of the appointment.
    pub scheduled_at: String,
    pub risk_category: RiskCategory,
    pub reason: String,
    pub priority: Priority,
    /// Free-form booking status from the scheduler (e.g. "Scheduled (Mock)").
    pub status: String,
}
