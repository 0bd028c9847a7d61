//! Mock calendar scheduler.
//!
//! Stands in for a real calendar integration. Appointment lead time and
//! priority follow the live risk category:
//!
//! - High   → in 1 hour,  `URGENT`
//! - Medium → in 2 days,  `Standard`
//! - Low    → in 7 days,  `Routine`
//!
//! Every booking is kept in memory so callers can list what was booked.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use carepulse_contracts::{
    error::{CarePulseError, CarePulseResult},
    patient::RiskCategory,
    schedule::{format_timestamp, Appointment, AppointmentRequest, Priority},
};
use carepulse_core::traits::Scheduler;

/// Status string attached to every mock booking.
pub const MOCK_STATUS: &str = "Scheduled (Mock)";

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Lead time and priority for a category.
pub fn slot_for(category: RiskCategory) -> (Duration, Priority) {
    match category {
        RiskCategory::High => (Duration::hours(1), Priority::Urgent),
        RiskCategory::Medium => (Duration::days(2), Priority::Standard),
        RiskCategory::Low => (Duration::days(7), Priority::Routine),
    }
}

/// An in-process `Scheduler` that always succeeds.
pub struct MockCalendar {
    clock: Clock,
    appointments: Mutex<Vec<Appointment>>,
}

impl MockCalendar {
    /// A calendar that books relative to the wall clock.
    pub fn new() -> Self {
        Self {
            clock: Box::new(Utc::now),
            appointments: Mutex::new(Vec::new()),
        }
    }

    /// A calendar that books relative to a fixed instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            clock: Box::new(move || now),
            appointments: Mutex::new(Vec::new()),
        }
    }

    /// Every appointment booked so far, in booking order.
    pub fn appointments(&self) -> Vec<Appointment> {
        self.appointments
            .lock()
            .map(|booked| booked.clone())
            .unwrap_or_default()
    }
}

impl Default for MockCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for MockCalendar {
    fn schedule(&self, request: &AppointmentRequest) -> CarePulseResult<Appointment> {
        let (lead_time, priority) = slot_for(request.risk_category);
        let scheduled_at = format_timestamp((self.clock)() + lead_time);

        let appointment = Appointment {
            patient_id: request.patient_id.clone(),
            scheduled_at,
            risk_category: request.risk_category,
            reason: request.reason.clone(),
            priority,
            status: MOCK_STATUS.to_string(),
        };

        self.appointments
            .lock()
            .map_err(|e| CarePulseError::SchedulerFailed {
                reason: format!("calendar lock poisoned: {}", e),
            })?
            .push(appointment.clone());

        info!(
            patient_id = %appointment.patient_id,
            priority = %appointment.priority,
            scheduled_at = %appointment.scheduled_at,
            "mock calendar booked appointment"
        );

        Ok(appointment)
    }
}
