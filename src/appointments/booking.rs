//! Appointment booking.

use serde::{Deserialize, Serialize};
use tracing::info;

/// A booking request. None of the fields are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub speciality: String,
    pub day: String,
    pub time: String,
    pub patient_name: String,
}

impl Booking {
    pub fn new(speciality: &str, day: &str, time: &str, patient_name: &str) -> Self {
        Self {
            speciality: speciality.to_string(),
            day: day.to_string(),
            time: time.to_string(),
            patient_name: patient_name.to_string(),
        }
    }

    /// Book the appointment and return the confirmation sentence.
    ///
    /// Always succeeds. Nothing is stored and the slot is not checked against
    /// what was offered.
    pub fn confirm(&self) -> String {
        info!(
            "Booking appointment for {} with {} on {} at {}",
            self.patient_name, self.speciality, self.day, self.time
        );

        format!(
            "Appointment booked for {} with {} on {} at {}.",
            self.patient_name, self.speciality, self.day, self.time
        )
    }
}
