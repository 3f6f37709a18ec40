use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityId;

/// Shown when an appointment was booked without a time.
pub const DEFAULT_TIME_DISPLAY: &str = "09:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
}

impl AppointmentStatus {
    pub fn toggled(self) -> Self {
        match self {
            AppointmentStatus::Pending => AppointmentStatus::Confirmed,
            AppointmentStatus::Confirmed => AppointmentStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked appointment.
///
/// `patient` and `doctor` are copies of the names at booking time, not
/// references. Renaming or removing either leaves this record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: EntityId,
    pub patient: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: String,
    pub doctor: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub fees: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn time_display(&self) -> &str {
        if self.time.is_empty() {
            DEFAULT_TIME_DISPLAY
        } else {
            &self.time
        }
    }

    pub fn fee_display(&self) -> String {
        if self.fees.is_empty() {
            "-".to_string()
        } else {
            format!("${}", self.fees)
        }
    }
}

/// Form input for booking an appointment. Values are stored verbatim.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewAppointment {
    #[validate(length(min = 1, message = "patient name is required"))]
    pub patient: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    #[validate(length(min = 1, message = "doctor is required"))]
    pub doctor: String,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    pub time: String,
    pub fees: String,
}
