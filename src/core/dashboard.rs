//! Views derived from the current collections.
//!
//! Nothing here is cached. Each value is recomputed from the collections on
//! every render so it can never disagree with them.

use std::fmt;

use crate::models::{Appointment, AppointmentStatus, Bed, Doctor, DoctorStatus, Emergency, Patient, TOTAL_BED_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounters {
    pub doctors: usize,
    pub appointments: usize,
    pub emergencies: usize,
    pub beds_available: usize,
}

impl DashboardCounters {
    pub fn compute(
        doctors: &[Doctor],
        appointments: &[Appointment],
        emergencies: &[Emergency],
        beds: &[Bed],
    ) -> Self {
        Self {
            doctors: doctors.len(),
            appointments: appointments.len(),
            emergencies: emergencies.len(),
            beds_available: beds.iter().filter(|b| b.is_available()).count(),
        }
    }

    /// `"<available> / 20"`. The denominator is the fixed ward size.
    pub fn bed_availability(&self) -> String {
        format!("{} / {}", self.beds_available, TOTAL_BED_COUNT)
    }
}

/// What the patients table shows in its status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientStatus {
    Booked(AppointmentStatus),
    NoAppointment,
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Booked(status) => f.write_str(status.as_str()),
            PatientStatus::NoAppointment => f.write_str("No Appointment"),
        }
    }
}

/// Status of the first appointment, in collection order, booked under the
/// patient's exact name.
pub fn patient_status(patient: &Patient, appointments: &[Appointment]) -> PatientStatus {
    appointments
        .iter()
        .find(|a| a.patient == patient.name)
        .map_or(PatientStatus::NoAppointment, |a| PatientStatus::Booked(a.status))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub patient: Patient,
    pub status: PatientStatus,
}

pub fn patient_rows(patients: &[Patient], appointments: &[Appointment]) -> Vec<PatientRow> {
    patients
        .iter()
        .map(|p| PatientRow {
            patient: p.clone(),
            status: patient_status(p, appointments),
        })
        .collect()
}

/// An entry of the doctor picker used when booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorOption {
    pub value: String,
    pub label: String,
}

pub fn doctor_options(doctors: &[Doctor]) -> Vec<DoctorOption> {
    doctors
        .iter()
        .map(|d| DoctorOption {
            value: d.name.clone(),
            label: match d.status {
                DoctorStatus::OnLeave => format!("{} (On Leave)", d.name),
                DoctorStatus::Available => d.name.clone(),
            },
        })
        .collect()
}
