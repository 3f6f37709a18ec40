//! Presentation seam.
//!
//! The hospital store calls into a [`Presenter`] after every mutation. A
//! presenter only reads the snapshots it is handed; all changes go back
//! through the store's operations.

use crate::core::dashboard::{DashboardCounters, DoctorOption, PatientRow};
use crate::models::{Appointment, Bed, Doctor, Emergency};

pub mod terminal;

pub use terminal::TerminalPresenter;

#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    fn render_dashboard(&mut self, counters: &DashboardCounters);
    fn render_doctor_options(&mut self, options: &[DoctorOption]);
    fn render_doctors(&mut self, doctors: &[Doctor]);
    fn render_patients(&mut self, rows: &[PatientRow]);
    fn render_appointments(&mut self, appointments: &[Appointment]);
    fn render_beds(&mut self, beds: &[Bed]);
    fn render_emergencies(&mut self, emergencies: &[Emergency]);

    /// Asks the user to approve a destructive action.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Shows a one-off message such as a booking confirmation.
    fn notify(&mut self, message: &str);
}

/// Presenter that draws nothing. Confirmations get a fixed answer and
/// notifications are collected.
#[derive(Debug, Clone, Default)]
pub struct Headless {
    pub assume_yes: bool,
    pub notices: Vec<String>,
}

impl Headless {
    pub fn approving() -> Self {
        Self {
            assume_yes: true,
            notices: Vec::new(),
        }
    }
}

impl Presenter for Headless {
    fn render_dashboard(&mut self, _counters: &DashboardCounters) {}
    fn render_doctor_options(&mut self, _options: &[DoctorOption]) {}
    fn render_doctors(&mut self, _doctors: &[Doctor]) {}
    fn render_patients(&mut self, _rows: &[PatientRow]) {}
    fn render_appointments(&mut self, _appointments: &[Appointment]) {}
    fn render_beds(&mut self, _beds: &[Bed]) {}
    fn render_emergencies(&mut self, _emergencies: &[Emergency]) {}

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.assume_yes
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
