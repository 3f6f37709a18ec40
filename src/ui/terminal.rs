use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::Presenter;
use crate::core::dashboard::{DashboardCounters, DoctorOption, PatientRow};
use crate::models::{Appointment, Bed, Doctor, Emergency};

const BEDS_PER_ROW: usize = 5;

/// Renders views as plain-text tables.
pub struct TerminalPresenter<W, R> {
    out: W,
    input: R,
    assume_yes: bool,
}

impl TerminalPresenter<io::Stdout, io::StdinLock<'static>> {
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdout(), io::stdin().lock(), assume_yes)
    }
}

impl<W: Write, R: BufRead> TerminalPresenter<W, R> {
    pub fn new(out: W, input: R, assume_yes: bool) -> Self {
        Self {
            out,
            input,
            assume_yes,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<W: Write, R: BufRead> Presenter for TerminalPresenter<W, R> {
    fn render_dashboard(&mut self, counters: &DashboardCounters) {
        let line = format!(
            "Doctors: {}  Appointments: {}  Emergencies: {}  Beds available: {}\n",
            counters.doctors,
            counters.appointments,
            counters.emergencies,
            counters.bed_availability()
        );
        self.emit(&line);
    }

    fn render_doctor_options(&mut self, options: &[DoctorOption]) {
        debug!(count = options.len(), "doctor picker refreshed");
    }

    fn render_doctors(&mut self, doctors: &[Doctor]) {
        let rows = doctors
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.name.clone(),
                    d.specialization.clone(),
                    format!("{} Years Exp.", d.experience),
                    d.address.clone(),
                    d.shift.clone(),
                    d.break_time.clone(),
                    d.status.to_string(),
                    d.avatar_url(),
                ]
            })
            .collect();
        let text = table(
            &["ID", "Name", "Specialization", "Experience", "Address", "Shift", "Break", "Status", "Image"],
            rows,
        );
        self.emit(&text);
    }

    fn render_patients(&mut self, patients: &[PatientRow]) {
        let rows = patients
            .iter()
            .map(|row| {
                vec![
                    row.patient.id.to_string(),
                    row.patient.name.clone(),
                    row.patient.phone.clone(),
                    row.patient.gender.clone(),
                    row.status.to_string(),
                ]
            })
            .collect();
        let text = table(&["ID", "Name", "Phone", "Gender", "Status"], rows);
        self.emit(&text);
    }

    fn render_appointments(&mut self, appointments: &[Appointment]) {
        // newest first
        let rows = appointments
            .iter()
            .rev()
            .map(|a| {
                vec![
                    a.id.to_string(),
                    a.patient.clone(),
                    a.phone.clone(),
                    a.doctor.clone(),
                    a.date.clone(),
                    a.time_display().to_string(),
                    a.fee_display(),
                    a.status.to_string(),
                ]
            })
            .collect();
        let text = table(
            &["ID", "Patient", "Phone", "Doctor", "Date", "Time", "Fees", "Status"],
            rows,
        );
        self.emit(&text);
    }

    fn render_beds(&mut self, beds: &[Bed]) {
        let mut text = String::new();
        for chunk in beds.chunks(BEDS_PER_ROW) {
            let cells: Vec<String> = chunk
                .iter()
                .map(|b| format!("[Bed {:>2} {:<9}]", b.id, b.status.as_str()))
                .collect();
            text.push_str(&cells.join(" "));
            text.push('\n');
        }
        self.emit(&text);
    }

    fn render_emergencies(&mut self, emergencies: &[Emergency]) {
        let rows = emergencies
            .iter()
            .map(|e| vec![e.id.to_string(), e.time.clone(), e.status.label().to_string()])
            .collect();
        let text = table(&["ID", "Time", "Priority"], rows);
        self.emit(&text);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        self.emit(&format!("{prompt} [y/N] "));
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(err) => {
                warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    if rows.is_empty() {
        out.push_str("(none)\n");
    }
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}
