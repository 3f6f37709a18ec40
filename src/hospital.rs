//! The hospital store: the five collections and every operation that
//! changes them.
//!
//! Each operation mutates the in-memory collections, writes all of them back
//! to the key-value store, and asks the presenter to redraw the affected
//! views. Lookups by id that find nothing change nothing and report `false`.

use tracing::{debug, info, instrument};
use validator::Validate;

use crate::core::dashboard::{self, DashboardCounters, DoctorOption, PatientRow};
use crate::db::{self, KeyValueStore, Slot, StoreError};
use crate::models::{
    doctor, Appointment, AppointmentStatus, Bed, BedId, Doctor, DoctorStatus, Emergency, EmergencyLevel,
    EntityId, IdSequence, NewAppointment, NewDoctor, Patient, SequenceExhausted,
};
use crate::ui::Presenter;

/// Format of the time of day stamped on a new emergency, e.g. `3:04:05 PM`.
const EMERGENCY_TIME_FORMAT: &str = "%-I:%M:%S %p";

#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid input: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Exhausted(#[from] SequenceExhausted),
}

pub type Result<T, E = HospitalError> = std::result::Result<T, E>;

/// Ids assigned by a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    pub appointment: EntityId,
    /// Set when the booking registered a new patient.
    pub patient: Option<EntityId>,
}

pub struct Hospital<S> {
    store: S,
    sequence: IdSequence,
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    beds: Vec<Bed>,
    emergencies: Vec<Emergency>,
}

impl<S: KeyValueStore> Hospital<S> {
    /// Loads every collection from `store`, seeding defaults where needed.
    ///
    /// Doctors fall back to the two default doctors when the slot is absent.
    /// A stored empty doctor list is kept empty, so removing every doctor
    /// survives a restart. Beds are reseeded to a full ward when absent or empty. A stored
    /// non-empty bed list is kept as it is.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Result<Self> {
        let doctors = match db::load_slot::<_, Vec<Doctor>>(&store, Slot::Doctors)? {
            Some(doctors) => doctors,
            None => {
                info!("no stored doctors, seeding defaults");
                Doctor::defaults()
            }
        };
        let patients = db::load_slot(&store, Slot::Patients)?.unwrap_or_default();
        let appointments = db::load_slot(&store, Slot::Appointments)?.unwrap_or_default();
        let emergencies = db::load_slot(&store, Slot::Emergencies)?.unwrap_or_default();
        let beds = match db::load_slot::<_, Vec<Bed>>(&store, Slot::Beds)? {
            Some(beds) if !beds.is_empty() => beds,
            _ => {
                info!("no stored beds, seeding ward");
                Bed::ward()
            }
        };
        let sequence = db::load_slot(&store, Slot::Sequence)?.unwrap_or_default();

        let mut hospital = Self {
            store,
            sequence,
            doctors,
            patients,
            appointments,
            beds,
            emergencies,
        };
        hospital.advance_sequence();
        debug!(
            doctors = hospital.doctors.len(),
            patients = hospital.patients.len(),
            appointments = hospital.appointments.len(),
            emergencies = hospital.emergencies.len(),
            next_id = %hospital.sequence.peek(),
            "hospital loaded"
        );
        Ok(hospital)
    }

    // A missing or stale sequence slot must not lead to reused ids.
    fn advance_sequence(&mut self) {
        let ids = self
            .doctors
            .iter()
            .map(|d| d.id)
            .chain(self.patients.iter().map(|p| p.id))
            .chain(self.appointments.iter().map(|a| a.id))
            .chain(self.emergencies.iter().map(|e| e.id));
        for id in ids {
            self.sequence.observe(id);
        }
    }

    /// Writes the loaded state back and draws every view.
    pub fn start(&mut self, ui: &mut dyn Presenter) -> Result<()> {
        self.persist(ui)?;
        self.render_all(ui);
        Ok(())
    }

    pub fn render_all(&self, ui: &mut dyn Presenter) {
        ui.render_doctors(&self.doctors);
        ui.render_patients(&self.patient_rows());
        ui.render_appointments(&self.appointments);
        ui.render_beds(&self.beds);
        ui.render_emergencies(&self.emergencies);
    }

    /// Writes all collections, then refreshes the counters and the doctor picker.
    fn persist(&mut self, ui: &mut dyn Presenter) -> Result<()> {
        db::save_slot(&mut self.store, Slot::Doctors, &self.doctors)?;
        db::save_slot(&mut self.store, Slot::Patients, &self.patients)?;
        db::save_slot(&mut self.store, Slot::Appointments, &self.appointments)?;
        db::save_slot(&mut self.store, Slot::Emergencies, &self.emergencies)?;
        db::save_slot(&mut self.store, Slot::Beds, &self.beds)?;
        db::save_slot(&mut self.store, Slot::Sequence, &self.sequence)?;

        ui.render_dashboard(&self.counters());
        ui.render_doctor_options(&self.doctor_options());
        Ok(())
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn beds(&self) -> &[Bed] {
        &self.beds
    }

    pub fn emergencies(&self) -> &[Emergency] {
        &self.emergencies
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn counters(&self) -> DashboardCounters {
        DashboardCounters::compute(&self.doctors, &self.appointments, &self.emergencies, &self.beds)
    }

    pub fn patient_rows(&self) -> Vec<PatientRow> {
        dashboard::patient_rows(&self.patients, &self.appointments)
    }

    pub fn doctor_options(&self) -> Vec<DoctorOption> {
        dashboard::doctor_options(&self.doctors)
    }

    // ===== Doctors =====

    /// Registers a doctor. New doctors always start out available.
    #[instrument(skip(self, input, ui), fields(name = %input.name))]
    pub fn add_doctor(&mut self, input: NewDoctor, ui: &mut dyn Presenter) -> Result<EntityId> {
        input.validate()?;

        let id = self.sequence.allocate()?;
        let image = match input.image {
            Some(url) if !url.is_empty() => url,
            _ => doctor::default_avatar_url(&input.name),
        };
        self.doctors.push(Doctor {
            id,
            name: input.name,
            specialization: input.specialization,
            experience: input.experience,
            address: input.address,
            image,
            shift: input.shift,
            break_time: input.break_time,
            status: DoctorStatus::Available,
        });

        self.persist(ui)?;
        ui.render_doctors(&self.doctors);
        info!(%id, "doctor added");
        Ok(id)
    }

    /// Removes a doctor after confirmation. Appointments keep the doctor's name.
    #[instrument(skip(self, ui))]
    pub fn remove_doctor(&mut self, id: EntityId, ui: &mut dyn Presenter) -> Result<bool> {
        if !ui.confirm("Remove doctor?") {
            return Ok(false);
        }
        let before = self.doctors.len();
        self.doctors.retain(|d| d.id != id);
        if self.doctors.len() == before {
            debug!("no doctor with this id");
            return Ok(false);
        }

        self.persist(ui)?;
        ui.render_doctors(&self.doctors);
        info!("doctor removed");
        Ok(true)
    }

    #[instrument(skip(self, ui))]
    pub fn toggle_doctor_status(&mut self, id: EntityId, ui: &mut dyn Presenter) -> Result<bool> {
        let Some(doc) = self.doctors.iter_mut().find(|d| d.id == id) else {
            debug!("no doctor with this id");
            return Ok(false);
        };
        doc.status = doc.status.toggled();
        let status = doc.status;

        self.persist(ui)?;
        ui.render_doctors(&self.doctors);
        info!(%status, "doctor status changed");
        Ok(true)
    }

    // ===== Appointments & patients =====

    /// Books a pending appointment and registers the patient if no patient
    /// with exactly this name exists yet.
    #[instrument(skip(self, input, ui), fields(patient = %input.patient, doctor = %input.doctor))]
    pub fn book_appointment(&mut self, input: NewAppointment, ui: &mut dyn Presenter) -> Result<Booking> {
        input.validate()?;

        let appointment = self.sequence.allocate()?;
        let patient = if self.patients.iter().any(|p| p.name == input.patient) {
            None
        } else {
            let id = self.sequence.allocate()?;
            self.patients.push(Patient {
                id,
                name: input.patient.clone(),
                phone: input.phone.clone(),
                gender: input.gender.clone(),
            });
            Some(id)
        };
        self.appointments.push(Appointment {
            id: appointment,
            patient: input.patient,
            phone: input.phone,
            gender: input.gender,
            address: input.address,
            doctor: input.doctor,
            date: input.date,
            time: input.time,
            fees: input.fees,
            status: AppointmentStatus::Pending,
        });

        self.persist(ui)?;
        ui.render_appointments(&self.appointments);
        ui.render_patients(&self.patient_rows());
        ui.notify("Appointment Booked Successfully!");
        info!(%appointment, new_patient = patient.is_some(), "appointment booked");
        Ok(Booking { appointment, patient })
    }

    #[instrument(skip(self, ui))]
    pub fn toggle_appointment_status(&mut self, id: EntityId, ui: &mut dyn Presenter) -> Result<bool> {
        let Some(app) = self.appointments.iter_mut().find(|a| a.id == id) else {
            debug!("no appointment with this id");
            return Ok(false);
        };
        app.status = app.status.toggled();
        let status = app.status;

        self.persist(ui)?;
        ui.render_appointments(&self.appointments);
        ui.render_patients(&self.patient_rows());
        info!(%status, "appointment status changed");
        Ok(true)
    }

    #[instrument(skip(self, ui))]
    pub fn cancel_appointment(&mut self, id: EntityId, ui: &mut dyn Presenter) -> Result<bool> {
        if !ui.confirm("Cancel appointment?") {
            return Ok(false);
        }
        let before = self.appointments.len();
        self.appointments.retain(|a| a.id != id);
        if self.appointments.len() == before {
            debug!("no appointment with this id");
            return Ok(false);
        }

        self.persist(ui)?;
        ui.render_appointments(&self.appointments);
        ui.render_patients(&self.patient_rows());
        info!("appointment cancelled");
        Ok(true)
    }

    /// Discharges a patient after confirmation. Their appointments stay.
    #[instrument(skip(self, ui))]
    pub fn discharge_patient(&mut self, id: EntityId, ui: &mut dyn Presenter) -> Result<bool> {
        if !ui.confirm("Discharge patient?") {
            return Ok(false);
        }
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        if self.patients.len() == before {
            debug!("no patient with this id");
            return Ok(false);
        }

        self.persist(ui)?;
        ui.render_patients(&self.patient_rows());
        info!("patient discharged");
        Ok(true)
    }

    // ===== Beds =====

    #[instrument(skip(self, ui))]
    pub fn toggle_bed(&mut self, id: BedId, ui: &mut dyn Presenter) -> Result<bool> {
        let Some(bed) = self.beds.iter_mut().find(|b| b.id == id) else {
            debug!("no bed with this id");
            return Ok(false);
        };
        bed.status = bed.status.toggled();
        let status = bed.status;

        self.persist(ui)?;
        ui.render_beds(&self.beds);
        info!(%status, "bed status changed");
        Ok(true)
    }

    // ===== Emergencies =====

    /// Raises a critical alert stamped with the current local time.
    pub fn raise_emergency(&mut self, ui: &mut dyn Presenter) -> Result<EntityId> {
        let time = chrono::Local::now().format(EMERGENCY_TIME_FORMAT).to_string();
        self.raise_emergency_at(time, ui)
    }

    #[instrument(skip(self, time, ui))]
    pub fn raise_emergency_at(&mut self, time: impl Into<String>, ui: &mut dyn Presenter) -> Result<EntityId> {
        let id = self.sequence.allocate()?;
        self.emergencies.push(Emergency {
            id,
            time: time.into(),
            status: EmergencyLevel::Critical,
        });
        ui.notify("Emergency Alert Triggered!");

        self.persist(ui)?;
        ui.render_emergencies(&self.emergencies);
        info!(%id, "emergency raised");
        Ok(id)
    }

    #[instrument(skip(self, ui))]
    pub fn resolve_emergency(&mut self, id: EntityId, ui: &mut dyn Presenter) -> Result<bool> {
        if !ui.confirm("Mark resolved?") {
            return Ok(false);
        }
        let before = self.emergencies.len();
        self.emergencies.retain(|e| e.id != id);
        if self.emergencies.len() == before {
            debug!("no emergency with this id");
            return Ok(false);
        }

        self.persist(ui)?;
        ui.render_emergencies(&self.emergencies);
        info!("emergency resolved");
        Ok(true)
    }
}
