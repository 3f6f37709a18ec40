//! Entity types held by the hospital store.

pub mod appointment;
pub mod bed;
pub mod doctor;
pub mod emergency;
pub mod id;
pub mod patient;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use bed::{Bed, BedId, BedStatus, TOTAL_BED_COUNT};
pub use doctor::{Doctor, DoctorStatus, NewDoctor};
pub use emergency::{Emergency, EmergencyLevel};
pub use id::{EntityId, IdSequence, SequenceExhausted};
pub use patient::Patient;
