use noah_ward::core::dashboard::PatientStatus;
use noah_ward::db::{JsonFileStore, KeyValueStore, MemoryStore};
use noah_ward::models::{AppointmentStatus, BedId, BedStatus, DoctorStatus, NewAppointment, NewDoctor};
use noah_ward::ui::Headless;
use noah_ward::Hospital;

fn open(dir: &std::path::Path) -> Hospital<JsonFileStore> {
    Hospital::load(JsonFileStore::open(dir).unwrap()).unwrap()
}

fn booking(patient: &str, doctor: &str) -> NewAppointment {
    NewAppointment {
        patient: patient.into(),
        phone: "555-0199".into(),
        gender: "Male".into(),
        address: "42 Harbour Rd".into(),
        doctor: doctor.into(),
        date: "2024-06-12".into(),
        time: String::new(),
        fees: "80".into(),
    }
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut ui = Headless::approving();

    let (doctors, patients, appointments, beds, emergencies) = {
        let mut hospital = open(dir.path());
        hospital.start(&mut ui).unwrap();
        hospital
            .add_doctor(
                NewDoctor {
                    name: "Dr. Adeyemi".into(),
                    specialization: "Pediatrics".into(),
                    experience: "11".into(),
                    ..Default::default()
                },
                &mut ui,
            )
            .unwrap();
        hospital.book_appointment(booking("Sam Hill", "Dr. Adeyemi"), &mut ui).unwrap();
        hospital.book_appointment(booking("Ana Ruiz", "Dr. Smith"), &mut ui).unwrap();
        hospital.toggle_bed(BedId(3), &mut ui).unwrap();
        hospital.raise_emergency_at("11:59:59 PM", &mut ui).unwrap();
        (
            hospital.doctors().to_vec(),
            hospital.patients().to_vec(),
            hospital.appointments().to_vec(),
            hospital.beds().to_vec(),
            hospital.emergencies().to_vec(),
        )
    };

    let reloaded = open(dir.path());
    assert_eq!(reloaded.doctors(), doctors.as_slice());
    assert_eq!(reloaded.patients(), patients.as_slice());
    assert_eq!(reloaded.appointments(), appointments.as_slice());
    assert_eq!(reloaded.beds(), beds.as_slice());
    assert_eq!(reloaded.emergencies(), emergencies.as_slice());
    assert_eq!(reloaded.counters().bed_availability(), "19 / 20");
}

#[test]
fn ids_are_not_reused_after_removal_and_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut ui = Headless::approving();

    let resolved = {
        let mut hospital = open(dir.path());
        let id = hospital.raise_emergency_at("1:00:00 AM", &mut ui).unwrap();
        assert!(hospital.resolve_emergency(id, &mut ui).unwrap());
        id
    };

    let mut hospital = open(dir.path());
    let next = hospital.raise_emergency_at("1:05:00 AM", &mut ui).unwrap();
    assert!(next > resolved);
}

#[test]
fn browser_export_loads_unchanged() {
    let mut store = MemoryStore::new();
    store
        .set(
            "doctors",
            r#"[{"id":1,"name":"Dr. Smith","specialization":"Cardiology","experience":15,
                "address":"123 Medical Lane, Cityville","image":"https://i.pravatar.cc/150?img=11",
                "shift":"09:00 AM - 05:00 PM","break":"01:00 PM - 02:00 PM","status":"Available"},
               {"id":1718000000000,"name":"Dr. Lee","specialization":"ENT","experience":"6",
                "address":"","image":"","shift":"","break":"","status":"On Leave"}]"#
                .into(),
        )
        .unwrap();
    store
        .set(
            "appointments",
            r#"[{"id":1718000000100,"patient":"Kim","phone":"1","gender":"Female","address":"",
                "doctor":"Dr. Lee","date":"2024-06-10","time":"","fees":"","status":"Confirmed"}]"#
                .into(),
        )
        .unwrap();
    store
        .set(
            "patients",
            r#"[{"id":1718000000101,"name":"Kim","phone":"1","gender":"Female"}]"#.into(),
        )
        .unwrap();

    let hospital = Hospital::load(store).unwrap();
    assert_eq!(hospital.doctors().len(), 2);
    assert_eq!(hospital.doctors()[1].experience, "6");
    assert_eq!(hospital.doctors()[1].status, DoctorStatus::OnLeave);
    assert_eq!(
        hospital.patient_rows()[0].status,
        PatientStatus::Booked(AppointmentStatus::Confirmed)
    );
    assert_eq!(hospital.beds().len(), 20);
}

#[test]
fn partial_bed_list_is_preserved() {
    let mut store = MemoryStore::new();
    store
        .set("beds", r#"[{"id":1,"status":"Occupied"},{"id":2,"status":"Available"}]"#.into())
        .unwrap();

    let hospital = Hospital::load(store).unwrap();
    assert_eq!(hospital.beds().len(), 2);
    assert_eq!(hospital.beds()[0].status, BedStatus::Occupied);
    assert_eq!(hospital.counters().bed_availability(), "1 / 20");
}

#[test]
fn corrupt_slot_fails_to_load() {
    let mut store = MemoryStore::new();
    store.set("appointments", r#"{"oops":true}"#.into()).unwrap();
    assert!(Hospital::load(store).is_err());
}

#[test]
fn size_deltas_per_operation() {
    let mut hospital = Hospital::load(MemoryStore::new()).unwrap();
    let mut ui = Headless::approving();

    let doc = hospital
        .add_doctor(
            NewDoctor {
                name: "Dr. Okafor".into(),
                specialization: "Dermatology".into(),
                ..Default::default()
            },
            &mut ui,
        )
        .unwrap();
    assert_eq!(hospital.doctors().len(), 3);

    let booked = hospital.book_appointment(booking("Lia", "Dr. Okafor"), &mut ui).unwrap();
    assert_eq!((hospital.appointments().len(), hospital.patients().len()), (1, 1));

    hospital.toggle_doctor_status(doc, &mut ui).unwrap();
    hospital.toggle_appointment_status(booked.appointment, &mut ui).unwrap();
    hospital.toggle_bed(BedId(1), &mut ui).unwrap();
    assert_eq!(hospital.doctors().len(), 3);
    assert_eq!(hospital.appointments().len(), 1);
    assert_eq!(hospital.beds().len(), 20);

    let em = hospital.raise_emergency_at("2:00:00 PM", &mut ui).unwrap();
    assert_eq!(hospital.emergencies().len(), 1);

    assert!(hospital.remove_doctor(doc, &mut ui).unwrap());
    assert!(hospital.cancel_appointment(booked.appointment, &mut ui).unwrap());
    assert!(hospital.discharge_patient(booked.patient.unwrap(), &mut ui).unwrap());
    assert!(hospital.resolve_emergency(em, &mut ui).unwrap());
    assert_eq!(hospital.doctors().len(), 2);
    assert!(hospital.appointments().is_empty());
    assert!(hospital.patients().is_empty());
    assert!(hospital.emergencies().is_empty());
}

#[test]
fn free_form_experience_loads_and_is_written_back_unchanged() {
    let mut store = MemoryStore::new();
    store
        .set(
            "doctors",
            r#"[{"id":5,"name":"Dr. Park","experience":"7.5","status":"Available"},
               {"id":6,"name":"Dr. Cole","experience":"5 years","status":"Available"},
               {"id":7,"name":"Dr. Diaz","experience":7.5,"status":"On Leave"},
               {"id":8,"name":"Dr. Roy","experience":-1,"status":"Available"}]"#
                .into(),
        )
        .unwrap();

    let mut hospital = Hospital::load(store).unwrap();
    let years: Vec<&str> = hospital.doctors().iter().map(|d| d.experience.as_str()).collect();
    assert_eq!(years, ["7.5", "5 years", "7.5", "-1"]);

    hospital.start(&mut Headless::default()).unwrap();
    let reloaded = Hospital::load(hospital.into_store()).unwrap();
    assert_eq!(reloaded.doctors()[0].experience, "7.5");
    assert_eq!(reloaded.doctors()[1].experience, "5 years");
}
