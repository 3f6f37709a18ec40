//! Noah Ward
//!
//! Command-line front end for the hospital administration dashboard.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use noah_ward::config::{self, LoggingConfig};
use noah_ward::db::{JsonFileStore, KeyValueStore};
use noah_ward::models::{BedId, EntityId, NewAppointment, NewDoctor};
use noah_ward::ui::{Headless, Presenter, TerminalPresenter};
use noah_ward::Hospital;

#[derive(Parser)]
#[command(name = "noah-ward", about = "Hospital administration dashboard")]
struct Cli {
    /// Directory holding the stored collections
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    /// Do not print any views
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the counters and every table
    Dashboard,
    Doctors {
        #[command(subcommand)]
        action: DoctorCommand,
    },
    Patients {
        #[command(subcommand)]
        action: PatientCommand,
    },
    Appointments {
        #[command(subcommand)]
        action: AppointmentCommand,
    },
    Beds {
        #[command(subcommand)]
        action: BedCommand,
    },
    Emergencies {
        #[command(subcommand)]
        action: EmergencyCommand,
    },
}

#[derive(Subcommand)]
enum DoctorCommand {
    List,
    Add(AddDoctorArgs),
    Remove { id: EntityId },
    /// Switch between Available and On Leave
    Toggle { id: EntityId },
}

#[derive(Args)]
struct AddDoctorArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    specialization: String,
    /// Years of experience, stored as given
    #[arg(long, default_value = "")]
    experience: String,
    #[arg(long, default_value = "")]
    address: String,
    /// Avatar URL; one is generated from the name when omitted
    #[arg(long)]
    image: Option<String>,
    #[arg(long, default_value = "")]
    shift: String,
    #[arg(long = "break", default_value = "")]
    break_time: String,
}

#[derive(Subcommand)]
enum PatientCommand {
    List,
    Discharge { id: EntityId },
}

#[derive(Subcommand)]
enum AppointmentCommand {
    List,
    Book(BookArgs),
    /// Switch between Pending and Confirmed
    Toggle { id: EntityId },
    Cancel { id: EntityId },
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    patient: String,
    /// Name of a registered doctor
    #[arg(long)]
    doctor: String,
    #[arg(long)]
    date: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    gender: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    time: String,
    #[arg(long, default_value = "")]
    fees: String,
}

#[derive(Subcommand)]
enum BedCommand {
    List,
    /// Switch between Available and Occupied
    Toggle { id: u8 },
}

#[derive(Subcommand)]
enum EmergencyCommand {
    List,
    Raise,
    Resolve { id: EntityId },
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_config().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    let data_dir = cli.data_dir.unwrap_or(config.storage.data_dir);
    let store = JsonFileStore::open(&data_dir)
        .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;
    let mut hospital = Hospital::load(store).context("failed to load stored state")?;

    let mut ui: Box<dyn Presenter> = if cli.quiet {
        Box::new(Headless {
            assume_yes: cli.yes,
            notices: Vec::new(),
        })
    } else {
        Box::new(TerminalPresenter::stdio(cli.yes))
    };

    run(&mut hospital, cli.command, ui.as_mut())
}

fn run<S: KeyValueStore>(hospital: &mut Hospital<S>, command: Commands, ui: &mut dyn Presenter) -> Result<()> {
    match command {
        Commands::Dashboard => hospital.start(ui)?,
        Commands::Doctors { action } => match action {
            DoctorCommand::List => ui.render_doctors(hospital.doctors()),
            DoctorCommand::Add(args) => {
                hospital.add_doctor(
                    NewDoctor {
                        name: args.name,
                        specialization: args.specialization,
                        experience: args.experience,
                        address: args.address,
                        image: args.image,
                        shift: args.shift,
                        break_time: args.break_time,
                    },
                    ui,
                )?;
            }
            DoctorCommand::Remove { id } => report(hospital.remove_doctor(id, ui)?),
            DoctorCommand::Toggle { id } => report(hospital.toggle_doctor_status(id, ui)?),
        },
        Commands::Patients { action } => match action {
            PatientCommand::List => ui.render_patients(&hospital.patient_rows()),
            PatientCommand::Discharge { id } => report(hospital.discharge_patient(id, ui)?),
        },
        Commands::Appointments { action } => match action {
            AppointmentCommand::List => ui.render_appointments(hospital.appointments()),
            AppointmentCommand::Book(args) => {
                // the picker only offers registered doctors
                let options = hospital.doctor_options();
                if !options.iter().any(|o| o.value == args.doctor) {
                    let known: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
                    bail!("unknown doctor `{}`; choose one of: {}", args.doctor, known.join(", "));
                }
                hospital.book_appointment(
                    NewAppointment {
                        patient: args.patient,
                        phone: args.phone,
                        gender: args.gender,
                        address: args.address,
                        doctor: args.doctor,
                        date: args.date,
                        time: args.time,
                        fees: args.fees,
                    },
                    ui,
                )?;
            }
            AppointmentCommand::Toggle { id } => report(hospital.toggle_appointment_status(id, ui)?),
            AppointmentCommand::Cancel { id } => report(hospital.cancel_appointment(id, ui)?),
        },
        Commands::Beds { action } => match action {
            BedCommand::List => ui.render_beds(hospital.beds()),
            BedCommand::Toggle { id } => report(hospital.toggle_bed(BedId(id), ui)?),
        },
        Commands::Emergencies { action } => match action {
            EmergencyCommand::List => ui.render_emergencies(hospital.emergencies()),
            EmergencyCommand::Raise => {
                hospital.raise_emergency(ui)?;
            }
            EmergencyCommand::Resolve { id } => report(hospital.resolve_emergency(id, ui)?),
        },
    }
    Ok(())
}

// Unknown ids and declined confirmations are not errors.
fn report(changed: bool) {
    if !changed {
        debug!("nothing changed");
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("invalid log level")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
