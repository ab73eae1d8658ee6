// cli/src/cli/commands.rs

// Command-line arguments and subcommands for `lifetrack-cli`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use models::medical::user::DEFAULT_GENDER;
use models::{DoctorId, RecordId, TreatmentId};

#[derive(Parser, Debug)]
#[command(name = "lifetrack-cli")]
#[command(version = "0.1.0")]
#[command(about = "LifeTrack personal health record client")]
pub struct CliArgs {
    /// Configuration file (defaults to ./lifetrack.toml when present)
    #[clap(long, global = true, env = "LIFETRACK_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the backend is reachable
    Ping,
    /// Create a patient account
    Register(RegisterArgs),
    /// Log in with email and password
    Login {
        #[clap(long, short = 'e')]
        email: String,
        #[clap(long, short = 'p')]
        password: String,
    },
    Logout,
    /// Show the logged-in patient
    Whoami,
    /// Counters and the most recent records
    Home,
    Doctors(DoctorCommandWrapper),
    Records(RecordCommandWrapper),
    Treatments(TreatmentCommandWrapper),
    /// AI summary of your health data
    Insights,
    /// Dictate a record or a doctor
    Voice(VoiceCommandWrapper),
    /// Talk to the health assistant
    Chat,
    /// System-wide collection counts
    Dashboard,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[clap(long)]
    pub name: String,
    #[clap(long)]
    pub age: Option<u32>,
    #[clap(long, default_value = DEFAULT_GENDER)]
    pub gender: String,
    #[clap(long)]
    pub contact_number: String,
    #[clap(long)]
    pub email: String,
    #[clap(long)]
    pub password: String,
    #[clap(long)]
    pub confirm_password: String,
}

#[derive(Debug, Args)]
pub struct DoctorCommandWrapper {
    #[clap(subcommand)]
    pub command: DoctorCommand,
}

#[derive(Debug, Args)]
pub struct RecordCommandWrapper {
    #[clap(subcommand)]
    pub command: RecordCommand,
}

#[derive(Debug, Args)]
pub struct TreatmentCommandWrapper {
    #[clap(subcommand)]
    pub command: TreatmentCommand,
}

#[derive(Debug, Args)]
pub struct VoiceCommandWrapper {
    #[clap(subcommand)]
    pub command: VoiceCommand,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum DoctorCommand {
    /// Every doctor in the system
    List,
    /// Doctors on at least one of your records
    Visited,
    Add(DoctorFields),
    Update {
        id: DoctorId,
        #[clap(flatten)]
        fields: DoctorFields,
    },
    Delete {
        id: DoctorId,
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum RecordCommand {
    List,
    Add(RecordFields),
    Update {
        id: RecordId,
        #[clap(flatten)]
        fields: RecordFields,
    },
    Delete {
        id: RecordId,
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum TreatmentCommand {
    List,
    /// Treatments with diagnosis, date and doctor of their record
    History,
    Add(TreatmentFields),
    Update {
        id: TreatmentId,
        #[clap(flatten)]
        fields: TreatmentFields,
    },
    Delete {
        id: TreatmentId,
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum VoiceCommand {
    /// Dictate a visit; saves a health record and, when a medication is named, a treatment
    Record {
        /// Transcript to parse instead of dictating on stdin
        #[clap(long, short = 't')]
        text: Option<String>,
        /// Save the parsed draft without reviewing it
        #[clap(long, short = 'y')]
        yes: bool,
    },
    /// Dictate a new doctor
    Doctor {
        #[clap(long, short = 't')]
        text: Option<String>,
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

/// Doctor fields. On update, only the given ones change.
#[derive(Debug, Args, Default, Clone, PartialEq)]
pub struct DoctorFields {
    #[clap(long)]
    pub name: Option<String>,
    #[clap(long)]
    pub specialization: Option<String>,
    #[clap(long)]
    pub contact_number: Option<String>,
    #[clap(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args, Default, Clone, PartialEq)]
pub struct RecordFields {
    #[clap(long)]
    pub diagnosis: Option<String>,
    #[clap(long)]
    pub doctor_id: Option<DoctorId>,
    /// YYYY-MM-DD, defaults to today on add
    #[clap(long)]
    pub date: Option<String>,
    #[clap(long, value_hint = clap::ValueHint::FilePath)]
    pub file_path: Option<String>,
}

#[derive(Debug, Args, Default, Clone, PartialEq)]
pub struct TreatmentFields {
    #[clap(long)]
    pub record_id: Option<RecordId>,
    #[clap(long)]
    pub medication: Option<String>,
    #[clap(long)]
    pub procedure: Option<String>,
    #[clap(long)]
    pub follow_up_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("lifetrack-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_nested_doctor_update() {
        let args = parse(&["doctors", "update", "5", "--name", "Dr. Lee", "--email", "lee@clinic.test"]);
        let Commands::Doctors(wrapper) = args.command else { panic!("expected doctors command") };
        assert_eq!(
            wrapper.command,
            DoctorCommand::Update {
                id: 5,
                fields: DoctorFields {
                    name: Some("Dr. Lee".to_string()),
                    email: Some("lee@clinic.test".to_string()),
                    ..DoctorFields::default()
                },
            }
        );
    }

    #[test]
    fn delete_confirmation_can_be_skipped() {
        let args = parse(&["records", "delete", "10", "-y"]);
        let Commands::Records(wrapper) = args.command else { panic!("expected records command") };
        assert_eq!(wrapper.command, RecordCommand::Delete { id: 10, yes: true });
    }

    #[test]
    fn config_is_global() {
        let args = parse(&["treatments", "history", "--config", "/etc/lifetrack.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/etc/lifetrack.toml")));
    }

    #[test]
    fn register_defaults_gender() {
        let args = parse(&[
            "register",
            "--name",
            "Asha",
            "--age",
            "34",
            "--contact-number",
            "555-0100",
            "--email",
            "a@x.com",
            "--password",
            "pass",
            "--confirm-password",
            "pass",
        ]);
        let Commands::Register(register) = args.command else { panic!("expected register command") };
        assert_eq!(register.gender, "Male");
        assert_eq!(register.age, Some(34));
    }

    #[test]
    fn login_requires_credentials() {
        let parsed = CliArgs::try_parse_from(["lifetrack-cli", "login", "--email", "a@x.com"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn voice_text_is_optional() {
        let args = parse(&["voice", "record"]);
        let Commands::Voice(wrapper) = args.command else { panic!("expected voice command") };
        assert_eq!(wrapper.command, VoiceCommand::Record { text: None, yes: false });
    }
}
