// cli/src/cli/mod.rs

// Command parsing, dispatch and terminal rendering for `lifetrack-cli`.

pub mod cli;
pub mod commands;
pub mod display;
pub mod forms;
pub mod handlers;
pub mod interactive;

#[cfg(test)]
mod test_support;

pub use cli::start_cli;
pub use commands::{
    CliArgs, Commands, DoctorCommand, DoctorFields, RecordCommand, RecordFields, TreatmentCommand,
    TreatmentFields, VoiceCommand,
};
