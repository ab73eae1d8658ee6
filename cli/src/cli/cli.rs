// cli/src/cli/cli.rs

// Parses the command line, builds the client and session, and dispatches.

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use api_client::ApiService;
use lifetrack_lib::{ClientConfig, FileSessionStore, Session};

use crate::cli::commands::{CliArgs, Commands};
use crate::cli::handlers;
use crate::cli::interactive;

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    let config = ClientConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let backend = ApiService::new(&config)?;

    let mut session = Session::restore(FileSessionStore::open(config.session_path()?)?)?;
    debug!("Using session file {}", session.store().path().display());

    match args.command {
        Commands::Ping => handlers::ping(&backend).await,
        Commands::Register(register) => handlers::register(&backend, register).await,
        Commands::Login { email, password } => handlers::login(&backend, &mut session, &email, &password).await,
        Commands::Logout => handlers::logout(&mut session),
        Commands::Whoami => {
            handlers::whoami(&session);
            Ok(())
        }
        Commands::Dashboard => handlers::dashboard(&backend).await,
        Commands::Home => handlers::home(&backend, session.require_user()?).await,
        Commands::Doctors(wrapper) => handlers::doctors(&backend, session.require_user()?, wrapper.command).await,
        Commands::Records(wrapper) => handlers::records(&backend, session.require_user()?, wrapper.command).await,
        Commands::Treatments(wrapper) => {
            handlers::treatments(&backend, session.require_user()?, wrapper.command).await
        }
        Commands::Insights => handlers::insights(&backend, session.require_user()?).await,
        Commands::Voice(wrapper) => handlers::dictate(&backend, session.require_user()?, wrapper.command).await,
        Commands::Chat => interactive::run_chat(&backend, session.require_user()?).await,
    }
}
