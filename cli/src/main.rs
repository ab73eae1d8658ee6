// cli/src/main.rs

// Entry point for the LifeTrack command-line client.

use colored::Colorize;
use lifetrack_cli::cli::start_cli;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = start_cli().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
