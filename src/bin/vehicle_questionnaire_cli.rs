use std::process;

use vehicle_questionnaire::{cli, config::ConfigManager, errors::CliError, init_with_filter};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let manager = ConfigManager::new();
    let config = manager.load()?;
    init_with_filter(&config.log_filter);
    tracing::debug!(path = %manager.path().display(), "configuration loaded");
    cli::run_cli(&config)
}
