//! Terminal front end for the questionnaire.

pub mod forms;
pub mod output;
pub mod prompts;
pub mod script;

use std::fs;

use tracing::info;

use crate::config::Config;
use crate::errors::CliError;
use crate::schema::QuestionnaireSchema;
use crate::wizard::ConsoleSink;

pub use forms::{FormEngine, FormInteraction, FormResult, PromptResponse};
pub use prompts::WizardInteraction;
pub use script::ScriptInteraction;

/// Set to any value to read answers from stdin, one line per step.
pub const SCRIPT_ENV: &str = "VEHICLE_QUESTIONNAIRE_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

impl CliMode {
    pub fn detect() -> Self {
        if std::env::var_os(SCRIPT_ENV).is_some() {
            CliMode::Script
        } else {
            CliMode::Interactive
        }
    }
}

/// The schema named by `config.schema_path`, or the built-in vehicle survey.
pub fn load_schema(config: &Config) -> Result<QuestionnaireSchema, CliError> {
    match &config.schema_path {
        Some(path) => {
            info!(path = %path.display(), "loading schema definition");
            let raw = fs::read_to_string(path)?;
            Ok(QuestionnaireSchema::from_json(&raw)?)
        }
        None => Ok(QuestionnaireSchema::vehicle_needs()),
    }
}

pub fn run_cli(config: &Config) -> Result<(), CliError> {
    let mode = CliMode::detect();
    if mode == CliMode::Script || !config.color {
        colored::control::set_override(false);
    }

    let schema = load_schema(config)?;
    let engine = FormEngine::new(&schema);
    let mut sink = ConsoleSink::stdout(config.pretty_payload);

    let result = match mode {
        CliMode::Interactive => {
            output::section("Vehicle needs");
            engine.run(&mut WizardInteraction::new(), &mut sink)?
        }
        CliMode::Script => engine.run(&mut ScriptInteraction::stdin(), &mut sink)?,
    };

    match result {
        FormResult::Completed(_) => output::success("Questionnaire submitted."),
        FormResult::Cancelled => output::info("Questionnaire cancelled."),
    }
    Ok(())
}
