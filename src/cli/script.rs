use std::io::{self, BufRead, Lines, StdinLock};

use tracing::debug;

use crate::cli::forms::{parse_text_response, FormInteraction, PromptResponse};
use crate::cli::output;
use crate::errors::{CliError, WizardError};
use crate::wizard::StepPrompt;

/// Answers each step with the next input line. Running out of input cancels.
pub struct ScriptInteraction<R: BufRead> {
    lines: Lines<R>,
}

impl ScriptInteraction<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ScriptInteraction<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> FormInteraction for ScriptInteraction<R> {
    fn prompt_field(&mut self, prompt: &StepPrompt<'_>) -> Result<PromptResponse, CliError> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                debug!(field = prompt.field.name(), input = %line.trim(), "script answer");
                Ok(parse_text_response(&line))
            }
            None => {
                debug!(field = prompt.field.name(), "script input exhausted");
                Ok(PromptResponse::Cancel)
            }
        }
    }

    fn report_error(&mut self, error: &WizardError) {
        output::warning(error);
    }
}
