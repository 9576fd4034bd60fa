//! Drives a [`WizardController`] from a prompt source.
//!
//! The engine owns the loop: it asks the interaction for a response to the
//! current step, applies it to the controller, and reports validation failures
//! back so the same step is asked again. Interactions only translate between a
//! terminal (or a script) and [`PromptResponse`].

use tracing::debug;

use crate::errors::{CliError, WizardError};
use crate::schema::QuestionnaireSchema;
use crate::wizard::{Advance, PayloadSink, StepPrompt, SubmissionPayload, WizardController};

/// Typed in a text prompt to go back one step.
pub const BACK_COMMAND: &str = ":back";
/// Typed in a text prompt to abandon the questionnaire.
pub const CANCEL_COMMAND: &str = ":cancel";

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// Raw text, coerced to the field type by the controller.
    Value(String),
    /// Picked from a yes/no control.
    Toggle(bool),
    /// Keep the current answer (or the field default) and advance.
    Keep,
    Back,
    Cancel,
}

/// Maps a line of text input to a response. Blank keeps the current answer.
pub fn parse_text_response(line: &str) -> PromptResponse {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        PromptResponse::Keep
    } else if trimmed.eq_ignore_ascii_case(BACK_COMMAND) {
        PromptResponse::Back
    } else if trimmed.eq_ignore_ascii_case(CANCEL_COMMAND) {
        PromptResponse::Cancel
    } else {
        PromptResponse::Value(trimmed.to_string())
    }
}

/// Presentation side of the form engine.
pub trait FormInteraction {
    fn prompt_field(&mut self, prompt: &StepPrompt<'_>) -> Result<PromptResponse, CliError>;

    /// Called when the current answer was rejected; the step is asked again.
    fn report_error(&mut self, error: &WizardError);
}

pub struct FormEngine<'a> {
    schema: &'a QuestionnaireSchema,
}

impl<'a> FormEngine<'a> {
    pub fn new(schema: &'a QuestionnaireSchema) -> Self {
        Self { schema }
    }

    /// Runs one questionnaire to completion or cancellation. The payload is
    /// handed to `sink` before being returned.
    pub fn run<I, S>(
        &self,
        interaction: &mut I,
        sink: &mut S,
    ) -> Result<FormResult<SubmissionPayload>, CliError>
    where
        I: FormInteraction,
        S: PayloadSink,
    {
        let mut controller = WizardController::new(self.schema);

        loop {
            let (name, response) = {
                let prompt = controller.prompt()?;
                let response = interaction.prompt_field(&prompt)?;
                (prompt.field.name().to_string(), response)
            };

            let outcome = match response {
                PromptResponse::Cancel => {
                    debug!(field = %name, "questionnaire cancelled");
                    return Ok(FormResult::Cancelled);
                }
                PromptResponse::Back => {
                    controller.retreat()?;
                    continue;
                }
                PromptResponse::Keep => controller.advance(),
                PromptResponse::Value(text) => {
                    controller.set_answer(&name, text)?;
                    controller.advance()
                }
                PromptResponse::Toggle(flag) => {
                    controller.set_answer(&name, flag)?;
                    controller.advance()
                }
            };

            match outcome {
                Ok(Advance::Moved(_)) => {}
                Ok(Advance::Submitted(payload)) => {
                    sink.emit(&payload)?;
                    return Ok(FormResult::Completed(payload));
                }
                Err(err) if err.is_user_facing() => interaction.report_error(&err),
                Err(err) => return Err(err.into()),
            }
        }
    }
}
