use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::forms::{parse_text_response, FormInteraction, PromptResponse, BACK_COMMAND};
use crate::cli::output;
use crate::errors::{CliError, WizardError};
use crate::schema::InputCapability;
use crate::wizard::StepPrompt;

const YES: &str = "Yes";
const NO: &str = "No";
const BACK: &str = "← Back";
const CANCEL: &str = "Cancel";

/// Terminal interaction backed by dialoguer.
pub struct WizardInteraction {
    theme: ColorfulTheme,
}

impl WizardInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn step_title(prompt: &StepPrompt<'_>) -> String {
        format!(
            "Step {} of {}: {}",
            prompt.index + 1,
            prompt.total,
            prompt.field.label()
        )
    }

    fn prompt_toggle(&self, prompt: &StepPrompt<'_>) -> Result<PromptResponse, CliError> {
        let mut items = vec![YES, NO];
        if prompt.can_retreat {
            items.push(BACK);
        }
        items.push(CANCEL);

        let current = prompt
            .value
            .as_ref()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        let selection = Select::with_theme(&self.theme)
            .with_prompt(format!("{} ({})", prompt.field.label(), prompt.advance_label))
            .items(&items)
            .default(if current { 0 } else { 1 })
            .interact_opt()?;

        Ok(match selection.map(|index| items[index]) {
            Some(YES) => PromptResponse::Toggle(true),
            Some(NO) => PromptResponse::Toggle(false),
            Some(BACK) => PromptResponse::Back,
            _ => PromptResponse::Cancel,
        })
    }

    fn prompt_number(&self, prompt: &StepPrompt<'_>) -> Result<PromptResponse, CliError> {
        let mut label = format!("{} ({})", prompt.field.label(), prompt.advance_label);
        if let Some(current) = &prompt.value {
            label.push_str(&format!(" [{current}]"));
        }
        if let Some(bounds) = prompt.field.bounds() {
            output::info(format!("Accepted range: {bounds}"));
        }
        if prompt.can_retreat {
            output::info(format!("Type {BACK_COMMAND} to return to the previous step."));
        }

        let line = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(parse_text_response(&line))
    }
}

impl Default for WizardInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl FormInteraction for WizardInteraction {
    fn prompt_field(&mut self, prompt: &StepPrompt<'_>) -> Result<PromptResponse, CliError> {
        output::section(Self::step_title(prompt));
        match prompt.capability {
            InputCapability::Toggle => self.prompt_toggle(prompt),
            InputCapability::NumericEntry => self.prompt_number(prompt),
        }
    }

    fn report_error(&mut self, error: &WizardError) {
        output::error(error);
    }
}
