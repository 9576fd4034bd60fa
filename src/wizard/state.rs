use std::collections::BTreeMap;

use crate::errors::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Waiting on the answer for the zero-based step.
    Asking(usize),
    Submitted,
}

impl WizardPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, WizardPhase::Submitted)
    }
}

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: BTreeMap<String, WizardError>,
}

impl ValidationErrors {
    pub fn set(&mut self, field: impl Into<String>, error: WizardError) {
        self.entries.insert(field.into(), error);
    }

    pub fn clear(&mut self, field: &str) {
        self.entries.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&WizardError> {
        self.entries.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    phase: WizardPhase,
    errors: ValidationErrors,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            phase: WizardPhase::Asking(0),
            errors: ValidationErrors::default(),
        }
    }
}

impl WizardState {
    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// Current step, or `None` once submitted.
    pub fn current_step(&self) -> Option<usize> {
        match self.phase {
            WizardPhase::Asking(step) => Some(step),
            WizardPhase::Submitted => None,
        }
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub(crate) fn set_phase(&mut self, phase: WizardPhase) {
        self.phase = phase;
    }

    pub(crate) fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }
}
