use thiserror::Error;

use crate::schema::ValueType;

/// Classification of [`WizardError`] without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    OutOfRange,
    UnknownField,
    IndexOutOfRange,
    AlreadyTerminal,
    DuplicateField,
    InvalidDefinition,
}

/// Failures raised by the schema and the wizard controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("`{field}` expects a {expected} value, got {found}")]
    TypeMismatch {
        field: String,
        expected: ValueType,
        found: &'static str,
    },
    #[error(
        "`{field}` must be between {lo} and {hi} (got {got})",
        lo = number_arg(.min),
        hi = number_arg(.max),
        got = number_arg(.value)
    )]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Unknown field `{name}`{}", suggestion_suffix(.suggestion))]
    UnknownField {
        name: String,
        suggestion: Option<String>,
    },
    #[error("Step {index} is outside the questionnaire ({len} fields)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("The questionnaire has already been submitted")]
    AlreadyTerminal,
    #[error("Field name `{0}` is declared more than once")]
    DuplicateField(String),
    #[error("Invalid field definition: {0}")]
    InvalidDefinition(String),
}

impl WizardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WizardError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            WizardError::OutOfRange { .. } => ErrorKind::OutOfRange,
            WizardError::UnknownField { .. } => ErrorKind::UnknownField,
            WizardError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            WizardError::AlreadyTerminal => ErrorKind::AlreadyTerminal,
            WizardError::DuplicateField(_) => ErrorKind::DuplicateField,
            WizardError::InvalidDefinition(_) => ErrorKind::InvalidDefinition,
        }
    }

    /// Validation failures the user can fix by editing the current answer.
    /// Everything else is a caller or schema bug and stays out of the UI.
    pub fn is_user_facing(&self) -> bool {
        matches!(self.kind(), ErrorKind::TypeMismatch | ErrorKind::OutOfRange)
    }

    /// Name of the field the error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            WizardError::TypeMismatch { field, .. } | WizardError::OutOfRange { field, .. } => {
                Some(field)
            }
            WizardError::UnknownField { name, .. } => Some(name),
            WizardError::DuplicateField(name) => Some(name),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("Schema definition error: {0}")]
    Definition(#[from] crate::schema::DefinitionError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders integral numbers without a fractional part (`40` rather than `40.0`).
pub fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < i64::MAX as f64 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn number_arg(value: &f64) -> String {
    format_number(*value)
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(candidate) => format!(" (did you mean `{}`?)", candidate),
        None => String::new(),
    }
}
