//! Serializable description of a questionnaire, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::WizardError;
use crate::schema::field::{AnyField, Boolean, Bounds, Field, Number};
use crate::schema::QuestionnaireSchema;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Malformed schema definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] WizardError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKindDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKindDefinition {
    Boolean {
        #[serde(default)]
        default: bool,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
}

impl FieldDefinition {
    fn into_field(self) -> Result<AnyField, WizardError> {
        match self.kind {
            FieldKindDefinition::Boolean { default } => Ok(Field::<Boolean>::new(self.name, self.label)
                .with_default(default)
                .into()),
            FieldKindDefinition::Number { min, max } => {
                let field = Field::<Number>::new(self.name, self.label);
                let bounds = match (min, max) {
                    (None, None) => return Ok(field.into()),
                    (Some(min), Some(max)) if min > max => {
                        return Err(WizardError::InvalidDefinition(format!(
                            "`{}` has min {} above max {}",
                            field.name(),
                            min,
                            max
                        )))
                    }
                    (Some(min), Some(max)) => Bounds::between(min, max),
                    (Some(min), None) => Bounds::at_least(min),
                    (None, Some(max)) => Bounds::at_most(max),
                };
                Ok(field.with_bounds(bounds).into())
            }
        }
    }
}

impl TryFrom<SchemaDefinition> for QuestionnaireSchema {
    type Error = WizardError;

    fn try_from(definition: SchemaDefinition) -> Result<Self, Self::Error> {
        let fields = definition
            .fields
            .into_iter()
            .map(FieldDefinition::into_field)
            .collect::<Result<Vec<_>, _>>()?;
        QuestionnaireSchema::new(fields)
    }
}

impl QuestionnaireSchema {
    pub fn from_json(raw: &str) -> Result<Self, DefinitionError> {
        let definition: SchemaDefinition = serde_json::from_str(raw)?;
        Ok(Self::try_from(definition)?)
    }
}
