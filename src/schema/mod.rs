//! Static, ordered definition of the questions the wizard asks.

pub mod definition;
pub mod field;
pub mod value;

use std::collections::HashSet;

use strsim::levenshtein;

use crate::errors::{Result, WizardError};

pub use definition::{DefinitionError, FieldDefinition, FieldKindDefinition, SchemaDefinition};
pub use field::{AnyField, Boolean, Bounds, Field, FieldType, Number};
pub use value::{capability_table, InputCapability, Value, ValueType};

pub const HAS_CHARGERS_NEARBY: &str = "hasChargersNearby";
pub const DAILY_KILOMETERS: &str = "dailyKilometers";
pub const SEATING_CAPACITY: &str = "seatingCapacity";
pub const NEEDS_LARGE_TRUNK: &str = "needsLargeTrunk";
pub const PRICE_LIMIT: &str = "priceLimit";

const SUGGESTION_DISTANCE: usize = 3;

/// Immutable ordered list of fields. Names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireSchema {
    fields: Vec<AnyField>,
}

impl QuestionnaireSchema {
    pub fn new(fields: Vec<AnyField>) -> Result<Self> {
        if fields.is_empty() {
            return Err(WizardError::InvalidDefinition(
                "a questionnaire needs at least one field".into(),
            ));
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(WizardError::DuplicateField(field.name().to_string()));
            }
        }
        Ok(Self { fields })
    }

    /// The five-question vehicle needs survey.
    pub fn vehicle_needs() -> Self {
        Self {
            fields: vec![
                Field::<Boolean>::new(
                    HAS_CHARGERS_NEARBY,
                    "Do you have electric chargers close to your location?",
                )
                .into(),
                Field::<Number>::new(
                    DAILY_KILOMETERS,
                    "How many kilometers do you drive daily (on average)?",
                )
                .with_bounds(Bounds::between(1.0, 1000.0))
                .into(),
                Field::<Number>::new(SEATING_CAPACITY, "Seating Capacity Needed")
                    .with_bounds(Bounds::between(1.0, 8.0))
                    .into(),
                Field::<Boolean>::new(NEEDS_LARGE_TRUNK, "Do you need a large trunk?").into(),
                Field::<Number>::new(PRICE_LIMIT, "What is your price limit?")
                    .with_bounds(Bounds::between(10_000.0, 200_000.0))
                    .into(),
            ],
        }
    }

    pub fn field_at(&self, index: usize) -> Result<&AnyField> {
        self.fields.get(index).ok_or(WizardError::IndexOutOfRange {
            index,
            len: self.fields.len(),
        })
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[AnyField] {
        &self.fields
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Looks a field up by name, suggesting the closest match on a miss.
    pub fn field(&self, name: &str) -> Result<&AnyField> {
        self.fields
            .iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| WizardError::UnknownField {
                name: name.to_string(),
                suggestion: self.closest_name(name),
            })
    }

    pub fn validate(&self, field: &AnyField, value: Option<&Value>) -> Result<Value> {
        field.validate(value)
    }

    fn closest_name(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .map(|field| (levenshtein(field.name(), name), field.name()))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate.to_string())
    }
}
