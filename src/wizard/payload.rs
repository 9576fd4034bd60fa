use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::WizardError;
use crate::schema::{
    Value, ValueType, DAILY_KILOMETERS, HAS_CHARGERS_NEARBY, NEEDS_LARGE_TRUNK, PRICE_LIMIT,
    SEATING_CAPACITY,
};

/// Fully validated answers, in schema order. Serializes as a flat object.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    entries: Vec<(String, Value)>,
}

impl SubmissionPayload {
    pub(crate) fn new(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn boolean(&self, name: &str) -> Result<bool, WizardError> {
        let value = self.require(name)?;
        value.as_bool().ok_or_else(|| WizardError::TypeMismatch {
            field: name.to_string(),
            expected: ValueType::Boolean,
            found: value.type_name(),
        })
    }

    pub fn number(&self, name: &str) -> Result<f64, WizardError> {
        let value = self.require(name)?;
        value.as_number().ok_or_else(|| WizardError::TypeMismatch {
            field: name.to_string(),
            expected: ValueType::Number,
            found: value.type_name(),
        })
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    fn require(&self, name: &str) -> Result<&Value, WizardError> {
        self.get(name).ok_or_else(|| WizardError::UnknownField {
            name: name.to_string(),
            suggestion: None,
        })
    }
}

impl Serialize for SubmissionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Typed reading of the vehicle needs payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleNeeds {
    pub has_chargers_nearby: bool,
    pub daily_kilometers: f64,
    pub seating_capacity: f64,
    pub needs_large_trunk: bool,
    pub price_limit: f64,
}

impl TryFrom<&SubmissionPayload> for VehicleNeeds {
    type Error = WizardError;

    fn try_from(payload: &SubmissionPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            has_chargers_nearby: payload.boolean(HAS_CHARGERS_NEARBY)?,
            daily_kilometers: payload.number(DAILY_KILOMETERS)?,
            seating_capacity: payload.number(SEATING_CAPACITY)?,
            needs_large_trunk: payload.boolean(NEEDS_LARGE_TRUNK)?,
            price_limit: payload.number(PRICE_LIMIT)?,
        })
    }
}
