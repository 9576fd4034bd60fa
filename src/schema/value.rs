use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::format_number;

/// Declared type of a questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Number,
}

impl ValueType {
    pub const ALL: [ValueType; 2] = [ValueType::Boolean, ValueType::Number];

    /// Input control a presentation layer should render for this type.
    pub fn capability(self) -> InputCapability {
        match self {
            ValueType::Boolean => InputCapability::Toggle,
            ValueType::Number => InputCapability::NumericEntry,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Boolean => f.write_str("boolean"),
            ValueType::Number => f.write_str("number"),
        }
    }
}

/// Kinds of input control the wizard can ask a presentation layer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCapability {
    /// Checkbox / yes-no switch.
    Toggle,
    /// Free numeric entry.
    NumericEntry,
}

/// Lookup table pairing every value type with its input capability.
pub fn capability_table() -> [(ValueType, InputCapability); 2] {
    ValueType::ALL.map(|value_type| (value_type, value_type.capability()))
}

/// A single answer as held in the answer set.
///
/// `Text` only survives coercion when the raw entry could not be read as the
/// field's declared type; validation then reports a type mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(n) if !n.is_finite() => "non-finite number",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    /// Converts a raw entry towards `target`. Blank text clears the answer.
    pub fn coerce(self, target: ValueType) -> Option<Value> {
        match (self, target) {
            (Value::Text(raw), _) if raw.trim().is_empty() => None,
            (Value::Text(raw), ValueType::Number) => match raw.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => Some(Value::Number(number)),
                _ => Some(Value::Text(raw)),
            },
            (Value::Text(raw), ValueType::Boolean) => {
                match raw.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" | "true" | "1" | "on" => Some(Value::Boolean(true)),
                    "n" | "no" | "false" | "0" | "off" => Some(Value::Boolean(false)),
                    _ => Some(Value::Text(raw)),
                }
            }
            (value, _) => Some(value),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(true) => f.write_str("yes"),
            Value::Boolean(false) => f.write_str("no"),
            Value::Number(number) => f.write_str(&format_number(*number)),
            Value::Text(text) => f.write_str(text),
        }
    }
}

/// Integers up to this magnitude round-trip exactly through `f64` and `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Boolean(value) => serializer.serialize_bool(*value),
            Value::Number(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER => {
                serializer.serialize_i64(*value as i64)
            }
            Value::Number(value) => serializer.serialize_f64(*value),
            Value::Text(value) => serializer.serialize_str(value),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
