use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::errors::{format_number, Result, WizardError};
use crate::schema::value::{InputCapability, Value, ValueType};

/// Inclusive numeric bounds. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn between(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: f64) -> Self {
        Self::between(min, f64::INFINITY)
    }

    pub fn at_most(max: f64) -> Self {
        Self::between(f64::NEG_INFINITY, max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min.is_finite(), self.max.is_finite()) {
            (true, true) => write!(
                f,
                "{} to {}",
                format_number(self.min),
                format_number(self.max)
            ),
            (true, false) => write!(f, "at least {}", format_number(self.min)),
            (false, true) => write!(f, "at most {}", format_number(self.max)),
            (false, false) => f.write_str("any number"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Value-type tag a [`Field`] is parameterized by.
///
/// Closed set: only [`Boolean`] and [`Number`] implement it.
pub trait FieldType: sealed::Sealed + fmt::Debug + Clone + Copy + PartialEq + 'static {
    type Value: fmt::Debug + Clone + Copy + PartialEq;

    const VALUE_TYPE: ValueType;

    fn extract(value: &Value) -> Option<Self::Value>;

    fn wrap(value: Self::Value) -> Value;

    fn check_bounds(field: &str, value: Self::Value, bounds: Option<&Bounds>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number;

impl sealed::Sealed for Boolean {}
impl sealed::Sealed for Number {}

impl FieldType for Boolean {
    type Value = bool;

    const VALUE_TYPE: ValueType = ValueType::Boolean;

    fn extract(value: &Value) -> Option<bool> {
        value.as_bool()
    }

    fn wrap(value: bool) -> Value {
        Value::Boolean(value)
    }

    fn check_bounds(_field: &str, _value: bool, _bounds: Option<&Bounds>) -> Result<()> {
        Ok(())
    }
}

impl FieldType for Number {
    type Value = f64;

    const VALUE_TYPE: ValueType = ValueType::Number;

    fn extract(value: &Value) -> Option<f64> {
        value.as_number()
    }

    fn wrap(value: f64) -> Value {
        Value::Number(value)
    }

    fn check_bounds(field: &str, value: f64, bounds: Option<&Bounds>) -> Result<()> {
        match bounds {
            Some(bounds) if !bounds.contains(value) => Err(WizardError::OutOfRange {
                field: field.to_string(),
                value,
                min: bounds.min,
                max: bounds.max,
            }),
            _ => Ok(()),
        }
    }
}

/// One questionnaire entry, typed by its value tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T: FieldType> {
    name: String,
    label: String,
    bounds: Option<Bounds>,
    default: Option<T::Value>,
    kind: PhantomData<T>,
}

impl<T: FieldType> Field<T> {
    fn with_parts(name: impl Into<String>, label: impl Into<String>, default: Option<T::Value>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            bounds: None,
            default,
            kind: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn default_value(&self) -> Option<T::Value> {
        self.default
    }

    pub fn value_type(&self) -> ValueType {
        T::VALUE_TYPE
    }

    pub fn capability(&self) -> InputCapability {
        T::VALUE_TYPE.capability()
    }

    /// Typed read of an answer; `None` when unset or of another type.
    pub fn read(&self, value: Option<&Value>) -> Option<T::Value> {
        value.and_then(T::extract)
    }

    /// Type check first, then bounds. An unset value falls back to the default.
    pub fn validate(&self, value: Option<&Value>) -> Result<T::Value> {
        let Some(value) = value else {
            return self.default.ok_or_else(|| WizardError::TypeMismatch {
                field: self.name.clone(),
                expected: T::VALUE_TYPE,
                found: "nothing",
            });
        };
        let typed = T::extract(value).ok_or_else(|| WizardError::TypeMismatch {
            field: self.name.clone(),
            expected: T::VALUE_TYPE,
            found: value.type_name(),
        })?;
        T::check_bounds(&self.name, typed, self.bounds.as_ref())?;
        Ok(typed)
    }
}

impl Field<Boolean> {
    /// Yes/no question, defaulting to `false` until answered.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_parts(name, label, Some(false))
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = Some(default);
        self
    }
}

impl Field<Number> {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_parts(name, label, None)
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// A field of either value type; what the schema stores and hands out.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyField {
    Boolean(Field<Boolean>),
    Number(Field<Number>),
}

impl AnyField {
    pub fn name(&self) -> &str {
        match self {
            AnyField::Boolean(field) => field.name(),
            AnyField::Number(field) => field.name(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AnyField::Boolean(field) => field.label(),
            AnyField::Number(field) => field.label(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            AnyField::Boolean(field) => field.value_type(),
            AnyField::Number(field) => field.value_type(),
        }
    }

    pub fn capability(&self) -> InputCapability {
        self.value_type().capability()
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            AnyField::Boolean(field) => field.bounds(),
            AnyField::Number(field) => field.bounds(),
        }
    }

    pub fn default_value(&self) -> Option<Value> {
        match self {
            AnyField::Boolean(field) => field.default_value().map(Boolean::wrap),
            AnyField::Number(field) => field.default_value().map(Number::wrap),
        }
    }

    /// Validates through the typed field and hands the value back unchanged.
    pub fn validate(&self, value: Option<&Value>) -> Result<Value> {
        match self {
            AnyField::Boolean(field) => field.validate(value).map(Boolean::wrap),
            AnyField::Number(field) => field.validate(value).map(Number::wrap),
        }
    }
}

impl From<Field<Boolean>> for AnyField {
    fn from(field: Field<Boolean>) -> Self {
        AnyField::Boolean(field)
    }
}

impl From<Field<Number>> for AnyField {
    fn from(field: Field<Number>) -> Self {
        AnyField::Number(field)
    }
}
