use std::collections::BTreeMap;

use crate::schema::Value;

/// In-progress answers keyed by field name. Missing keys are unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    values: BTreeMap<String, Value>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn clear(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
