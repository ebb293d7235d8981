//! Form validation engine
//!
//! Runs a [`FieldSet`] through a list of [`FieldRule`]s and collects one
//! message per failing field. The engine is pure: the same input always
//! yields the same [`ValidationOutcome`], so it can run on every keystroke.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::fields::Check;

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    /// Create-only rules (passwords) are skipped
    Update,
}

/// Named form values in the order the form declares them.
///
/// Values are JSON so a record fetched for an update form can be loaded
/// as-is. Anything that is not a string reads as empty text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<(String, Value)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FieldSet::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a value, keeping the field's original position if it exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Load from a JSON object. Anything else gives an empty set.
    pub fn from_json(record: &Value) -> Self {
        match record {
            Value::Object(map) => map
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            _ => Self::new(),
        }
    }

    /// Render as a JSON object for submission.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Untrimmed text of a field, empty when absent or not a string.
    pub fn text(&self, name: &str) -> &str {
        match self.get(name) {
            Some(Value::String(s)) => s,
            _ => "",
        }
    }

    /// Numeric value of a field. Numeric strings are accepted.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

/// Field name → message for every failing field. Empty iff the form is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }
}

/// Result of validating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    errors: ValidationErrors,
    is_valid: bool,
}

impl ValidationOutcome {
    fn new(errors: ValidationErrors) -> Self {
        let is_valid = errors.is_empty();
        Self { errors, is_valid }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

/// The checks for one field, evaluated in order until one fails.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub checks: &'static [Check],
    pub create_only: bool,
}

impl FieldRule {
    pub const fn new(field: &'static str, checks: &'static [Check]) -> Self {
        Self {
            field,
            checks,
            create_only: false,
        }
    }

    pub const fn create_only(field: &'static str, checks: &'static [Check]) -> Self {
        Self {
            field,
            checks,
            create_only: true,
        }
    }

    fn applies(&self, mode: FormMode) -> bool {
        !(self.create_only && mode == FormMode::Update)
    }

    fn evaluate(&self, fields: &FieldSet) -> Result<(), &'static str> {
        self.checks
            .iter()
            .try_for_each(|check| check.run(fields, self.field))
    }
}

/// Validate `fields` against `rules`. Each field reports at most one
/// message: the first check it fails.
pub fn validate_fields(rules: &[FieldRule], fields: &FieldSet, mode: FormMode) -> ValidationOutcome {
    let mut errors = ValidationErrors::default();
    for rule in rules.iter().filter(|rule| rule.applies(mode)) {
        if let Err(message) = rule.evaluate(fields) {
            errors.insert(rule.field, message);
        }
    }
    tracing::trace!(failing = errors.len(), ?mode, "validated field set");
    ValidationOutcome::new(errors)
}
