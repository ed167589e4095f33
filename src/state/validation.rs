//! Declarative validation schema for the registration form

use super::forms::{FieldName, FieldSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation failures keyed by field, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet(BTreeMap<FieldName, String>);

#[allow(dead_code)]
impl ErrorSet {
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with an error, in display order
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }
}

/// A single check applied to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text must be non-empty after trimming; flags must be set
    Required,
}

impl Rule {
    fn passes(&self, fields: &FieldSet, field: FieldName) -> bool {
        match self {
            Rule::Required => match fields.text(field) {
                Some(text) => !text.trim().is_empty(),
                None => fields.terms_accepted,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FieldName,
    pub rule: Rule,
    pub message: String,
}

/// Messages shown when a required field is left empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationMessages {
    pub name_required: String,
    pub email_required: String,
    pub password_required: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            name_required: "Name is required".to_string(),
            email_required: "Email is required".to_string(),
            password_required: "Password is required".to_string(),
        }
    }
}

/// Ordered set of field rules. The first failing rule for a field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    /// Schema with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// The registration schema: name, email and password are required
    pub fn registration(messages: &ValidationMessages) -> Self {
        Self::new()
            .required(FieldName::Name, &messages.name_required)
            .required(FieldName::Email, &messages.email_required)
            .required(FieldName::Password, &messages.password_required)
    }

    /// Add a required rule for `field`
    pub fn required(mut self, field: FieldName, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule {
            field,
            rule: Rule::Required,
            message: message.into(),
        });
        self
    }

    /// Fields that carry at least one rule
    pub fn validated_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        FieldName::ALL
            .into_iter()
            .filter(|field| self.rules.iter().any(|r| r.field == *field))
    }

    /// Run every rule against `fields`
    pub fn validate(&self, fields: &FieldSet) -> ErrorSet {
        let mut errors = BTreeMap::new();
        for rule in &self.rules {
            if errors.contains_key(&rule.field) {
                continue;
            }
            if !rule.rule.passes(fields, rule.field) {
                errors.insert(rule.field, rule.message.clone());
            }
        }
        ErrorSet(errors)
    }
}
