//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a field update cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The key does not name one of the registration fields
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The value kind does not match the field (text vs. checkbox)
    #[error("field `{field}` expects a {expected} value")]
    ValueMismatch {
        field: FieldName,
        expected: &'static str,
    },
}

/// The fixed set of registration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Name,
    Email,
    Password,
    Terms,
}

impl FieldName {
    /// All fields in display order
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Password,
        FieldName::Terms,
    ];

    /// Lower-case key used on the wire and in config files
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Terms => "terms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Terms => "Terms of Condition",
        }
    }

    /// Whether the field holds text (as opposed to a checkbox flag)
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Terms)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Current values of every registration field.
///
/// Serializes to the request body the users API expects:
/// `{ "name", "email", "password", "terms" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSet {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "terms")]
    pub terms_accepted: bool,
}

impl FieldSet {
    /// Text of a text field, `None` for the terms checkbox
    pub fn text(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Name => Some(&self.name),
            FieldName::Email => Some(&self.email),
            FieldName::Password => Some(&self.password),
            FieldName::Terms => None,
        }
    }

    pub fn get(&self, field: FieldName) -> FieldValue {
        match self.text(field) {
            Some(text) => FieldValue::Text(text.to_string()),
            None => FieldValue::Flag(self.terms_accepted),
        }
    }

    /// Replace the value of one field, leaving the others alone
    pub fn set(&mut self, field: FieldName, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (FieldName::Name, FieldValue::Text(text)) => self.name = text,
            (FieldName::Email, FieldValue::Text(text)) => self.email = text,
            (FieldName::Password, FieldValue::Text(text)) => self.password = text,
            (FieldName::Terms, FieldValue::Flag(flag)) => self.terms_accepted = flag,
            (field, _) => {
                return Err(FormError::ValueMismatch {
                    field,
                    expected: if field.is_text() { "text" } else { "boolean" },
                })
            }
        }
        Ok(())
    }
}
