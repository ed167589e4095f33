//! Form state store: values, touched flags and derived errors

use super::field::{FieldName, FieldSet, FieldValue, FormError};
use crate::state::validation::{ErrorSet, Schema};
use std::collections::BTreeSet;
use std::fmt;

/// Fields that have been visited and left.
///
/// Flags only ever go from untouched to touched; the set is cleared
/// solely by [`FormStore::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedSet(BTreeSet<FieldName>);

#[allow(dead_code)]
impl TouchedSet {
    pub fn is_touched(&self, field: FieldName) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the field was not touched before
    fn touch(&mut self, field: FieldName) -> bool {
        self.0.insert(field)
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Change notifications emitted by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValueChanged { field: FieldName },
    Touched { field: FieldName },
    Reset,
}

type Subscriber = Box<dyn FnMut(&FormEvent, &FormStore) + Send>;

/// Holds the registration form state for one mounted form.
///
/// Every value change re-runs the schema, so `errors()` is always
/// `schema.validate(values())`.
pub struct FormStore {
    schema: Schema,
    initial: FieldSet,
    values: FieldSet,
    touched: TouchedSet,
    errors: ErrorSet,
    subscribers: Vec<Subscriber>,
}

#[allow(dead_code)]
impl FormStore {
    pub fn new(schema: Schema, initial: FieldSet) -> Self {
        let errors = schema.validate(&initial);
        Self {
            schema,
            values: initial.clone(),
            initial,
            touched: TouchedSet::default(),
            errors,
            subscribers: Vec::new(),
        }
    }

    pub fn values(&self) -> &FieldSet {
        &self.values
    }

    pub fn touched(&self) -> &TouchedSet {
        &self.touched
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.is_touched(field)
    }

    /// Error to show for a field: only once it is touched AND invalid
    pub fn visible_error(&self, field: FieldName) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Register a listener called after every state change
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&FormEvent, &FormStore) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Update one field and recompute errors
    pub fn set_field_value(&mut self, field: FieldName, value: FieldValue) -> Result<(), FormError> {
        self.values.set(field, value)?;
        self.revalidate();
        self.emit(FormEvent::ValueChanged { field });
        Ok(())
    }

    /// Same as [`set_field_value`](Self::set_field_value), addressed by wire key
    pub fn set_field_value_by_key(&mut self, key: &str, value: FieldValue) -> Result<(), FormError> {
        let field = key.parse()?;
        self.set_field_value(field, value)
    }

    pub fn mark_touched(&mut self, field: FieldName) {
        if self.touched.touch(field) {
            self.emit(FormEvent::Touched { field });
        }
    }

    /// Mark every field that has a rule, so all blocking errors display
    pub fn touch_validated_fields(&mut self) {
        let fields: Vec<FieldName> = self.schema.validated_fields().collect();
        for field in fields {
            self.mark_touched(field);
        }
    }

    /// Restore the initial values and forget touched state
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.touched.clear();
        self.revalidate();
        self.emit(FormEvent::Reset);
    }

    /// Append a character to a text field
    pub fn push_char(&mut self, field: FieldName, c: char) -> Result<(), FormError> {
        let mut text = self.text_of(field)?;
        text.push(c);
        self.set_field_value(field, FieldValue::Text(text))
    }

    /// Remove the last character from a text field
    pub fn pop_char(&mut self, field: FieldName) -> Result<(), FormError> {
        let mut text = self.text_of(field)?;
        if text.pop().is_none() {
            return Ok(());
        }
        self.set_field_value(field, FieldValue::Text(text))
    }

    /// Flip the terms checkbox
    pub fn toggle(&mut self, field: FieldName) -> Result<(), FormError> {
        match self.values.get(field) {
            FieldValue::Flag(flag) => self.set_field_value(field, FieldValue::Flag(!flag)),
            FieldValue::Text(_) => Err(FormError::ValueMismatch {
                field,
                expected: "text",
            }),
        }
    }

    fn text_of(&self, field: FieldName) -> Result<String, FormError> {
        self.values
            .text(field)
            .map(str::to_string)
            .ok_or(FormError::ValueMismatch {
                field,
                expected: "boolean",
            })
    }

    fn revalidate(&mut self) {
        self.errors = self.schema.validate(&self.values);
    }

    fn emit(&mut self, event: FormEvent) {
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for subscriber in subscribers.iter_mut() {
            subscriber(&event, &*self);
        }
        self.subscribers = subscribers;
    }
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("values", &self.values)
            .field("touched", &self.touched)
            .field("errors", &self.errors)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
