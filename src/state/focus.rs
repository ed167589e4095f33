//! Keyboard focus within the registration form

use super::forms::FieldName;

/// Focusable element: one of the fields, or the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldName),
    Submit,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldName::Name)
    }
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Field(FieldName::Name),
        Focus::Field(FieldName::Email),
        Focus::Field(FieldName::Password),
        Focus::Field(FieldName::Terms),
        Focus::Submit,
    ];

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Next element, wrapping around
    pub fn next(&self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous element, wrapping around
    pub fn prev(&self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }

    pub fn field(&self) -> Option<FieldName> {
        match self {
            Focus::Field(field) => Some(*field),
            Focus::Submit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_fields_then_submit() {
        let mut focus = Focus::default();
        let mut seen = vec![focus];
        for _ in 0..5 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![
                Focus::Field(FieldName::Name),
                Focus::Field(FieldName::Email),
                Focus::Field(FieldName::Password),
                Focus::Field(FieldName::Terms),
                Focus::Submit,
                Focus::Field(FieldName::Name),
            ]
        );
    }

    #[test]
    fn test_prev_wraps_to_submit() {
        assert_eq!(Focus::default().prev(), Focus::Submit);
        assert_eq!(Focus::Submit.prev(), Focus::Field(FieldName::Terms));
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(Focus::Submit.field(), None);
        assert_eq!(
            Focus::Field(FieldName::Email).field(),
            Some(FieldName::Email)
        );
    }
}
