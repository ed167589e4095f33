//! Form domain layer
//!
//! Field values, touched flags and the store that keeps validation
//! errors in step with every edit.

mod field;
mod form_state;

pub use field::{FieldName, FieldSet, FieldValue, FormError};
pub use form_state::{FormEvent, FormStore};
