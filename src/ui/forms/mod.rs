//! Form rendering module
//!
//! - `field_renderer`: input, checkbox and help text rendering
//! - `registration_form`: the registration form layout

mod field_renderer;
mod registration_form;

pub use registration_form::draw_registration;
