//! Registration form state module

mod focus;
mod forms;
mod submission;
mod submitted_users;
mod validation;

pub use focus::*;
pub use forms::*;
pub use submission::*;
pub use submitted_users::*;
pub use validation::*;
