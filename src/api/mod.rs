//! Users API client module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::{HttpUsersClient, DEFAULT_BASE_URL};
pub use error::TransportError;
pub use traits::UsersApi;

#[cfg(test)]
pub use traits::MockUsersApi;
