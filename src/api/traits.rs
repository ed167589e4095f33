//! Trait abstraction for the users API to enable mocking in tests

use super::error::TransportError;
use crate::state::FieldSet;
use async_trait::async_trait;
use serde_json::Value;

/// Outbound capability used by the submission pipeline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Register a user, returning the server's JSON response as-is
    async fn create_user(&self, fields: &FieldSet) -> Result<Value, TransportError>;
}
