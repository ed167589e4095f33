//! HTTP client for the users registration endpoint
//!
//! Posts the serialized form to `<base_url>/users` and hands back the
//! JSON response untouched.

use super::error::TransportError;
use super::traits::UsersApi;
use crate::state::FieldSet;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Default API base address
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Client for the remote users API
pub struct HttpUsersClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUsersClient {
    /// Create a client for `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("signup-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self::with_client(base_url, http))
    }

    /// Create a client reusing a configured reqwest client
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Full URL of the registration endpoint
    pub fn users_url(&self) -> String {
        format!("{}/users", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl UsersApi for HttpUsersClient {
    async fn create_user(&self, fields: &FieldSet) -> Result<Value, TransportError> {
        let url = self.users_url();
        debug!(%url, "posting registration");

        let response = self.http.post(&url).json(fields).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "registration rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
