//! Accumulated list of users registered during this session

use super::submission::SubmissionStatus;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One successful registration, holding the server response as-is
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedUser {
    pub payload: Value,
    pub received_at: DateTime<Utc>,
}

impl SubmittedUser {
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            received_at: Utc::now(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.payload.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }

    /// Server-assigned id, numeric or string
    pub fn id(&self) -> Option<String> {
        match self.payload.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Append-only, in completion order
#[derive(Debug, Clone, Default)]
pub struct SubmittedUsers {
    users: Vec<SubmittedUser>,
}

#[allow(dead_code)]
impl SubmittedUsers {
    /// Consume a pending submission status, appending it exactly once
    pub fn absorb(&mut self, status: &mut SubmissionStatus) -> Option<&SubmittedUser> {
        let payload = status.take()?;
        self.users.push(SubmittedUser::new(payload));
        self.users.last()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubmittedUser> {
        self.users.iter()
    }

    pub fn last(&self) -> Option<&SubmittedUser> {
        self.users.last()
    }
}
