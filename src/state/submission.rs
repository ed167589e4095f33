//! Submission cycle types

use super::validation::ErrorSet;
use crate::api::TransportError;
use serde_json::Value;
use thiserror::Error;

/// One-shot signal carrying the last successful response payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionStatus(Option<Value>);

#[allow(dead_code)]
impl SubmissionStatus {
    pub fn set(&mut self, payload: Value) {
        self.0 = Some(payload);
    }

    /// Take the payload, leaving the status empty
    pub fn take(&mut self) -> Option<Value> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Where the form is in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

/// Why a submit attempt did not reach the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(ErrorSet),

    #[error("a submission is already in flight")]
    InFlight,
}

/// Result of one submission cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(SubmitRejection),
    /// Carries the server response that was recorded
    Succeeded(Value),
    Failed(TransportError),
}

#[allow(dead_code)]
impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_take_is_one_shot() {
        let mut status = SubmissionStatus::default();
        assert!(status.is_empty());
        status.set(json!({"id": 7}));
        assert_eq!(status.take(), Some(json!({"id": 7})));
        assert_eq!(status.take(), None);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            SubmitRejection::InFlight.to_string(),
            "a submission is already in flight"
        );
        assert_eq!(
            SubmitRejection::Invalid(ErrorSet::default()).to_string(),
            "0 field(s) need attention"
        );
    }
}
