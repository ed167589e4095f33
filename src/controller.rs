//! Registration form controller
//!
//! Ties the form store, validation schema, submission pipeline and the
//! submitted users list into one submission cycle:
//!
//! `Idle -> validate -> (rejected | Submitting -> (Failed | Succeeded)) -> Idle`

use crate::api::{TransportError, UsersApi};
use crate::state::{
    FieldName, FieldSet, FieldValue, FormError, FormStore, Schema, SubmissionPhase,
    SubmissionStatus, SubmitOutcome, SubmitRejection, SubmittedUsers,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

pub struct RegistrationFormController {
    store: FormStore,
    status: SubmissionStatus,
    submitted: SubmittedUsers,
    phase: SubmissionPhase,
    last_error: Option<TransportError>,
}

#[allow(dead_code)]
impl RegistrationFormController {
    pub fn new(schema: Schema, initial: FieldSet) -> Self {
        Self {
            store: FormStore::new(schema, initial),
            status: SubmissionStatus::default(),
            submitted: SubmittedUsers::default(),
            phase: SubmissionPhase::Idle,
            last_error: None,
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    pub fn submitted_users(&self) -> &SubmittedUsers {
        &self.submitted
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Transport error from the most recent failed submission
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    pub fn set_field_value(&mut self, field: FieldName, value: FieldValue) -> Result<(), FormError> {
        self.store.set_field_value(field, value)
    }

    pub fn mark_touched(&mut self, field: FieldName) {
        self.store.mark_touched(field);
    }

    pub fn visible_error(&self, field: FieldName) -> Option<&str> {
        self.store.visible_error(field)
    }

    /// Validate and, if the form is clean, move to `Submitting`.
    ///
    /// Returns the payload to send. Invalid forms get all validated
    /// fields marked touched so their errors become visible.
    pub fn begin_submission(&mut self) -> Result<FieldSet, SubmitRejection> {
        if self.is_submitting() {
            debug!("submit ignored, request already in flight");
            return Err(SubmitRejection::InFlight);
        }

        if !self.store.is_valid() {
            let errors = self.store.errors().clone();
            self.store.touch_validated_fields();
            debug!(invalid = errors.len(), "submit blocked by validation");
            return Err(SubmitRejection::Invalid(errors));
        }

        self.phase = SubmissionPhase::Submitting;
        Ok(self.store.values().clone())
    }

    /// Apply the response of the request started by [`begin_submission`](Self::begin_submission)
    pub fn finish_submission(&mut self, result: Result<Value, TransportError>) -> SubmitOutcome {
        if !self.is_submitting() {
            warn!("submission completed without one in flight");
        }
        self.phase = SubmissionPhase::Idle;

        match result {
            Ok(payload) => {
                self.status.set(payload.clone());
                if let Some(user) = self.submitted.absorb(&mut self.status) {
                    info!(
                        id = user.id().as_deref().unwrap_or("-"),
                        total = self.submitted.len(),
                        "user registered"
                    );
                }
                self.store.reset();
                self.last_error = None;
                SubmitOutcome::Succeeded(payload)
            }
            Err(err) => {
                error!(error = %err, "registration failed");
                self.last_error = Some(err.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Run one full submission cycle against `api`
    pub async fn submit(&mut self, api: &dyn UsersApi) -> SubmitOutcome {
        let fields = match self.begin_submission() {
            Ok(fields) => fields,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let result = api.create_user(&fields).await;
        self.finish_submission(result)
    }
}
