//! Application state and core logic

use crate::api::{TransportError, UsersApi};
use crate::config::TuiConfig;
use crate::controller::RegistrationFormController;
use crate::state::{FieldName, Focus, FormEvent, FormStore, Schema, SubmitOutcome};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, trace};

type Completion = Result<Value, TransportError>;

/// Main application struct
pub struct App {
    /// Registration form state and submission cycle
    pub controller: RegistrationFormController,
    /// Currently focused form element
    pub focus: Focus,
    /// Status bar feedback message
    pub status_message: Option<String>,
    /// Base URL submissions go to, for display
    pub endpoint: String,
    /// Users API used by spawned submissions
    api: Arc<dyn UsersApi>,
    /// Completed submissions waiting to be applied
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    /// Errors shown one at a time in a modal dialog
    error_queue: VecDeque<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &TuiConfig, api: Arc<dyn UsersApi>) -> Self {
        let mut controller = RegistrationFormController::new(
            Schema::registration(&config.messages),
            config.initial_values.clone(),
        );
        controller.store_mut().subscribe(|event: &FormEvent, store: &FormStore| {
            trace!(
                ?event,
                errors = store.errors().len(),
                touched = store.touched().len(),
                "form changed"
            );
        });
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            controller,
            focus: Focus::default(),
            status_message: None,
            endpoint: config.api_base_url(),
            api,
            completions_tx,
            completions_rx,
            error_queue: VecDeque::new(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_queue.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_error();
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
                return Ok(());
            }
            KeyCode::Esc => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(self.focus.next());
                return Ok(());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(self.focus.prev());
                return Ok(());
            }
            _ => {}
        }

        match self.focus {
            Focus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.submit();
                }
            }
            Focus::Field(FieldName::Terms) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.controller.store_mut().toggle(FieldName::Terms)?;
                }
            }
            Focus::Field(field) => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.controller.store_mut().push_char(field, c)?;
                }
                KeyCode::Backspace => self.controller.store_mut().pop_char(field)?,
                KeyCode::Enter => self.move_focus(self.focus.next()),
                _ => {}
            },
        }
        Ok(())
    }

    /// Move focus, marking the field being left as touched
    fn move_focus(&mut self, to: Focus) {
        if let Some(field) = self.focus.field() {
            self.controller.mark_touched(field);
        }
        self.focus = to;
    }

    /// Validate and, if clean, send the form on a background task
    pub fn submit(&mut self) {
        match self.controller.begin_submission() {
            Ok(fields) => {
                let api = Arc::clone(&self.api);
                let tx = self.completions_tx.clone();
                info!("submitting registration");
                tokio::spawn(async move {
                    let result = api.create_user(&fields).await;
                    if tx.send(result).is_err() {
                        debug!("submission finished after the form closed");
                    }
                });
                self.status_message = Some("Submitting...".to_string());
            }
            Err(rejection) => {
                self.status_message = Some(capitalize(&rejection.to_string()));
            }
        }
    }

    /// Apply every submission that completed since the last call.
    /// Returns how many were applied.
    pub fn poll_submissions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.completions_rx.try_recv() {
            let outcome = self.controller.finish_submission(result);
            self.apply_outcome(outcome);
            applied += 1;
        }
        applied
    }

    fn apply_outcome(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Succeeded(payload) => {
                let who = payload
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("user")
                    .to_string();
                self.status_message = Some(format!("Registered {who}!"));
            }
            SubmitOutcome::Failed(err) => {
                self.status_message = None;
                self.push_error(format!("Registration failed: {err}"));
            }
            SubmitOutcome::Rejected(rejection) => {
                self.status_message = Some(capitalize(&rejection.to_string()));
            }
        }
    }

    /// Wait for the in-flight submission and apply it
    #[cfg(test)]
    async fn wait_for_submission(&mut self) {
        if let Some(result) = self.completions_rx.recv().await {
            let outcome = self.controller.finish_submission(result);
            self.apply_outcome(outcome);
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockUsersApi;
    use crate::state::FieldSet;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(api: MockUsersApi) -> App {
        App::new(&TuiConfig::default(), Arc::new(api))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    /// Fill every field through the keyboard, leaving focus on the button
    fn fill_form(app: &mut App, name: &str) {
        type_text(app, name);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(app, "a@x.com");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(app, "pw");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = app_with(MockUsersApi::new());
        type_text(&mut app, "Anx");
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        type_text(&mut app, "n");
        assert_eq!(app.controller.store().values().name, "Ann");
    }

    #[test]
    fn test_leaving_field_marks_it_touched() {
        let mut app = app_with(MockUsersApi::new());
        assert_eq!(app.controller.visible_error(FieldName::Name), None);

        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert!(app.controller.store().is_touched(FieldName::Name));
        assert_eq!(
            app.controller.visible_error(FieldName::Name),
            Some("Name is required")
        );
        assert!(!app.controller.store().is_touched(FieldName::Email));
    }

    #[test]
    fn test_space_toggles_terms() {
        let mut app = app_with(MockUsersApi::new());
        app.focus = Focus::Field(FieldName::Terms);
        app.handle_key(key(KeyCode::Char(' '))).unwrap();
        assert!(app.controller.store().values().terms_accepted);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!app.controller.store().values().terms_accepted);
    }

    #[test]
    fn test_invalid_submit_does_not_spawn() {
        let mut api = MockUsersApi::new();
        api.expect_create_user().times(0);
        let mut app = app_with(api);

        app.handle_key(ctrl('s')).unwrap();
        assert!(!app.controller.is_submitting());
        assert_eq!(
            app.status_message.as_deref(),
            Some("3 field(s) need attention")
        );
        assert_eq!(
            app.controller.visible_error(FieldName::Password),
            Some("Password is required")
        );
    }

    #[test]
    fn test_ctrl_w_does_not_submit() {
        let mut api = MockUsersApi::new();
        api.expect_create_user().times(0);
        let mut app = app_with(api);

        fill_form(&mut app, "Ann");
        app.handle_key(ctrl('w')).unwrap();
        assert!(!app.controller.is_submitting());
        assert_eq!(app.status_message, None);

        app.focus = Focus::Field(FieldName::Name);
        app.handle_key(ctrl('w')).unwrap();
        assert!(!app.controller.is_submitting());
        assert_eq!(app.controller.store().values().name, "Ann");
    }

    #[tokio::test]
    async fn test_submit_success_updates_list_and_resets() {
        let mut api = MockUsersApi::new();
        api.expect_create_user()
            .times(1)
            .returning(|fields| Ok(json!({"id": 1, "name": fields.name, "email": fields.email})));
        let mut app = app_with(api);

        fill_form(&mut app, "Ann");
        assert_eq!(app.focus, Focus::Submit);
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.controller.is_submitting());

        app.wait_for_submission().await;
        assert_eq!(app.controller.submitted_users().len(), 1);
        assert_eq!(app.controller.store().values(), &FieldSet::default());
        assert_eq!(app.status_message.as_deref(), Some("Registered Ann!"));
        assert!(!app.has_errors());
    }

    #[tokio::test]
    async fn test_submit_failure_shows_error_dialog() {
        let mut api = MockUsersApi::new();
        api.expect_create_user().times(1).returning(|_| {
            Err(TransportError::Status {
                status: 400,
                body: String::new(),
            })
        });
        let mut app = app_with(api);

        fill_form(&mut app, "Ann");
        app.handle_key(ctrl('s')).unwrap();
        app.wait_for_submission().await;

        assert!(app.controller.submitted_users().is_empty());
        assert_eq!(app.controller.store().values().name, "Ann");
        assert_eq!(
            app.current_error(),
            Some("Registration failed: server returned HTTP 400")
        );

        // Dialog swallows keys until dismissed
        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.controller.store().values().name, "Ann");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(!app.has_errors());
    }

    #[tokio::test]
    async fn test_input_stays_live_while_in_flight() {
        let mut api = MockUsersApi::new();
        api.expect_create_user()
            .times(1)
            .returning(|_| Ok(json!({"id": 1, "name": "Ann"})));
        let mut app = app_with(api);

        fill_form(&mut app, "Ann");
        app.handle_key(ctrl('s')).unwrap();
        assert!(app.controller.is_submitting());

        app.focus = Focus::Field(FieldName::Name);
        type_text(&mut app, "e");
        assert_eq!(app.controller.store().values().name, "Anne");

        // Overlapping submit is refused while the first is pending
        app.handle_key(ctrl('s')).unwrap();
        assert_eq!(
            app.status_message.as_deref(),
            Some("A submission is already in flight")
        );

        app.wait_for_submission().await;
        assert_eq!(app.controller.submitted_users().len(), 1);
        assert!(!app.controller.is_submitting());
    }

    #[tokio::test]
    async fn test_poll_submissions_drains_completed() {
        let mut api = MockUsersApi::new();
        api.expect_create_user()
            .times(1)
            .returning(|_| Ok(json!({"id": 9})));
        let mut app = app_with(api);

        assert_eq!(app.poll_submissions(), 0);
        fill_form(&mut app, "Ann");
        app.submit();
        tokio::task::yield_now().await;

        let mut applied = 0;
        for _ in 0..10 {
            applied += app.poll_submissions();
            if applied > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(applied, 1);
        assert_eq!(app.status_message.as_deref(), Some("Registered user!"));
    }

    #[test]
    fn test_escape_quits() {
        let mut app = app_with(MockUsersApi::new());
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_error_queue_fifo() {
        let mut app = app_with(MockUsersApi::new());
        app.push_error("first");
        app.push_error("second");
        assert_eq!(app.current_error(), Some("first"));
        app.dismiss_error();
        assert_eq!(app.current_error(), Some("second"));
        app.dismiss_error();
        assert!(!app.has_errors());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("abc"), "Abc");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_initial_values_seed_form() {
        let config = TuiConfig {
            initial_values: FieldSet {
                name: "Seed".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let app = App::new(&config, Arc::new(MockUsersApi::new()));
        assert_eq!(app.controller.store().values().name, "Seed");
    }
}
