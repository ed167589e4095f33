//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod submitted_users;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (form_area, users_area, status_area) = layout::create_layout(frame.area());

    forms::draw_registration(frame, form_area, app);
    submitted_users::draw(frame, users_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything
    if let Some(message) = app.current_error() {
        components::render_error_dialog(frame, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockUsersApi;
    use crate::config::TuiConfig;
    use crate::state::{FieldName, FieldSet};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;
    use std::sync::Arc;

    fn app() -> App {
        App::new(&TuiConfig::default(), Arc::new(MockUsersApi::new()))
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_untouched_errors_are_not_rendered() {
        let screen = render(&app());
        assert!(screen.contains("Submit!"));
        assert!(screen.contains("No users registered yet."));
        assert!(!screen.contains("Name is required"));
    }

    #[test]
    fn test_touched_invalid_field_renders_error() {
        let mut app = app();
        app.controller.mark_touched(FieldName::Name);
        app.controller.mark_touched(FieldName::Terms);

        let screen = render(&app);
        assert!(screen.contains("Name is required"));
        assert!(!screen.contains("Email is required"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut app = app();
        app.controller
            .set_field_value(FieldName::Password, "hunter2".into())
            .unwrap();

        let screen = render(&app);
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("•••••••"));
    }

    #[test]
    fn test_submitted_users_are_listed() {
        let mut app = app();
        for (name, email) in [("Ann", "a@x.com"), ("Bob", "b@x.com")] {
            app.controller
                .set_field_value(FieldName::Name, name.into())
                .unwrap();
            app.controller
                .set_field_value(FieldName::Email, email.into())
                .unwrap();
            app.controller
                .set_field_value(FieldName::Password, "pw".into())
                .unwrap();
            app.controller.begin_submission().unwrap();
            app.controller
                .finish_submission(Ok(json!({"id": 1, "name": name, "email": email})));
        }
        assert_eq!(app.controller.store().values(), &FieldSet::default());

        let screen = render(&app);
        assert!(screen.contains("Users (2)"));
        assert!(screen.contains("Ann"));
        assert!(screen.contains("b@x.com"));
    }

    #[test]
    fn test_error_dialog_overlays_form() {
        let mut app = app();
        app.push_error("Registration failed: server returned HTTP 400");

        let screen = render(&app);
        assert!(screen.contains("Error"));
        assert!(screen.contains("server returned HTTP 400"));
    }
}
