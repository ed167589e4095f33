//! Registration form rendering

use super::field_renderer::{draw_field, draw_help_text, FieldDisplay, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FieldName, Focus};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the registration form with its submit button
pub fn draw_registration(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Register ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // Name
            Constraint::Length(FIELD_HEIGHT),  // Email
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(FIELD_HEIGHT),  // Terms
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
            Constraint::Length(1), // Help text
        ])
        .horizontal_margin(1)
        .split(inner);

    let store = app.controller.store();
    let values = store.values();

    for (idx, field) in FieldName::ALL.into_iter().enumerate() {
        let display = match field {
            FieldName::Name => FieldDisplay::Text(&values.name),
            FieldName::Email => FieldDisplay::Text(&values.email),
            FieldName::Password => FieldDisplay::Masked(&values.password),
            FieldName::Terms => FieldDisplay::Checkbox(values.terms_accepted),
        };
        draw_field(
            frame,
            chunks[idx],
            field.label(),
            display,
            app.focus == Focus::Field(field),
            store.visible_error(field),
        );
    }

    let submitting = app.controller.is_submitting();
    let button_label = if submitting { "Submitting..." } else { "Submit!" };
    let button_area = Rect {
        width: chunks[4].width.min(20),
        ..chunks[4]
    };
    render_action_button(
        frame,
        button_area,
        button_label,
        app.focus == Focus::Submit,
        !submitting,
        Color::Green,
    );

    draw_help_text(
        frame,
        chunks[6],
        &[
            ("Tab", "next field"),
            ("Space", "toggle"),
            (crate::platform::SUBMIT_SHORTCUT, "submit"),
            ("Esc", "quit"),
        ],
    );
}
