//! Field rendering utilities for forms

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a field: bordered input plus one line of error text
pub const FIELD_HEIGHT: u16 = 4;

/// How a field's value is displayed
pub enum FieldDisplay<'a> {
    Text(&'a str),
    /// Text rendered as bullets
    Masked(&'a str),
    Checkbox(bool),
}

/// Draw a labelled input with its inline error line underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    display: FieldDisplay,
    is_active: bool,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if is_active { "▌" } else { "" };

    let line = match display {
        FieldDisplay::Checkbox(checked) => {
            let mark = if checked { "[x]" } else { "[ ]" };
            Line::from(vec![
                Span::styled(mark, text_style),
                Span::styled(" I accept", Style::default().fg(Color::DarkGray)),
            ])
        }
        FieldDisplay::Text(value) | FieldDisplay::Masked(value)
            if value.is_empty() && !is_active =>
        {
            Line::from(Span::styled("(empty)", Style::default().fg(Color::DarkGray)))
        }
        FieldDisplay::Text(value) => Line::from(vec![
            Span::styled(value.to_string(), text_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]),
        FieldDisplay::Masked(value) => Line::from(vec![
            Span::styled("•".repeat(value.chars().count()), text_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]),
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(line).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, chunks[1]);
    }
}

/// Draw a single line of key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
