//! Submitted users list

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the users registered so far, oldest first
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let users = app.controller.submitted_users();

    let block = Block::default()
        .title(format!(" Users ({}) ", users.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if users.is_empty() {
        let empty = Paragraph::new("No users registered yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = users
        .iter()
        .map(|user| {
            let id = user.id().map(|id| format!("#{id} ")).unwrap_or_default();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(id, Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        user.name().unwrap_or("(no name)").to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("  {}", user.email().unwrap_or("(no email)")),
                        Style::default().fg(Color::Blue),
                    ),
                    Span::styled(
                        format!("  {}", user.received_at.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
