//! Detail screen: every field of one task

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{draw_status_bar, priority_color};
use crate::cli::tui::app::App;
use crate::cli::tui::detail::DetailScreen;
use crate::storage::KeyValue;

const HINTS: &str =
    "[t]itle [e]description [p]riority [u] due date [s]ave [space]done [d]elete [esc]back";

/// Draw the detail screen for the open task
pub fn draw<K: KeyValue>(frame: &mut Frame, app: &App<K>, detail: &DetailScreen) {
    let [body_area, status_area] =
        Layout::vertical([Constraint::Min(8), Constraint::Length(3)]).areas(frame.area());

    let task = detail.draft();
    let label = Style::default().fg(Color::DarkGray);

    let (status_text, status_style) = if task.completed {
        ("Completed", Style::default().fg(Color::Green))
    } else {
        ("Pending", Style::default().fg(Color::Yellow))
    };

    let description = if task.description.is_empty() {
        Span::styled("No description", label.add_modifier(Modifier::ITALIC))
    } else {
        Span::raw(task.description.as_str())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Title:       ", label),
            Span::styled(task.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Status:      ", label),
            Span::styled(status_text, status_style),
        ]),
        Line::from(vec![
            Span::styled("Priority:    ", label),
            Span::styled(
                task.priority.as_str(),
                Style::default().fg(priority_color(task.priority)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Due date:    ", label),
            Span::raw(task.due_label(&app.config().date_format)),
        ]),
        Line::from(vec![Span::styled("ID:          ", label), Span::raw(detail.task_id().as_str())]),
        Line::from(""),
        Line::from(Span::styled("Description:", label)),
        Line::from(description),
    ];

    let title = if detail.is_dirty() {
        " Task details (unsaved changes) "
    } else {
        " Task details "
    };
    let border_style = if detail.is_dirty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, body_area);
    draw_status_bar(frame, status_area, app.status_message(), HINTS);
}
