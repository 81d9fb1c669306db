//! Screen and overlay rendering

pub mod detail;
pub mod list;
pub mod popup;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::domain::Priority;

pub(crate) fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

/// Draw the bottom status bar: the last message, or the screen's key hints
pub(crate) fn draw_status_bar(frame: &mut Frame, area: Rect, message: Option<&str>, hints: &str) {
    let (text, style) = match message {
        Some(msg) => (msg, Style::default().fg(Color::Yellow)),
        None => (hints, Style::default().fg(Color::DarkGray)),
    };

    let paragraph = Paragraph::new(format!("Pocket Todo | {}", text))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
