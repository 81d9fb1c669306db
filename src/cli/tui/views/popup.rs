//! Overlays drawn on top of the current screen

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::priority_color;
use crate::cli::tui::app::{App, ConfirmAction, InputMode, TextTarget};
use crate::cli::tui::form::{CreateForm, FormField};
use crate::cli::tui::utils::{centered_rect, truncate_str};
use crate::domain::Priority;
use crate::storage::KeyValue;

/// Draw the overlay for the current input mode, if it has one
pub fn draw<K: KeyValue>(frame: &mut Frame, app: &App<K>) {
    match app.input_mode() {
        InputMode::Create => draw_create(frame, app.form()),
        InputMode::Confirm(action) => draw_confirm(frame, action),
        InputMode::EditText(target, text) => {
            let title = match target {
                TextTarget::Title => " Edit title ",
                TextTarget::Description => " Edit description ",
            };
            draw_prompt(frame, title, text, "enter: apply  esc: cancel");
        }
        InputMode::PickPriority(index) => draw_priority_picker(frame, *index),
        InputMode::PickDate(text) => draw_prompt(
            frame,
            " Due date ",
            text,
            "YYYY-MM-DD, today or tomorrow; empty clears  enter: apply  esc: cancel",
        ),
        InputMode::Normal | InputMode::Search => {}
    }
}

fn popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// The "new task" modal
fn draw_create(frame: &mut Frame, form: &CreateForm) {
    let area = centered_rect(60, 14, frame.area());
    frame.render_widget(Clear, area);

    let block = popup_block(" New task ", Color::Green);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, description_area, priority_area, due_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let input = |field: FormField, label: &'static str, value: &str, placeholder: &'static str| {
        let focused = form.focus == field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if focused {
            format!("{}_", value)
        } else if value.is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        };
        let text_style = if value.is_empty() && !focused {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        Paragraph::new(text).style(text_style).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(border),
        )
    };

    frame.render_widget(
        input(FormField::Title, "Title", &form.title, "What needs to be done?"),
        title_area,
    );
    frame.render_widget(
        input(FormField::Description, "Description", &form.description, "Optional"),
        description_area,
    );
    frame.render_widget(
        input(FormField::DueDate, "Due date", &form.due, "YYYY-MM-DD, today, tomorrow"),
        due_area,
    );

    let mut spans = vec![Span::styled(
        " Priority: ",
        if form.focus == FormField::Priority {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        },
    )];
    for priority in Priority::ALL {
        let style = if priority == form.priority {
            Style::default()
                .fg(Color::Black)
                .bg(priority_color(priority))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(priority_color(priority))
        };
        spans.push(Span::styled(format!(" {} ", priority.as_str()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), priority_area);

    frame.render_widget(
        Paragraph::new(" tab: next field  </>: priority  enter: add  esc: close")
            .style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn draw_confirm(frame: &mut Frame, action: &ConfirmAction) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);

    let text = match action {
        ConfirmAction::Delete { title, .. } => {
            format!("Delete \"{}\"? [y/n]", truncate_str(title, 30))
        }
    };

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(popup_block(" Confirm ", Color::Red));

    frame.render_widget(paragraph, area);
}

fn draw_priority_picker(frame: &mut Frame, index: usize) {
    let area = centered_rect(30, Priority::ALL.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = Priority::ALL
        .iter()
        .enumerate()
        .map(|(i, priority)| {
            ListItem::new(format!("{} {}", i + 1, priority.as_str()))
                .style(Style::default().fg(priority_color(*priority)))
        })
        .collect();

    let list = List::new(items)
        .block(popup_block(" Priority ", Color::Cyan))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Single-line text prompt
fn draw_prompt(frame: &mut Frame, title: &str, text: &str, help: &str) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(format!("{}_", text)),
        Line::from(""),
        Line::from(help).style(Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(popup_block(title, Color::Yellow));

    frame.render_widget(paragraph, area);
}
