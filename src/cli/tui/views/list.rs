//! List screen: bucket tabs, search bar and the filtered tasks

use chrono::Utc;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::{draw_status_bar, priority_color};
use crate::cli::tui::app::{App, InputMode};
use crate::cli::tui::utils::truncate_str;
use crate::domain::{CompletionFilter, Task};
use crate::storage::KeyValue;

const HINTS: &str = "[n]ew [enter]open [space]done [d]elete [/]search [tab]switch [?]help [q]uit";

/// Draw the list screen
pub fn draw<K: KeyValue>(frame: &mut Frame, app: &App<K>) {
    let [tabs_area, search_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    draw_tabs(frame, app, tabs_area);
    draw_search(frame, app, search_area);
    draw_tasks(frame, app, list_area);
    draw_status_bar(frame, status_area, app.status_message(), HINTS);
}

/// Pending/Completed tabs with a count badge each
fn draw_tabs<K: KeyValue>(frame: &mut Frame, app: &App<K>, area: Rect) {
    let counts = app.counts();
    let titles = [CompletionFilter::Pending, CompletionFilter::Completed]
        .map(|filter| format!(" {} ({}) ", filter.label(), counts.get(filter)));

    let selected = match app.list().filter() {
        CompletionFilter::Pending => 0,
        CompletionFilter::Completed => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().title("Tasks").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");

    frame.render_widget(tabs, area);
}

fn draw_search<K: KeyValue>(frame: &mut Frame, app: &App<K>, area: Rect) {
    let editing = matches!(app.input_mode(), InputMode::Search);
    let query = app.list().search();

    let (text, style) = if editing {
        (format!("{}_", query), Style::default().fg(Color::Yellow))
    } else if query.is_empty() {
        ("Search tasks... (press /)".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (query.to_string(), Style::default())
    };

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(text).style(style).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);
}

fn draw_tasks<K: KeyValue>(frame: &mut Frame, app: &App<K>, area: Rect) {
    let visible = app.visible_tasks();
    let block = Block::default().borders(Borders::ALL);

    if visible.is_empty() {
        draw_empty_state(frame, app, area, block);
        return;
    }

    let now = Utc::now();
    let date_format = &app.config().date_format;
    let title_width = (area.width as usize).saturating_sub(40).max(10);

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| task_item(task, title_width, date_format, now))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.list().index()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn task_item<'a>(
    task: &Task,
    title_width: usize,
    date_format: &str,
    now: chrono::DateTime<Utc>,
) -> ListItem<'a> {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let title_style = if task.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(format!("{} ", checkbox)),
        Span::styled(
            format!("{:<width$}", truncate_str(&task.title, title_width), width = title_width),
            title_style,
        ),
        Span::styled(
            format!(" {:<6}", task.priority.as_str()),
            Style::default().fg(priority_color(task.priority)),
        ),
    ];

    if task.due_date.is_some() {
        let due_style = if task.is_overdue(now) {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {}", task.due_label(date_format)), due_style));
        if task.is_overdue(now) {
            spans.push(Span::styled(" (overdue)", Style::default().fg(Color::Red)));
        }
    }

    ListItem::new(Line::from(spans))
}

/// Placeholder shown when the current bucket and search match nothing
fn draw_empty_state<K: KeyValue>(frame: &mut Frame, app: &App<K>, area: Rect, block: Block) {
    let query = app.list().search();
    let headline = if query.is_empty() {
        match app.list().filter() {
            CompletionFilter::Pending => "You have no pending tasks yet".to_string(),
            CompletionFilter::Completed => "You have no completed tasks yet".to_string(),
        }
    } else {
        format!("No tasks match \"{}\"", query)
    };

    let lines = vec![
        Line::from(""),
        Line::from(headline).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("Create tasks and organize your to-do items")
            .style(Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}
