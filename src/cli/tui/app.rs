//! TUI application state and logic
//!
//! The app is the navigation controller: it owns the store, routes keys to
//! the list screen, the detail screen or the open overlay, and applies the
//! commands the detail screen hands back.

use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::detail::{DetailCommand, DetailScreen};
use super::event::{Event, EventHandler};
use super::form::{CreateForm, FormField};
use super::list::ListScreen;
use super::ui::Terminal;
use super::views;
use crate::domain::due::parse_due;
use crate::domain::{BucketCounts, Priority, Task, TaskId};
use crate::storage::{Config, KeyValue, LoadOutcome, StoreError, TaskStore};

const LIST_HELP: &str =
    "j/k:move tab:pending/completed /:search n:new enter:open space:done d:delete r:reload q:quit";
const DETAIL_HELP: &str =
    "space:done t:title e:description p:priority u:due date s:save d:delete esc:back";

/// Text field edited from the detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Title,
    Description,
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete { id: TaskId, title: String },
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Create,
    Confirm(ConfirmAction),
    EditText(TextTarget, String),
    PickPriority(usize),
    PickDate(String),
}

/// Application state
pub struct App<K: KeyValue> {
    /// The task list and its storage
    store: TaskStore<K>,

    config: Config,

    /// List screen state, kept while the detail screen is open
    list: ListScreen,

    /// Open detail screen, if any
    detail: Option<DetailScreen>,

    /// Creation modal inputs, kept when the modal is dismissed
    form: CreateForm,

    input_mode: InputMode,

    /// Status message to display
    status_message: Option<String>,

    should_quit: bool,
}

impl<K: KeyValue> App<K> {
    /// Create a new application over a loaded store
    pub fn new(store: TaskStore<K>, config: Config) -> Self {
        let status_message = match store.load_outcome() {
            LoadOutcome::Corrupt(_) => Some(
                "Stored tasks could not be parsed; starting empty (a backup is kept on first change)"
                    .to_string(),
            ),
            LoadOutcome::Unreadable(_) => {
                Some("Stored tasks could not be read; starting empty".to_string())
            }
            LoadOutcome::Missing | LoadOutcome::Loaded(_) => None,
        };

        Self {
            form: CreateForm::new(config.default_priority),
            store,
            config,
            list: ListScreen::new(),
            detail: None,
            input_mode: InputMode::Normal,
            status_message,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize => {}
                Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match &self.detail {
            Some(detail) => views::detail::draw(frame, self, detail),
            None => views::list::draw(frame, self),
        }
        views::popup::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        self.status_message = None;

        match std::mem::take(&mut self.input_mode) {
            InputMode::Normal => {
                if self.detail.is_some() {
                    self.handle_detail_key(key);
                } else {
                    self.handle_list_key(key);
                }
            }
            InputMode::Search => self.handle_search_key(key),
            InputMode::Create => self.handle_create_key(key),
            InputMode::Confirm(action) => self.handle_confirm_key(key, action),
            InputMode::EditText(target, text) => self.handle_edit_text_key(key, target, text),
            InputMode::PickPriority(index) => self.handle_priority_key(key, index),
            InputMode::PickDate(text) => self.handle_date_key(key, text),
        }
    }

    // =========================================================================
    // List screen
    // =========================================================================

    fn handle_list_key(&mut self, key: KeyEvent) {
        let visible_len = self.visible_tasks().len();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.list.select_next(visible_len),
            KeyCode::Char('k') | KeyCode::Up => self.list.select_prev(visible_len),

            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Left
            | KeyCode::Right => self.list.toggle_filter(),

            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Esc => self.list.clear_search(),

            KeyCode::Char('n') => self.input_mode = InputMode::Create,

            KeyCode::Enter => {
                if let Some(task) = self.list.selected(self.store.tasks()) {
                    self.detail = Some(DetailScreen::new(task.clone()));
                }
            }

            KeyCode::Char(' ') | KeyCode::Char('c') => {
                if let Some(id) = self.selected_id() {
                    self.toggle_task(&id);
                    let len = self.visible_tasks().len();
                    self.list.clamp(len);
                }
            }

            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.request_delete(id);
                }
            }

            KeyCode::Char('r') => {
                self.store.load();
                let len = self.visible_tasks().len();
                self.list.clamp(len);
                self.status_message = Some(match self.store.load_outcome() {
                    LoadOutcome::Corrupt(reason) => format!("Stored tasks are corrupt: {}", reason),
                    LoadOutcome::Unreadable(reason) => format!("Could not read tasks: {}", reason),
                    LoadOutcome::Missing | LoadOutcome::Loaded(_) => "Reloaded".to_string(),
                });
            }

            KeyCode::Char('?') => self.status_message = Some(LIST_HELP.to_string()),

            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.list.clear_search(),
            KeyCode::Enter => {}
            KeyCode::Backspace => {
                self.list.pop_search();
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char(c) => {
                self.list.push_search(c);
                self.input_mode = InputMode::Search;
            }
            _ => self.input_mode = InputMode::Search,
        }
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        self.input_mode = InputMode::Create;

        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form.focus = self.form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus = self.form.focus.prev(),
            KeyCode::Left if self.form.focus == FormField::Priority => {
                self.form.cycle_priority(false)
            }
            KeyCode::Right | KeyCode::Char(' ') if self.form.focus == FormField::Priority => {
                self.form.cycle_priority(true)
            }
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char(c) if self.form.focus.is_text() => self.form.push_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let input = match self.form.to_new_task() {
            Ok(input) => input,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };

        match self.store.add(input) {
            Ok(task) => {
                self.status_message = Some(format!("Task added: {}", task.title));
                self.form.reset();
                self.input_mode = InputMode::Normal;
            }
            Err(e) => self.status_message = Some(store_error_message(&e)),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: ConfirmAction) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => match action {
                ConfirmAction::Delete { id, .. } => self.delete_task(&id),
            },
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status_message = Some("Deletion cancelled".to_string());
            }
            _ => self.input_mode = InputMode::Confirm(action),
        }
    }

    // =========================================================================
    // Detail screen
    // =========================================================================

    fn handle_detail_key(&mut self, key: KeyEvent) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Left | KeyCode::Char('h') => {
                if detail.is_dirty() {
                    self.status_message = Some("Unsaved changes discarded".to_string());
                }
                self.detail = None;
                let len = self.visible_tasks().len();
                self.list.clamp(len);
            }

            KeyCode::Char(' ') | KeyCode::Char('c') => {
                let cmd = detail.toggle_completed();
                self.apply(cmd);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let cmd = detail.delete();
                self.apply(cmd);
            }
            KeyCode::Char('s') => {
                let cmd = detail.save();
                self.apply(cmd);
            }

            KeyCode::Char('t') => {
                self.input_mode = InputMode::EditText(TextTarget::Title, detail.draft().title.clone());
            }
            KeyCode::Char('e') => {
                self.input_mode =
                    InputMode::EditText(TextTarget::Description, detail.draft().description.clone());
            }
            KeyCode::Char('p') => {
                self.input_mode = InputMode::PickPriority(detail.draft().priority.index());
            }
            KeyCode::Char('u') => {
                let current = detail
                    .draft()
                    .due_date
                    .map(|due| due.with_timezone(&Local).format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                self.input_mode = InputMode::PickDate(current);
            }

            KeyCode::Char('?') => self.status_message = Some(DETAIL_HELP.to_string()),

            _ => {}
        }
    }

    fn handle_edit_text_key(&mut self, key: KeyEvent, target: TextTarget, mut text: String) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                if let Some(detail) = self.detail.as_mut() {
                    match target {
                        TextTarget::Title => detail.set_title(text),
                        TextTarget::Description => detail.set_description(text),
                    }
                }
            }
            KeyCode::Backspace => {
                text.pop();
                self.input_mode = InputMode::EditText(target, text);
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.input_mode = InputMode::EditText(target, text);
            }
            _ => self.input_mode = InputMode::EditText(target, text),
        }
    }

    fn handle_priority_key(&mut self, key: KeyEvent, index: usize) {
        let len = Priority::ALL.len();
        let chosen = match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => Some(index),
            KeyCode::Char(c @ '1'..='3') => Some(c as usize - '1' as usize),
            KeyCode::Char('j') | KeyCode::Down => {
                self.input_mode = InputMode::PickPriority((index + 1) % len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.input_mode = InputMode::PickPriority((index + len - 1) % len);
                None
            }
            _ => {
                self.input_mode = InputMode::PickPriority(index);
                None
            }
        };

        if let (Some(index), Some(detail)) = (chosen, self.detail.as_mut()) {
            detail.set_priority(Priority::ALL[index.min(len - 1)]);
        }
    }

    fn handle_date_key(&mut self, key: KeyEvent, mut text: String) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                let due = if text.trim().is_empty() {
                    None
                } else {
                    match parse_due(&text, Local::now()) {
                        Ok(due) => Some(due),
                        Err(e) => {
                            self.status_message = Some(e.to_string());
                            self.input_mode = InputMode::PickDate(text);
                            return;
                        }
                    }
                };

                if due.map(|d| d < Utc::now()).unwrap_or(false) {
                    self.status_message = Some("Note: the due date is in the past".to_string());
                }
                if let Some(detail) = self.detail.as_mut() {
                    detail.set_due_date(due);
                }
            }
            KeyCode::Backspace => {
                text.pop();
                self.input_mode = InputMode::PickDate(text);
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.input_mode = InputMode::PickDate(text);
            }
            _ => self.input_mode = InputMode::PickDate(text),
        }
    }

    /// Applies a command from the detail screen
    fn apply(&mut self, cmd: DetailCommand) {
        match cmd {
            DetailCommand::ToggleCompleted(id) => self.toggle_task(&id),
            DetailCommand::Delete(id) => {
                self.detail = None;
                self.request_delete(id);
            }
            DetailCommand::Replace(task) => {
                let id = task.id.clone();
                match self.store.replace(task) {
                    Ok(()) => self.status_message = Some("Task updated".to_string()),
                    Err(e) => {
                        self.status_message = Some(store_error_message(&e));
                        let stored = self.store.get(&id).cloned();
                        if let (Some(detail), Some(stored)) = (self.detail.as_mut(), stored) {
                            detail.sync_stored(stored);
                        }
                    }
                }
            }
        }
    }

    // =========================================================================
    // Store operations
    // =========================================================================

    fn toggle_task(&mut self, id: &TaskId) {
        let completed = match self.store.toggle_completed(id) {
            Ok(task) => {
                self.status_message = Some(if task.completed {
                    format!("Task completed: {}", task.title)
                } else {
                    format!("Task reopened: {}", task.title)
                });
                Some(task.completed)
            }
            Err(e) => {
                self.status_message = Some(store_error_message(&e));
                self.store.get(id).map(|t| t.completed)
            }
        };

        if let (Some(detail), Some(completed)) = (self.detail.as_mut(), completed) {
            detail.sync_completed(completed);
        }
    }

    fn request_delete(&mut self, id: TaskId) {
        let Some(title) = self.store.get(&id).map(|t| t.title.clone()) else {
            self.status_message = Some(format!("Task not found: {}", id));
            return;
        };

        if self.config.confirm_delete {
            self.input_mode = InputMode::Confirm(ConfirmAction::Delete { id, title });
        } else {
            self.delete_task(&id);
        }
    }

    fn delete_task(&mut self, id: &TaskId) {
        self.status_message = Some(match self.store.remove(id) {
            Ok(Some(task)) => format!("Task deleted: {}", task.title),
            Ok(None) => format!("Task not found: {}", id),
            Err(e) => store_error_message(&e),
        });

        let len = self.visible_tasks().len();
        self.list.clamp(len);
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.list.selected(self.store.tasks()).map(|t| t.id.clone())
    }

    // Public accessors for views

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.list.visible(self.store.tasks())
    }

    pub fn counts(&self) -> BucketCounts {
        self.store.counts()
    }

    pub fn list(&self) -> &ListScreen {
        &self.list
    }

    pub fn detail(&self) -> Option<&DetailScreen> {
        self.detail.as_ref()
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// User-facing text for a failed store operation
fn store_error_message(err: &StoreError) -> String {
    if !err.is_validation() {
        tracing::warn!(error = %err, "task operation failed");
    }

    match err {
        StoreError::EmptyTitle => "Please enter a title for the task".to_string(),
        StoreError::DueDateInPast(_) => "Please choose a due date that is not in the past".to_string(),
        StoreError::NotFound(id) => format!("Task not found: {}", id),
        StoreError::Storage(reason) => format!("Could not save changes: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionFilter, NewTask};
    use crate::storage::{MemoryKv, TASKS_KEY};

    fn app() -> App<MemoryKv> {
        App::new(TaskStore::open(MemoryKv::new()), Config::default())
    }

    fn app_with(titles: &[&str]) -> App<MemoryKv> {
        let mut store = TaskStore::open(MemoryKv::new());
        for title in titles {
            store.add(NewTask::titled(*title)).unwrap();
        }
        App::new(store, Config::default())
    }

    fn press(app: &mut App<MemoryKv>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App<MemoryKv>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn visible_titles(app: &App<MemoryKv>) -> Vec<String> {
        app.visible_tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn buy_milk_scenario() {
        let mut app = app();
        assert!(app.visible_tasks().is_empty());

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode(), &InputMode::Create);
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks()[0].priority, Priority::Low);
        assert_eq!(app.counts(), BucketCounts { pending: 1, completed: 0 });
        assert_eq!(visible_titles(&app), vec!["Buy milk"]);
        assert!(app.form().title.is_empty());

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.counts(), BucketCounts { pending: 0, completed: 1 });
        assert!(app.visible_tasks().is_empty());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.list().filter(), CompletionFilter::Completed);
        assert_eq!(visible_titles(&app), vec!["Buy milk"]);

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.input_mode(), InputMode::Confirm(_)));
        press(&mut app, KeyCode::Char('y'));

        assert!(app.tasks().is_empty());
        assert_eq!(app.counts(), BucketCounts::default());
        assert!(app.visible_tasks().is_empty());
    }

    #[test]
    fn create_with_blank_title_keeps_modal_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Create);
        assert!(app.tasks().is_empty());
        assert_eq!(app.status_message(), Some("Please enter a title for the task"));
    }

    #[test]
    fn create_with_bad_due_date_keeps_modal_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Pay rent");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2001-01-01");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Create);
        assert!(app.tasks().is_empty());
        assert_eq!(
            app.status_message(),
            Some("Please choose a due date that is not in the past")
        );
    }

    #[test]
    fn dismissed_modal_keeps_input() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Half typed");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.form().title, "Half typed");
    }

    #[test]
    fn priority_field_cycles_in_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Urgent");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.tasks()[0].priority, Priority::High);
    }

    #[test]
    fn search_filters_titles() {
        let mut app = app_with(&["Buy milk", "Walk dog", "Milk the cow"]);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "MILK");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(visible_titles(&app), vec!["Buy milk", "Milk the cow"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_tasks().len(), 3);
    }

    #[test]
    fn cancelled_delete_keeps_task() {
        let mut app = app_with(&["Keep me"]);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.status_message(), Some("Deletion cancelled"));
    }

    #[test]
    fn delete_without_confirmation_when_disabled() {
        let store = TaskStore::open(MemoryKv::new());
        let config = Config {
            confirm_delete: false,
            ..Config::default()
        };
        let mut app = App::new(store, config);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Gone");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('d'));

        assert!(app.tasks().is_empty());
        assert_eq!(app.input_mode(), &InputMode::Normal);
    }

    #[test]
    fn detail_edits_persist_only_on_save() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Enter);
        assert!(app.detail().is_some());

        press(&mut app, KeyCode::Char('t'));
        for _ in 0.."milk".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "bread");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('3'));

        let detail = app.detail().unwrap();
        assert!(detail.is_dirty());
        assert_eq!(detail.draft().title, "Buy bread");
        assert_eq!(app.tasks()[0].title, "Buy milk");

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.tasks()[0].title, "Buy bread");
        assert_eq!(app.tasks()[0].priority, Priority::High);
        assert!(!app.detail().unwrap().is_dirty());
    }

    #[test]
    fn leaving_detail_discards_draft() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "never saved");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        assert!(app.detail().is_none());
        assert_eq!(app.tasks()[0].description, "");
        assert_eq!(app.status_message(), Some("Unsaved changes discarded"));
    }

    #[test]
    fn detail_toggle_commits_immediately() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));

        assert!(app.tasks()[0].completed);
        assert!(app.detail().unwrap().draft().completed);
        assert!(!app.detail().unwrap().is_dirty());
    }

    #[test]
    fn detail_due_date_prompt() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "someday");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.input_mode(), InputMode::PickDate(_)));

        for _ in 0.."someday".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "tomorrow");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert!(app.detail().unwrap().draft().due_date.is_some());
        assert!(app.tasks()[0].due_date.is_none());
    }

    #[test]
    fn detail_delete_returns_to_list_and_confirms() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('d'));

        assert!(app.detail().is_none());
        assert!(matches!(app.input_mode(), InputMode::Confirm(_)));

        press(&mut app, KeyCode::Enter);
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn failed_toggle_is_reported_and_reverted() {
        let kv = MemoryKv::new();
        let mut store = TaskStore::open(kv.clone());
        store.add(NewTask::titled("Buy milk")).unwrap();
        let mut app = App::new(store, Config::default());

        press(&mut app, KeyCode::Enter);
        kv.set_fail_writes(true);
        press(&mut app, KeyCode::Char(' '));

        assert!(!app.tasks()[0].completed);
        assert!(!app.detail().unwrap().draft().completed);
        assert!(app
            .status_message()
            .unwrap()
            .starts_with("Could not save changes"));
    }

    #[test]
    fn corrupt_storage_is_announced() {
        let store = TaskStore::open(MemoryKv::with_value(TASKS_KEY, "]"));
        let app = App::new(store, Config::default());

        assert!(app.tasks().is_empty());
        assert!(app.status_message().unwrap().contains("could not be parsed"));
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());

        let mut app = app_with(&["x"]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert!(app.detail().is_none());

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
