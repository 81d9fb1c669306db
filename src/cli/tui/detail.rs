//! Task detail screen state
//!
//! The screen edits a private copy of the task. Completion changes are
//! committed at once; title, description, priority and due date stay in the
//! draft until the user saves. Nothing here touches the store: every action
//! that should reach it comes back as a [`DetailCommand`] for the app to apply.

use chrono::{DateTime, Utc};

use crate::domain::{Priority, Task, TaskId};

/// A request from the detail screen to the app
#[derive(Debug, Clone, PartialEq)]
pub enum DetailCommand {
    /// Flip completion of the stored task
    ToggleCompleted(TaskId),
    /// Delete the task (the app confirms) and return to the list
    Delete(TaskId),
    /// Persist the draft
    Replace(Task),
}

#[derive(Debug, Clone)]
pub struct DetailScreen {
    stored: Task,
    draft: Task,
}

impl DetailScreen {
    /// Opens the screen on a snapshot of a task
    pub fn new(task: Task) -> Self {
        Self {
            draft: task.clone(),
            stored: task,
        }
    }

    pub fn task_id(&self) -> &TaskId {
        &self.stored.id
    }

    /// The task as currently edited
    pub fn draft(&self) -> &Task {
        &self.draft
    }

    /// True while title, description, priority or due date differ from storage
    pub fn is_dirty(&self) -> bool {
        self.draft != self.stored
    }

    pub fn toggle_completed(&mut self) -> DetailCommand {
        self.draft.toggle_completed();
        self.stored.completed = self.draft.completed;
        DetailCommand::ToggleCompleted(self.stored.id.clone())
    }

    pub fn delete(&self) -> DetailCommand {
        DetailCommand::Delete(self.stored.id.clone())
    }

    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
    }

    pub fn set_description(&mut self, description: String) {
        self.draft.description = description;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.draft.due_date = due_date;
    }

    /// Emits the draft for persistence and treats it as stored from now on
    pub fn save(&mut self) -> DetailCommand {
        self.stored = self.draft.clone();
        DetailCommand::Replace(self.draft.clone())
    }

    /// Re-aligns the completion flag with storage, e.g. after a failed write
    pub fn sync_completed(&mut self, completed: bool) {
        self.stored.completed = completed;
        self.draft.completed = completed;
    }

    /// Adopts the stored version after a save was rejected, keeping the draft
    pub fn sync_stored(&mut self, stored: Task) {
        self.stored = stored;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use chrono::Duration;

    fn screen() -> DetailScreen {
        let task = Task::from_new(
            "1760900000000".parse().unwrap(),
            NewTask::titled("Buy milk").with_description("2 liters"),
        );
        DetailScreen::new(task)
    }

    #[test]
    fn opens_clean() {
        let screen = screen();
        assert!(!screen.is_dirty());
        assert_eq!(screen.draft().title, "Buy milk");
    }

    #[test]
    fn toggle_commits_immediately() {
        let mut screen = screen();

        let cmd = screen.toggle_completed();

        assert_eq!(cmd, DetailCommand::ToggleCompleted(screen.task_id().clone()));
        assert!(screen.draft().completed);
        assert!(!screen.is_dirty());
    }

    #[test]
    fn field_edits_stay_local_until_saved() {
        let mut screen = screen();

        screen.set_title("Buy oat milk".to_string());
        screen.set_priority(Priority::High);
        screen.set_due_date(Some(Utc::now() + Duration::days(1)));
        assert!(screen.is_dirty());

        let cmd = screen.save();
        match cmd {
            DetailCommand::Replace(task) => {
                assert_eq!(task.title, "Buy oat milk");
                assert_eq!(task.priority, Priority::High);
                assert_eq!(task.description, "2 liters");
            }
            other => panic!("Expected Replace, got {:?}", other),
        }
        assert!(!screen.is_dirty());
    }

    #[test]
    fn toggle_keeps_pending_edits_in_draft() {
        let mut screen = screen();
        screen.set_description("oat".to_string());

        screen.toggle_completed();

        assert!(screen.is_dirty());
        assert_eq!(screen.draft().description, "oat");
        assert!(screen.draft().completed);
    }

    #[test]
    fn delete_names_the_task() {
        let screen = screen();
        assert_eq!(screen.delete(), DetailCommand::Delete(screen.task_id().clone()));
    }

    #[test]
    fn sync_completed_reverts_failed_toggle() {
        let mut screen = screen();
        screen.toggle_completed();

        screen.sync_completed(false);

        assert!(!screen.draft().completed);
        assert!(!screen.is_dirty());
    }
}
