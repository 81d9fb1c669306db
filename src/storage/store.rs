//! Task store
//!
//! Owns the authoritative task list and the one persistent slot it lives in.
//! Every mutation serializes the whole collection under [`TASKS_KEY`]; the
//! in-memory list only changes once that write has succeeded.

use chrono::Utc;
use thiserror::Error;

use super::kv::KeyValue;
use crate::domain::{BucketCounts, NewTask, Task, TaskId};

/// Key of the slot holding the serialized task list
pub const TASKS_KEY: &str = "tasks";

/// Key a corrupt blob is copied to before it is first overwritten
pub const CORRUPT_BACKUP_KEY: &str = "tasks.corrupt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Due date {0} is in the past")]
    DueDateInPast(String),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Failed to save tasks: {0}")]
    Storage(String),
}

impl StoreError {
    /// Returns true for errors caused by user input rather than storage
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::EmptyTitle | StoreError::DueDateInPast(_))
    }
}

/// What the last load found in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet
    Missing,
    /// A valid list with this many tasks
    Loaded(usize),
    /// A value was stored but could not be parsed
    Corrupt(String),
    /// Storage itself could not be read
    Unreadable(String),
}

impl LoadOutcome {
    /// Returns true if the empty list is a degradation, not the real content
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt(_) | LoadOutcome::Unreadable(_))
    }
}

/// The task list plus its backing storage
pub struct TaskStore<K: KeyValue> {
    kv: K,
    tasks: Vec<Task>,
    outcome: LoadOutcome,
    corrupt_blob: Option<Vec<u8>>,
}

impl<K: KeyValue> TaskStore<K> {
    /// Creates a store over the given backend and loads the current list
    pub fn open(kv: K) -> Self {
        let mut store = Self {
            kv,
            tasks: Vec::new(),
            outcome: LoadOutcome::Missing,
            corrupt_blob: None,
        };
        store.load();
        store
    }

    /// Re-reads the list from storage
    ///
    /// A missing, unparseable or unreadable slot yields an empty list. The
    /// reason is kept in [`TaskStore::load_outcome`].
    pub fn load(&mut self) -> &[Task] {
        self.corrupt_blob = None;

        let (tasks, outcome) = match self.kv.get(TASKS_KEY) {
            Ok(None) => (Vec::new(), LoadOutcome::Missing),
            Ok(Some(blob)) => match serde_json::from_slice::<Vec<Task>>(&blob) {
                Ok(tasks) => {
                    let count = tasks.len();
                    (tasks, LoadOutcome::Loaded(count))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored task list is corrupt, starting empty");
                    self.corrupt_blob = Some(blob);
                    (Vec::new(), LoadOutcome::Corrupt(e.to_string()))
                }
            },
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "failed to read task list, starting empty");
                (Vec::new(), LoadOutcome::Unreadable(format!("{:#}", e)))
            }
        };

        tracing::debug!(outcome = ?outcome, "loaded task list");
        self.tasks = tasks;
        self.outcome = outcome;
        &self.tasks
    }

    /// Returns what the last load found
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by ID
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Per-bucket counts over the whole list
    pub fn counts(&self) -> BucketCounts {
        BucketCounts::of(&self.tasks)
    }

    /// Validates and appends a new task
    pub fn add(&mut self, input: NewTask) -> Result<&Task, StoreError> {
        if input.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let now = Utc::now();
        if let Some(due) = input.due_date {
            if due < now {
                return Err(StoreError::DueDateInPast(due.to_rfc3339()));
            }
        }

        let id = TaskId::generate(now, self.tasks.iter().map(|t| &t.id));
        let task = Task::from_new(id, input);

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)?;

        let index = self.tasks.len() - 1;
        tracing::info!(id = %self.tasks[index].id, count = self.tasks.len(), "task added");
        Ok(&self.tasks[index])
    }

    /// Removes a task; an unknown ID leaves the list untouched
    ///
    /// Callers are expected to have confirmed the deletion with the user.
    pub fn remove(&mut self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        let Some(index) = self.position(id) else {
            tracing::debug!(id = %id, "remove: no such task");
            return Ok(None);
        };

        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::info!(id = %id, "task removed");
        Ok(Some(removed))
    }

    /// Flips the completion flag of a task
    pub fn toggle_completed(&mut self, id: &TaskId) -> Result<&Task, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let mut next = self.tasks.clone();
        next[index].toggle_completed();
        self.commit(next)?;

        tracing::info!(id = %id, completed = self.tasks[index].completed, "task toggled");
        Ok(&self.tasks[index])
    }

    /// Overwrites the stored task that has the same ID
    ///
    /// The title is not re-validated here.
    pub fn replace(&mut self, task: Task) -> Result<(), StoreError> {
        let index = self
            .position(&task.id)
            .ok_or_else(|| StoreError::NotFound(task.id.clone()))?;

        let id = task.id.clone();
        let mut next = self.tasks.clone();
        next[index] = task;
        self.commit(next)?;

        tracing::info!(id = %id, "task updated");
        Ok(())
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Persists `next` and adopts it as the current list
    fn commit(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        if let Some(blob) = self.corrupt_blob.as_deref() {
            self.kv
                .set(CORRUPT_BACKUP_KEY, blob)
                .map_err(|e| StoreError::Storage(format!("{:#}", e)))?;
            tracing::warn!(key = CORRUPT_BACKUP_KEY, "kept a copy of the corrupt task list");
            self.corrupt_blob = None;
        }

        let blob = serde_json::to_vec(&next)
            .map_err(|e| StoreError::Storage(format!("failed to serialize tasks: {}", e)))?;

        self.kv.set(TASKS_KEY, &blob).map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "failed to write task list");
            StoreError::Storage(format!("{:#}", e))
        })?;

        self.tasks = next;
        Ok(())
    }

}
