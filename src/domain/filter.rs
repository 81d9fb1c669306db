//! List filtering
//!
//! The task list is narrowed by two independent criteria combined with AND:
//! the completion bucket and a case-insensitive title search. Filtering
//! never reorders the collection.

use serde::Serialize;

use super::task::Task;

/// Which completion bucket is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    #[default]
    Pending,
    Completed,
}

impl CompletionFilter {
    /// Returns true if the task belongs to this bucket
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CompletionFilter::Pending => !task.completed,
            CompletionFilter::Completed => task.completed,
        }
    }

    /// Switches to the other bucket
    pub fn toggle(self) -> Self {
        match self {
            CompletionFilter::Pending => CompletionFilter::Completed,
            CompletionFilter::Completed => CompletionFilter::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompletionFilter::Pending => "Pending",
            CompletionFilter::Completed => "Completed",
        }
    }
}

/// Completion filter plus title search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub completion: CompletionFilter,
    pub search: String,
}

impl TaskQuery {
    pub fn new(completion: CompletionFilter, search: impl Into<String>) -> Self {
        Self {
            completion,
            search: search.into(),
        }
    }

    /// Returns true if the task passes both criteria
    pub fn matches(&self, task: &Task) -> bool {
        self.completion.matches(task) && title_matches(&task.title, &self.search)
    }

    /// Applies the query, keeping collection order
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Case-insensitive substring match; an empty query matches everything
fn title_matches(title: &str, query: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

/// Task counts per completion bucket, over the unfiltered collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub pending: usize,
    pub completed: usize,
}

impl BucketCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            pending: tasks.len() - completed,
            completed,
        }
    }

    /// Count for a single bucket
    pub fn get(&self, filter: CompletionFilter) -> usize {
        match filter {
            CompletionFilter::Pending => self.pending,
            CompletionFilter::Completed => self.completed,
        }
    }
}
