//! Task list screen state

use crate::domain::{CompletionFilter, Task, TaskQuery};

/// Filter, search text and selection of the list screen
#[derive(Debug, Clone, Default)]
pub struct ListScreen {
    query: TaskQuery,
    index: usize,
}

impl ListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks shown for the current filter and search, in collection order
    pub fn visible<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        self.query.apply(tasks)
    }

    /// The highlighted task, if the visible list is not empty
    pub fn selected<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.visible(tasks).get(self.index).copied()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn filter(&self) -> CompletionFilter {
        self.query.completion
    }

    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn set_filter(&mut self, filter: CompletionFilter) {
        if self.query.completion != filter {
            self.query.completion = filter;
            self.index = 0;
        }
    }

    pub fn toggle_filter(&mut self) {
        self.set_filter(self.query.completion.toggle());
    }

    pub fn push_search(&mut self, c: char) {
        self.query.search.push(c);
        self.index = 0;
    }

    pub fn pop_search(&mut self) {
        self.query.search.pop();
        self.index = 0;
    }

    pub fn clear_search(&mut self) {
        self.query.search.clear();
        self.index = 0;
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
        }
    }

    /// Keeps the selection inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}
