//! Task domain model
//!
//! A task is a single to-do item: title, free-form description, priority,
//! completion flag and an optional due date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::due;
use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
#[error("Invalid priority '{0}': expected low, medium or high")]
pub struct PriorityError(String);

/// Priority of a task, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(alias = "Low", alias = "Baixa")]
    Low,
    #[serde(alias = "Medium", alias = "Média", alias = "Media")]
    Medium,
    #[serde(alias = "High", alias = "Alta")]
    High,
}

impl Priority {
    /// All priorities in ascending order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Returns the lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Returns the position of this priority in [`Priority::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "l" | "baixa" => Ok(Priority::Low),
            "medium" | "m" | "média" | "media" => Ok(Priority::Medium),
            "high" | "h" | "alta" => Ok(Priority::High),
            _ => Err(PriorityError(s.to_string())),
        }
    }
}

/// Input for creating a task; the store assigns the ID
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates input with just a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, fixed at creation
    pub id: TaskId,

    /// Human-readable title
    pub title: String,

    /// Free-form description, possibly empty
    #[serde(default)]
    pub description: String,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Optional due date
    #[serde(default, with = "due")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds a pending task from creation input
    pub fn from_new(id: TaskId, input: NewTask) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            completed: false,
            due_date: input.due_date,
        }
    }

    /// Flips the completion flag
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns true if the task is past its due date and still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.map(|due| due < now).unwrap_or(false)
    }

    /// Due date formatted for display, or a placeholder
    pub fn due_label(&self, format: &str) -> String {
        due::format_due(self.due_date.as_ref(), format)
    }
}
