//! Task identifiers
//!
//! IDs are the creation time in milliseconds since the epoch, rendered as a
//! decimal string (e.g. `1760900000000`). Two tasks created in the same
//! millisecond would collide, so [`TaskId::generate`] bumps the value until
//! it is free in the collection it is being added to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Task ID must not be empty")]
    Empty,

    #[error("Invalid task ID '{0}': IDs contain no whitespace")]
    Whitespace(String),
}

/// Identifier of a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Creates an ID from a creation timestamp, skipping values already taken
    pub fn generate<'a>(
        created_at: DateTime<Utc>,
        taken: impl IntoIterator<Item = &'a TaskId>,
    ) -> Self {
        let taken: Vec<&TaskId> = taken.into_iter().collect();
        let mut millis = created_at.timestamp_millis();

        loop {
            let candidate = TaskId(millis.to_string());
            if !taken.contains(&&candidate) {
                return candidate;
            }
            millis += 1;
        }
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(IdError::Whitespace(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn generate_uses_millisecond_timestamp() {
        let id = TaskId::generate(at(1_760_900_000_123), []);
        assert_eq!(id.as_str(), "1760900000123");
    }

    #[test]
    fn generate_skips_taken_ids() {
        let taken = vec![
            TaskId::generate(at(1_000), []),
            TaskId::generate(at(1_001), []),
        ];

        let id = TaskId::generate(at(1_000), &taken);
        assert_eq!(id.as_str(), "1002");
    }

    #[test]
    fn parse_trims_input() {
        let id: TaskId = "  1760900000000 ".parse().unwrap();
        assert_eq!(id.to_string(), "1760900000000");
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!("".parse::<TaskId>(), Err(IdError::Empty));
        assert_eq!("   ".parse::<TaskId>(), Err(IdError::Empty));
    }

    #[test]
    fn parse_rejects_inner_whitespace() {
        assert!(matches!(
            "12 34".parse::<TaskId>(),
            Err(IdError::Whitespace(_))
        ));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: TaskId = "42".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");

        let back: TaskId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(back, id);
    }
}
