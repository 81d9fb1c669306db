//! pocket-todo - A local-first personal to-do list
//!
//! Tasks carry a title, description, priority and optional due date and are
//! kept in one JSON slot in the user's data directory. The crate offers
//! one-shot commands and an interactive terminal UI over the same store.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{CompletionFilter, NewTask, Priority, Task, TaskId, TaskQuery};
pub use storage::{Profile, TaskStore};
