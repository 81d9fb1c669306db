//! Domain models for pocket-todo
//!
//! Contains the task model and list filtering without any I/O concerns.

mod id;
mod task;
mod filter;
pub mod due;

pub use id::{IdError, TaskId};
pub use task::{NewTask, Priority, PriorityError, Task};
pub use filter::{BucketCounts, CompletionFilter, TaskQuery};
pub use due::DueDateError;
