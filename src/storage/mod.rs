//! # Storage Layer
//!
//! Persistence for pocket-todo.
//!
//! ## Storage Format
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON array under the `tasks` key | `<data-dir>/tasks.json` |
//! | Corrupt list backup | Raw copy of the unparseable value | `<data-dir>/tasks.corrupt.json` |
//! | Config | TOML | `<data-dir>/config.toml` |
//! | TUI log | Plain text | `<data-dir>/todo.log` |
//!
//! ## Concurrency Safety
//!
//! - [`FileKv`] takes a shared lock to read and an exclusive lock to write (`fs2`)
//! - Writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Profile`] - Entry point: data directory plus configuration
//! - [`TaskStore`] - The task list and its operations
//! - [`KeyValue`] - Backend seam, implemented by [`FileKv`] and [`MemoryKv`]
//! - [`Config`] - User configuration

mod kv;
mod store;
mod config;
mod profile;

pub use kv::{FileKv, KeyValue, MemoryKv};
pub use store::{LoadOutcome, StoreError, TaskStore, CORRUPT_BACKUP_KEY, TASKS_KEY};
pub use config::{Config, ConfigError, CONFIG_FILE};
pub use profile::{Profile, ProfileError, LOG_FILE};
