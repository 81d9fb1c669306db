//! # Command-Line Interface
//!
//! User-facing commands and the interactive terminal UI.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add` | Create a task |
//! | `list` | Pending or completed tasks, with optional title search |
//! | `show` | One task in full |
//! | `toggle` | Flip a task between pending and completed |
//! | `edit` | Change title, description, priority or due date |
//! | `rm` | Delete a task after confirmation |
//! | `status` | Data directory, storage health and bucket counts |
//! | `ui` | Interactive list and detail screens |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! `RUST_LOG` selects log output; `--verbose` (or `-v`) enables debug logs
//! when it is unset. The terminal UI logs to `todo.log` in the data directory.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
