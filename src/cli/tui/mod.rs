//! Interactive task manager
//!
//! A list screen with Pending/Completed tabs and a search bar, a creation
//! modal, and a detail screen for editing one task, drawn with ratatui.

mod app;
mod detail;
mod event;
mod form;
mod list;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use crate::storage::Profile;
use app::App;
use event::EventHandler;

/// Launch the TUI on the profile's task store
pub fn run(profile: &Profile) -> Result<()> {
    let store = profile.task_store();
    let config = profile.config().clone();
    tracing::info!(
        dir = %profile.dir().display(),
        tasks = store.tasks().len(),
        "starting TUI"
    );

    let tick_rate_ms = config.tick_rate_ms;
    let mut app = App::new(store, config);

    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(tick_rate_ms);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
