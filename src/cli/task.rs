//! Task CLI commands

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chrono::{Local, Utc};
use clap::Subcommand;

use super::output::Output;
use crate::domain::due::parse_due;
use crate::domain::{CompletionFilter, NewTask, Priority, Task, TaskId, TaskQuery};
use crate::storage::{FileKv, LoadOutcome, Profile, TaskStore};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    ///
    /// Examples:
    ///   todo add "Buy milk"
    ///   todo add "Pay rent" -p high --due 2026-11-01
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(long, short)]
        description: Option<String>,

        /// Priority: low, medium or high (defaults to the configured priority)
        #[arg(long, short)]
        priority: Option<Priority>,

        /// Due date: YYYY-MM-DD, today, tomorrow or an RFC 3339 timestamp
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks (pending by default)
    List {
        /// Show completed tasks instead of pending ones
        #[arg(long, short)]
        completed: bool,

        /// Only tasks whose title contains this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show task details
    Show {
        /// Task ID
        id: TaskId,
    },

    /// Toggle a task between pending and completed
    Toggle {
        /// Task ID
        id: TaskId,
    },

    /// Edit fields of a task
    Edit {
        /// Task ID
        id: TaskId,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long, short)]
        description: Option<String>,

        /// New priority
        #[arg(long, short)]
        priority: Option<Priority>,

        /// New due date
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: TaskId,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show where data lives and how many tasks are in each bucket
    Status,
}

pub fn run(cmd: TaskCommands, profile: &Profile, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            title,
            description,
            priority,
            due,
        } => {
            let priority = priority.unwrap_or(profile.config().default_priority);
            add_task(profile, output, title, description, priority, due.as_deref())
        }
        TaskCommands::List { completed, search } => {
            let filter = if completed {
                CompletionFilter::Completed
            } else {
                CompletionFilter::Pending
            };
            list_tasks(profile, output, TaskQuery::new(filter, search.unwrap_or_default()))
        }
        TaskCommands::Show { id } => show_task(profile, output, &id),
        TaskCommands::Toggle { id } => toggle_task(profile, output, &id),
        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
        } => {
            let changes = TaskChanges {
                title,
                description,
                priority,
                due,
                clear_due,
            };
            edit_task(profile, output, &id, changes)
        }
        TaskCommands::Rm { id, yes } => remove_task(profile, output, &id, yes),
        TaskCommands::Status => status(profile, output),
    }
}

/// Opens the store and tells the user when its content could not be loaded
fn open_store(profile: &Profile, output: &Output) -> TaskStore<FileKv> {
    let store = profile.task_store();

    match store.load_outcome() {
        LoadOutcome::Corrupt(reason) => output.warn(&format!(
            "Stored task list is corrupt ({}); showing an empty list. \
             The next change keeps a copy in tasks.corrupt.json.",
            reason
        )),
        LoadOutcome::Unreadable(reason) => output.warn(&format!(
            "Stored task list could not be read ({}); showing an empty list.",
            reason
        )),
        LoadOutcome::Missing | LoadOutcome::Loaded(_) => {}
    }

    store
}

fn add_task(
    profile: &Profile,
    output: &Output,
    title: String,
    description: Option<String>,
    priority: Priority,
    due: Option<&str>,
) -> Result<()> {
    let mut store = open_store(profile, output);

    let mut input = NewTask::titled(title)
        .with_description(description.unwrap_or_default())
        .with_priority(priority);
    if let Some(due) = due {
        input = input.with_due_date(parse_due(due, Local::now())?);
    }

    let task = store.add(input)?;

    if output.is_json() {
        output.data(task);
    } else {
        output.success(&format!("Task added: {} - {}", task.id, task.title));
    }

    Ok(())
}

fn list_tasks(profile: &Profile, output: &Output, query: TaskQuery) -> Result<()> {
    let store = open_store(profile, output);
    let date_format = &profile.config().date_format;
    let counts = store.counts();
    let tasks = query.apply(store.tasks());

    if output.is_json() {
        output.data(&serde_json::json!({
            "filter": query.completion,
            "search": query.search,
            "counts": counts,
            "tasks": tasks,
        }));
        return Ok(());
    }

    println!(
        "Pending ({})  |  Completed ({})",
        counts.pending, counts.completed
    );
    println!();

    if tasks.is_empty() {
        println!("You have no {} tasks yet", query.completion.label().to_lowercase());
        println!("Create tasks and organize your to-do items");
        return Ok(());
    }

    let now = Utc::now();
    println!("{:<15} {:<7} {:<12} TITLE", "ID", "PRI", "DUE");
    println!("{}", "-".repeat(60));
    for task in tasks {
        let overdue = if task.is_overdue(now) { " (overdue)" } else { "" };
        let due = match task.due_date {
            Some(_) => task.due_label(date_format),
            None => "-".to_string(),
        };
        println!(
            "{:<15} {:<7} {:<12} {}{}",
            task.id, task.priority, due, task.title, overdue
        );
    }

    Ok(())
}

fn show_task(profile: &Profile, output: &Output, id: &TaskId) -> Result<()> {
    let store = open_store(profile, output);
    let Some(task) = store.get(id) else {
        bail!("Task not found: {}", id);
    };

    if output.is_json() {
        output.data(task);
        return Ok(());
    }

    print_task(task, &profile.config().date_format);
    Ok(())
}

fn print_task(task: &Task, date_format: &str) {
    let status = if task.completed { "completed" } else { "pending" };

    println!("Task: {}", task.id);
    println!("Title: {}", task.title);
    println!("Status: {}", status);
    println!("Priority: {}", task.priority);
    println!("Due: {}", task.due_label(date_format));

    if !task.description.is_empty() {
        println!();
        println!("Description:");
        println!("{}", task.description);
    }
}

fn toggle_task(profile: &Profile, output: &Output, id: &TaskId) -> Result<()> {
    let mut store = open_store(profile, output);
    let task = store.toggle_completed(id)?;

    if output.is_json() {
        output.data(task);
    } else if task.completed {
        output.success(&format!("Task completed: {}", task.title));
    } else {
        output.success(&format!("Task reopened: {}", task.title));
    }

    Ok(())
}

/// Field edits requested on the command line
struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    due: Option<String>,
    clear_due: bool,
}

impl TaskChanges {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && !self.clear_due
    }
}

fn edit_task(profile: &Profile, output: &Output, id: &TaskId, changes: TaskChanges) -> Result<()> {
    if changes.is_empty() {
        bail!("Nothing to change; pass --title, --description, --priority, --due or --clear-due");
    }

    let mut store = open_store(profile, output);
    let Some(mut task) = store.get(id).cloned() else {
        bail!("Task not found: {}", id);
    };

    if let Some(title) = changes.title {
        task.title = title;
    }
    if let Some(description) = changes.description {
        task.description = description;
    }
    if let Some(priority) = changes.priority {
        task.priority = priority;
    }
    if let Some(due) = changes.due.as_deref() {
        let due = parse_due(due, Local::now())?;
        if due < Utc::now() {
            output.warn("The new due date is in the past");
        }
        task.due_date = Some(due);
    }
    if changes.clear_due {
        task.due_date = None;
    }

    store.replace(task.clone())?;

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!("Task updated: {} - {}", task.id, task.title));
    }

    Ok(())
}

fn remove_task(profile: &Profile, output: &Output, id: &TaskId, yes: bool) -> Result<()> {
    let mut store = open_store(profile, output);
    let Some(task) = store.get(id) else {
        bail!("Task not found: {}", id);
    };

    if profile.config().confirm_delete && !yes {
        let question = format!("Delete task '{}'? This cannot be undone. [y/N] ", task.title);
        if !confirm(&question)? {
            output.success("Deletion cancelled");
            return Ok(());
        }
    }

    match store.remove(id)? {
        Some(removed) if output.is_json() => output.data(&removed),
        Some(removed) => output.success(&format!("Task deleted: {}", removed.title)),
        None => bail!("Task not found: {}", id),
    }

    Ok(())
}

/// Asks a yes/no question on stdin; anything but y/yes is a no
fn confirm(question: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", question)?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn status(profile: &Profile, output: &Output) -> Result<()> {
    let store = open_store(profile, output);
    let counts = store.counts();
    let state = match store.load_outcome() {
        LoadOutcome::Missing => "empty".to_string(),
        LoadOutcome::Loaded(_) => "ok".to_string(),
        LoadOutcome::Corrupt(reason) => format!("corrupt: {}", reason),
        LoadOutcome::Unreadable(reason) => format!("unreadable: {}", reason),
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "data_dir": profile.dir().display().to_string(),
            "storage": state,
            "counts": counts,
        }));
    } else {
        println!("Data directory: {}", profile.dir().display());
        println!("Storage: {}", state);
        println!("Pending: {}", counts.pending);
        println!("Completed: {}", counts.completed);
    }

    Ok(())
}
