//! Profile management
//!
//! A profile is the data directory holding one user's task list and
//! configuration. It is created on first use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use thiserror::Error;

use super::{Config, FileKv, TaskStore};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Could not determine a data directory; pass --data-dir or set POCKET_TODO_DIR")]
    NoDataDir,

    #[error("Data directory path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Name of the log file written by the terminal UI
pub const LOG_FILE: &str = "todo.log";

/// An opened data directory
pub struct Profile {
    dir: PathBuf,
    config: Config,
}

impl Profile {
    /// Returns the platform default data directory
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "pocket-todo", "pocket-todo")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Resolves an explicit directory or falls back to the platform default
    pub fn resolve_dir(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Self::default_dir().ok_or_else(|| ProfileError::NoDataDir.into()),
        }
    }

    /// Opens the profile at `dir`, creating it and its default config if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if dir.exists() && !dir.is_dir() {
            return Err(ProfileError::NotADirectory(dir).into());
        }

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

        if Config::write_default(&dir)? {
            tracing::debug!(dir = %dir.display(), "wrote default config");
        }

        let config = Config::load(&dir)?;

        Ok(Self { dir, config })
    }

    /// Returns the data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the path of the terminal UI log file
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    /// Opens the task store for this profile
    pub fn task_store(&self) -> TaskStore<FileKv> {
        TaskStore::open(FileKv::new(&self.dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use tempfile::TempDir;

    #[test]
    fn open_creates_directory_and_config() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("todo");

        let profile = Profile::open(&data_dir).unwrap();

        assert!(profile.dir().is_dir());
        assert!(data_dir.join("config.toml").is_file());
        assert_eq!(profile.config(), &Config::default());
    }

    #[test]
    fn open_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Profile::open(dir.path()).unwrap();
        Profile::open(dir.path()).unwrap();

        assert!(dir.path().join("config.toml").is_file());
    }

    #[test]
    fn open_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "confirm_delete = false\n").unwrap();

        let profile = Profile::open(dir.path()).unwrap();
        assert!(!profile.config().confirm_delete);
    }

    #[test]
    fn open_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        assert!(Profile::open(&file).is_err());
    }

    #[test]
    fn task_store_lives_in_profile() {
        let dir = TempDir::new().unwrap();
        let profile = Profile::open(dir.path()).unwrap();

        let mut store = profile.task_store();
        store.add(NewTask::titled("Water plants")).unwrap();

        assert!(dir.path().join("tasks.json").is_file());
        assert_eq!(profile.task_store().tasks().len(), 1);
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        let resolved = Profile::resolve_dir(Some(dir.path())).unwrap();
        assert_eq!(resolved, dir.path());
    }
}
