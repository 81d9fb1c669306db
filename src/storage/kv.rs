//! Key-value storage backends
//!
//! The task list lives in a single slot under a fixed key. [`FileKv`] keeps
//! each key in `<dir>/<key>.json` and uses file locking plus temp-file +
//! rename so a reader never sees a half-written value. [`MemoryKv`] is the
//! in-process backend used by tests.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use fs2::FileExt;

/// A byte-valued key-value store
///
/// Values are raw bytes so content that is not valid text still reaches the
/// caller intact.
pub trait KeyValue {
    /// Reads the value for a key, `None` if it was never written
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the value for a key
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Directory-backed store, one file per key
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file that holds a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValue for FileKv {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        file.lock_shared()
            .with_context(|| format!("Failed to acquire read lock on {}", path.display()))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // Lock is released when file is dropped
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to acquire write lock on {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(value)
                .with_context(|| format!("Failed to write {}", temp_path.display()))?;
            writer.flush().context("Failed to flush value")?;
        }

        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// In-memory store
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// [`TaskStore`](super::TaskStore) wrote. Writes can be made to fail to
/// exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one value already present
    pub fn with_value(key: &str, value: impl AsRef<[u8]>) -> Self {
        let kv = Self::new();
        if let Ok(mut values) = kv.values.lock() {
            values.insert(key.to_string(), value.as_ref().to_vec());
        }
        kv
    }

    /// Makes every following `set` fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    fn writes_fail(&self) -> bool {
        self.fail_writes.lock().map(|flag| *flag).unwrap_or(false)
    }
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.writes_fail() {
            return Err(anyhow!("simulated write failure for key '{}'", key));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let kv = FileKv::new(dir.path());

        assert_eq!(kv.get("tasks").unwrap(), None);
    }

    #[test]
    fn file_set_and_get() {
        let dir = TempDir::new().unwrap();
        let mut kv = FileKv::new(dir.path());

        kv.set("tasks", b"[]").unwrap();
        assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(&b"[]"[..]));

        kv.set("tasks", b"[1]").unwrap();
        assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(&b"[1]"[..]));
    }

    #[test]
    fn file_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut kv = FileKv::new(dir.path().join("nested").join("dir"));

        kv.set("tasks", b"[]").unwrap();
        assert!(kv.path_for("tasks").exists());
    }

    #[test]
    fn file_atomic_write_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let mut kv = FileKv::new(dir.path());

        kv.set("tasks", b"[]").unwrap();

        let temp_path = kv.path_for("tasks").with_extension("json.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn file_returns_bytes_that_are_not_utf8() {
        let dir = TempDir::new().unwrap();
        let kv = FileKv::new(dir.path());
        fs::write(kv.path_for("tasks"), b"[\xff\xfe]").unwrap();

        assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(&b"[\xff\xfe]"[..]));
    }

    #[test]
    fn memory_clones_share_values() {
        let kv = MemoryKv::new();
        let mut writer = kv.clone();

        writer.set("tasks", b"[]").unwrap();
        assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn memory_simulated_write_failure() {
        let mut kv = MemoryKv::with_value("tasks", "[]");
        kv.set_fail_writes(true);

        assert!(kv.set("tasks", b"[1]").is_err());
        assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(&b"[]"[..]));

        kv.set_fail_writes(false);
        kv.set("tasks", b"[1]").unwrap();
    }
}
