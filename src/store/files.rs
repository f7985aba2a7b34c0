use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TaskListError};
use crate::model::Task;
use crate::store::lock;

/// A task list persisted as a single JSON array file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        with_suffix(&self.path, ".lock")
    }

    /// Take the exclusive writer lock for a load-mutate-save cycle.
    pub fn lock(&self) -> Result<File> {
        lock::acquire_lock(&self.lock_path())
    }

    /// Read every task in file order.
    ///
    /// A missing, empty, unparsable or non-array file reads as an empty list.
    /// Only an array element that is not a task is an error, so that a later
    /// save cannot silently discard it. `created_at` and unknown keys are
    /// taken as they are.
    pub fn load(&self) -> Result<Vec<Task>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(file = %self.path.display(), "task file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                warn!(file = %self.path.display(), error = %err, "unreadable task file, starting empty");
                return Ok(Vec::new());
            }
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(err) => {
                warn!(file = %self.path.display(), error = %err, "task file is not valid json, starting empty");
                return Ok(Vec::new());
            }
        };

        let Value::Array(items) = value else {
            warn!(file = %self.path.display(), "task file is not a json array, starting empty");
            return Ok(Vec::new());
        };

        let tasks = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|source| TaskListError::MalformedTask { index, source })
            })
            .collect::<Result<Vec<Task>>>()?;
        debug!(file = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Replace the file contents with `tasks`.
    ///
    /// Writes a temp file next to the real target and renames it into place
    /// so readers never see a half-written list. A symlinked task file keeps
    /// its link, and an existing file keeps its permissions.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let mut json = serde_json::to_string_pretty(tasks)?;
        json.push('\n');

        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let tmp_path = with_suffix(&target, ".tmp");
        let written = fs::write(&tmp_path, json).and_then(|()| {
            if let Ok(meta) = fs::metadata(&target) {
                fs::set_permissions(&tmp_path, meta.permissions())?;
            }
            fs::rename(&tmp_path, &target)
        });
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        debug!(file = %target.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("tasks"));
    name.push(suffix);
    path.with_file_name(name)
}

/// Next id to assign: one past the largest id present, or 1 for an empty list.
pub fn next_id(tasks: &[Task]) -> Result<u64> {
    match tasks.iter().map(|t| t.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(TaskListError::IdExhausted(max)),
    }
}
