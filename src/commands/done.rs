use std::path::Path;

use tracing::info;

use crate::error::{Result, TaskListError};
use crate::model::{Status, Task};
use crate::output::{self, Format};
use crate::store::files::FileStore;

/// Mark the first task with `id` as done. Already-done tasks stay done.
pub fn mark_done(tasks: &mut [Task], id: u64) -> Result<Task> {
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TaskListError::TaskNotFound(id))?;
    task.status = Status::Done;
    Ok(task.clone())
}

pub fn run(file: &Path, id: u64, format: Format) -> Result<()> {
    let store = FileStore::new(file);
    let _lock = store.lock()?;
    let mut tasks = store.load()?;

    let task = mark_done(&mut tasks, id)?;
    store.save(&tasks)?;
    info!(id, "task marked done");

    match format {
        Format::Json => output::print_json(&task)?,
        Format::Text => println!("Task #{id} marked as done."),
    }
    Ok(())
}
