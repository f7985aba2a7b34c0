use std::path::Path;

use tracing::info;

use crate::error::{Result, TaskListError};
use crate::model::Task;
use crate::output::{self, Format};
use crate::store::files::FileStore;

/// Drop every task carrying `id`, returning the removed records.
/// On a miss `tasks` is left as it was.
pub fn remove(tasks: &mut Vec<Task>, id: u64) -> Result<Vec<Task>> {
    let (removed, kept): (Vec<Task>, Vec<Task>) =
        std::mem::take(tasks).into_iter().partition(|t| t.id == id);
    *tasks = kept;

    if removed.is_empty() {
        return Err(TaskListError::TaskNotFound(id));
    }
    Ok(removed)
}

pub fn run(file: &Path, id: u64, format: Format) -> Result<()> {
    let store = FileStore::new(file);
    let _lock = store.lock()?;
    let mut tasks = store.load()?;

    let removed = remove(&mut tasks, id)?;
    store.save(&tasks)?;
    info!(id, count = removed.len(), "task removed");

    match format {
        Format::Json => output::print_json(&removed)?,
        Format::Text => println!("Task #{id} removed."),
    }
    Ok(())
}
