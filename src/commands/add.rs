use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::model::{Priority, Task};
use crate::output::{self, Format};
use crate::store::files::{self, FileStore};

/// Append a new pending task with the next free id and return a copy of it.
pub fn append(tasks: &mut Vec<Task>, description: String, priority: Priority) -> Result<Task> {
    let task = Task::new(files::next_id(tasks)?, description, priority);
    tasks.push(task.clone());
    Ok(task)
}

pub fn run(file: &Path, description: String, priority: Priority, format: Format) -> Result<()> {
    let store = FileStore::new(file);
    let _lock = store.lock()?;
    let mut tasks = store.load()?;

    let task = append(&mut tasks, description, priority)?;
    store.save(&tasks)?;
    info!(id = task.id, "task added");

    match format {
        Format::Json => output::print_json(&task)?,
        Format::Text => println!(
            "Task #{} added: {} [{}]",
            task.id, task.description, task.priority
        ),
    }
    Ok(())
}
