use std::path::Path;

use crate::error::Result;
use crate::model::{Priority, Status, Task};
use crate::output::{self, Format};
use crate::store::files::FileStore;

/// Tasks matching every given filter, in store order.
pub fn filter(tasks: &[Task], status: Option<Status>, priority: Option<Priority>) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .filter(|t| priority.is_none_or(|p| t.priority == p))
        .collect()
}

pub fn run(
    file: &Path,
    status: Option<Status>,
    priority: Option<Priority>,
    format: Format,
) -> Result<()> {
    let tasks = FileStore::new(file).load()?;
    let matched = filter(&tasks, status, priority);

    match format {
        Format::Json => output::print_json(&matched)?,
        Format::Text if tasks.is_empty() => output::print_notice("No tasks found."),
        Format::Text if matched.is_empty() => {
            output::print_notice("No tasks match the given filters.")
        }
        Format::Text => output::print_tasks(&matched, format)?,
    }
    Ok(())
}
