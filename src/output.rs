use crate::error::Result;
use crate::model::Task;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub const TABLE_RULE_WIDTH: usize = 50;

pub fn status_marker(task: &Task) -> &'static str {
    if task.is_done() { "[x]" } else { "[ ]" }
}

pub fn table_header() -> String {
    format!("{:<5} {:<10} {:<10} {}", "ID", "Status", "Priority", "Description")
}

pub fn format_row(task: &Task) -> String {
    format!(
        "{:<5} {:<10} {:<10} {}",
        task.id,
        status_marker(task),
        task.priority,
        task.description
    )
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Informational line for empty results.
pub fn print_notice(message: &str) {
    println!("{}", message.dimmed());
}

pub fn print_tasks(tasks: &[&Task], format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(tasks)?,
        Format::Text => {
            println!("{}", table_header());
            println!("{}", "-".repeat(TABLE_RULE_WIDTH));
            for task in tasks {
                let row = format_row(task);
                if task.is_done() {
                    println!("{}", row.dimmed());
                } else {
                    println!("{row}");
                }
            }
        }
    }
    Ok(())
}
