use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Priority, Task};
use crate::output::{self, Format};
use crate::store::files::FileStore;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    /// Non-zero counts in display order.
    pub fn present(&self) -> Vec<(Priority, usize)> {
        Priority::DISPLAY_ORDER
            .into_iter()
            .map(|p| (p, self.get(p)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub done: usize,
    pub by_priority: PriorityCounts,
}

pub fn compute(tasks: &[Task]) -> Stats {
    let mut stats = Stats {
        total: tasks.len(),
        ..Stats::default()
    };
    for task in tasks {
        if task.is_done() {
            stats.done += 1;
        }
        stats.by_priority.bump(task.priority);
    }
    stats.pending = stats.total - stats.done;
    stats
}

pub fn render(stats: &Stats) -> String {
    let mut out = format!(
        "Total tasks:   {}\nPending:       {}\nCompleted:     {}\n",
        stats.total, stats.pending, stats.done
    );
    let present = stats.by_priority.present();
    if !present.is_empty() {
        out.push_str("\nBy priority:\n");
        for (priority, count) in present {
            out.push_str(&format!("  {priority:<10} {count}\n"));
        }
    }
    out
}

pub fn run(file: &Path, format: Format) -> Result<()> {
    let tasks = FileStore::new(file).load()?;
    let stats = compute(&tasks);

    match format {
        Format::Json => output::print_json(&stats)?,
        Format::Text => print!("{}", render(&stats)),
    }
    Ok(())
}
