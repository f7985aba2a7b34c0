use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use tracing::debug;

use crate::build_info;
use crate::config;
use crate::error::{Result, TaskListError};
use crate::logging;
use crate::model::{Priority, Status};
use crate::output::Format;

#[derive(Debug, Parser)]
#[command(
    name = "tasklist",
    version,
    about = "Task manager backed by a single JSON file",
    after_help = "Run 'tasklist COMMAND --help' for more information on a command."
)]
struct Cli {
    /// Path to the tasks JSON file [default: $TASKLIST_FILE or tasks.json]
    #[arg(long, short = 'f', global = true)]
    file: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: Format,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task description
        #[arg(value_parser = parse_description)]
        description: String,
        /// Task priority
        #[arg(long, short, value_enum, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks
    List {
        /// Filter by status
        #[arg(long, short, value_enum)]
        status: Option<Status>,
        /// Filter by priority
        #[arg(long, short, value_enum)]
        priority: Option<Priority>,
    },
    /// Mark a task as done
    Done {
        /// ID of the task to complete
        task_id: u64,
    },
    /// Remove a task
    Remove {
        /// ID of the task to remove
        task_id: u64,
    },
    /// Show task statistics
    Stats,
}

fn parse_description(raw: &str) -> std::result::Result<String, String> {
    if raw.is_empty() {
        Err("description must not be empty".into())
    } else {
        Ok(raw.to_string())
    }
}

/// Derived parser with `-v` taking over clap's default `-V` version flag.
fn build_command() -> clap::Command {
    Cli::command().disable_version_flag(true).arg(
        Arg::new("version")
            .long("version")
            .short('v')
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

fn parse_from<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}

fn dispatch(command: Commands, file: &Path, format: Format) -> Result<()> {
    match command {
        Commands::Add {
            description,
            priority,
        } => crate::commands::add::run(file, description, priority, format),
        Commands::List { status, priority } => {
            crate::commands::list::run(file, status, priority, format)
        }
        Commands::Done { task_id } => crate::commands::done::run(file, task_id, format),
        Commands::Remove { task_id } => crate::commands::remove::run(file, task_id, format),
        Commands::Stats => crate::commands::stats::run(file, format),
    }
}

fn report_error(err: &TaskListError, format: Format) {
    match format {
        Format::Json => {
            eprintln!(
                "{}",
                serde_json::json!({
                    "error": err.code(),
                    "message": err.to_string()
                })
            );
        }
        Format::Text => eprintln!("error: {err}"),
    }
}

/// Run with the process arguments and return the exit code.
pub fn run_cli() -> i32 {
    run_from(std::env::args_os())
}

/// Run with an explicit argument vector (first element is the program name).
///
/// Returns 0 on success and for `--help`, `--version` or a bare invocation,
/// 1 when a command fails, and clap's usage code for malformed arguments.
pub fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    logging::init();
    debug!(build = %build_info::describe(), "starting");

    let Some(command) = cli.command else {
        let _ = build_command().print_help();
        println!();
        return 0;
    };

    let file = config::resolve_file(cli.file);
    debug!(file = %file.display(), "resolved task file");

    match dispatch(command, &file, cli.format) {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err, cli.format);
            1
        }
    }
}
