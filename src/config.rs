use std::path::PathBuf;

/// Task file used when neither `--file` nor `TASKLIST_FILE` is given.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Environment variable naming the task file.
pub const FILE_ENV: &str = "TASKLIST_FILE";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "TASKLIST_LOG";

/// Filter applied when `TASKLIST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "error";

/// Task file from the environment. Empty values count as unset.
pub fn file_from_env() -> Option<PathBuf> {
    std::env::var_os(FILE_ENV)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Resolve the task file: explicit flag, then `TASKLIST_FILE`, then `tasks.json`.
pub fn resolve_file(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(file_from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE))
}
