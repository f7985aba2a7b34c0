use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskListError {
    #[error("task #{0} not found")]
    TaskNotFound(u64),

    #[error("no task id left after {0}")]
    IdExhausted(u64),

    #[error("malformed task record at index {index}: {source}")]
    MalformedTask {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskListError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNotFound(_) => "task_not_found",
            Self::IdExhausted(_) => "id_exhausted",
            Self::MalformedTask { .. } => "malformed_task",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskListError>;
