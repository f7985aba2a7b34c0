use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Done,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Order used when reporting per-priority counts.
    pub const DISPLAY_ORDER: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    /// Creation time as written; kept verbatim, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Keys this tool does not know about, carried through saves untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

// `pad` so that width specifiers in table output apply.
impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Task {
    /// A fresh pending task stamped with the current time.
    pub fn new(id: u64, description: String, priority: Priority) -> Self {
        Self {
            id,
            description,
            priority,
            status: Status::Pending,
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)),
            extra: Map::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }
}
