//! Core types for taskvault.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Checkbox state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// `[ ]`
    Open,
    /// `[x]` or `[X]`
    Completed,
    /// `[-]`
    Cancelled,
}

impl TaskStatus {
    /// Status for the character between the checkbox brackets.
    pub fn from_checkbox(c: char) -> Option<Self> {
        match c {
            ' ' => Some(TaskStatus::Open),
            'x' | 'X' => Some(TaskStatus::Completed),
            '-' => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }

    /// The checkbox as written in Markdown, e.g. `[x]`.
    pub fn checkbox(self) -> &'static str {
        match self {
            TaskStatus::Open => "[ ]",
            TaskStatus::Completed => "[x]",
            TaskStatus::Cancelled => "[-]",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(TaskStatus::Open),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Highest,
    High,
    Medium,
    Low,
    Lowest,
    /// No priority marker on the line.
    #[default]
    None,
}

impl Priority {
    /// Every priority, highest first.
    pub const ALL: [Priority; 6] = [
        Priority::Highest,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Lowest,
        Priority::None,
    ];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Highest => write!(f, "highest"),
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
            Priority::Lowest => write!(f, "lowest"),
            Priority::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" => Ok(Priority::Highest),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "lowest" => Ok(Priority::Lowest),
            "none" => Ok(Priority::None),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// Location of a task in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskLocation {
    /// The file the task was read from, as handed to the parser.
    pub file: PathBuf,

    /// Line number (1-indexed).
    pub line: usize,
}

/// A task found in a note.
///
/// Equality covers provenance and content: two tasks with identical text on
/// different lines are different tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Location of the task in the vault.
    pub location: TaskLocation,

    /// The raw task line as it appears in the note.
    pub raw: String,

    pub status: TaskStatus,

    /// The task description (without recognised metadata).
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled: Option<NaiveDate>,

    /// Recurrence rule text, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,

    /// Block ID attached to this task (without `^`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,

    /// Block IDs this task is blocked by, in order of first appearance.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Tags without the leading `#`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Task {
    /// An open task with no metadata.
    pub fn new(location: TaskLocation, raw: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            location,
            raw: raw.into(),
            status: TaskStatus::Open,
            description: description.into(),
            priority: Priority::None,
            created: None,
            start: None,
            scheduled: None,
            due: None,
            done: None,
            cancelled: None,
            recurrence: None,
            block_id: None,
            depends_on: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Whether the task carries the exact tag (no hierarchy matching).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Open and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::Open && self.due.is_some_and(|due| due < today)
    }
}
