//! Task filtering.

use crate::error::{Result, TaskError};
use crate::parser::grammar::parse_date_token;
use crate::types::{Priority, Task, TaskStatus};
use chrono::NaiveDate;

/// Filter options for task queries.
///
/// Every set field is a constraint and all constraints must hold. An unset
/// field never excludes anything, so `TaskFilter::default()` matches every
/// task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    /// Due exactly on this date.
    pub due_on: Option<NaiveDate>,
    /// Open and due strictly before this reference date.
    pub overdue_as_of: Option<NaiveDate>,
    /// Due on or after this date.
    pub due_after: Option<NaiveDate>,
    /// Due on or before this date.
    pub due_before: Option<NaiveDate>,
    /// Scheduled on or after this date.
    pub scheduled_after: Option<NaiveDate>,
    /// Scheduled on or before this date.
    pub scheduled_before: Option<NaiveDate>,
    /// Exact tags (without `#`) the task must all carry.
    pub tags: Vec<String>,
}

/// Unvalidated filter input as it arrives from the CLI or another adapter.
#[derive(Debug, Clone, Default)]
pub struct RawFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub overdue: bool,
    pub due_after: Option<String>,
    pub due_before: Option<String>,
    pub scheduled_after: Option<String>,
    pub scheduled_before: Option<String>,
    pub tags: Vec<String>,
}

fn parse_filter_date(flag: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|v| {
            parse_date_token(v.trim()).ok_or_else(|| {
                TaskError::InvalidQuery(format!("{} expects YYYY-MM-DD, got '{}'", flag, v))
            })
        })
        .transpose()
}

impl TaskFilter {
    /// Validate raw filter input.
    ///
    /// `today` is the reference date for the overdue filter. Unknown status
    /// or priority names and malformed dates are rejected here, before any
    /// note is read.
    pub fn from_raw(raw: &RawFilter, today: NaiveDate) -> Result<Self> {
        let status = raw
            .status
            .as_deref()
            .map(|s| s.parse::<TaskStatus>().map_err(TaskError::InvalidQuery))
            .transpose()?;

        let priority = raw
            .priority
            .as_deref()
            .map(|p| p.parse::<Priority>().map_err(TaskError::InvalidQuery))
            .transpose()?;

        let tags = raw
            .tags
            .iter()
            .map(|tag| {
                let name = tag.trim().trim_start_matches('#');
                if name.is_empty() {
                    Err(TaskError::InvalidQuery(format!("Invalid tag: '{}'", tag)))
                } else {
                    Ok(name.to_string())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TaskFilter {
            status,
            priority,
            due_on: parse_filter_date("--due", raw.due.as_deref())?,
            overdue_as_of: raw.overdue.then_some(today),
            due_after: parse_filter_date("--due-after", raw.due_after.as_deref())?,
            due_before: parse_filter_date("--due-before", raw.due_before.as_deref())?,
            scheduled_after: parse_filter_date("--scheduled-after", raw.scheduled_after.as_deref())?,
            scheduled_before: parse_filter_date("--scheduled-before", raw.scheduled_before.as_deref())?,
            tags,
        })
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == TaskFilter::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }

        if let Some(on) = self.due_on {
            if task.due != Some(on) {
                return false;
            }
        }

        if let Some(today) = self.overdue_as_of {
            if !task.is_overdue(today) {
                return false;
            }
        }

        if !in_range(task.due, self.due_after, self.due_before) {
            return false;
        }

        if !in_range(task.scheduled, self.scheduled_after, self.scheduled_before) {
            return false;
        }

        self.tags.iter().all(|tag| task.has_tag(tag))
    }
}

/// Inclusive bounds; a missing date fails any bound that is set.
fn in_range(date: Option<NaiveDate>, after: Option<NaiveDate>, before: Option<NaiveDate>) -> bool {
    if after.is_none() && before.is_none() {
        return true;
    }
    let Some(date) = date else {
        return false;
    };
    after.is_none_or(|a| date >= a) && before.is_none_or(|b| date <= b)
}

/// Keep the tasks matching `filter`, in their original order.
pub fn query_tasks(tasks: Vec<Task>, filter: &TaskFilter) -> Vec<Task> {
    if filter.is_empty() {
        return tasks;
    }
    tasks.into_iter().filter(|t| filter.matches(t)).collect()
}
