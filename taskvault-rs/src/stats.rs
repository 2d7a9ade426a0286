//! Aggregate statistics over a task collection.

use crate::types::{Priority, Task, TaskStatus};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Number of tags listed in [`TaskStatistics::top_tags`].
const TOP_TAGS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// How due dates fall relative to the reference date.
///
/// Every task lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DueDistribution {
    /// Due before today (any status).
    pub past: usize,
    pub today: usize,
    /// Due in the next 1 to 7 days.
    pub this_week: usize,
    /// Due in the next 8 to 30 days.
    pub this_month: usize,
    /// Due more than 30 days out.
    pub future: usize,
    /// No due date.
    pub none: usize,
}

/// Task statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    pub by_tag: BTreeMap<String, usize>,
    pub top_tags: Vec<TagCount>,
    /// Open tasks due before today.
    pub overdue: usize,
    /// Open tasks due today.
    pub due_today: usize,
    /// Open tasks due within the next 7 days, today included.
    pub due_this_week: usize,
    /// Open tasks due within the next 30 days, today included.
    pub due_this_month: usize,
    pub with_dependencies: usize,
    pub with_recurrence: usize,
    pub files_with_tasks: usize,
    pub due_distribution: DueDistribution,
}

impl TaskStatistics {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let week_end = today + Duration::days(7);
        let month_end = today + Duration::days(30);

        let mut by_status: BTreeMap<String, usize> = [
            TaskStatus::Open,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ]
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
        let mut by_priority: BTreeMap<String, usize> =
            Priority::ALL.iter().map(|p| (p.to_string(), 0)).collect();
        let mut by_tag: BTreeMap<String, usize> = BTreeMap::new();
        let mut files = HashSet::new();
        let mut distribution = DueDistribution::default();

        let mut overdue = 0;
        let mut due_today = 0;
        let mut due_this_week = 0;
        let mut due_this_month = 0;
        let mut with_dependencies = 0;
        let mut with_recurrence = 0;

        for task in tasks {
            *by_status.entry(task.status.to_string()).or_insert(0) += 1;
            *by_priority.entry(task.priority.to_string()).or_insert(0) += 1;
            for tag in &task.tags {
                *by_tag.entry(tag.clone()).or_insert(0) += 1;
            }
            files.insert(task.location.file.as_path());

            if !task.depends_on.is_empty() {
                with_dependencies += 1;
            }
            if task.recurrence.is_some() {
                with_recurrence += 1;
            }

            let Some(due) = task.due else {
                distribution.none += 1;
                continue;
            };

            if due < today {
                distribution.past += 1;
            } else if due == today {
                distribution.today += 1;
            } else if due <= week_end {
                distribution.this_week += 1;
            } else if due <= month_end {
                distribution.this_month += 1;
            } else {
                distribution.future += 1;
            }

            if task.status != TaskStatus::Open {
                continue;
            }
            if due < today {
                overdue += 1;
                continue;
            }
            if due == today {
                due_today += 1;
            }
            if due <= week_end {
                due_this_week += 1;
            }
            if due <= month_end {
                due_this_month += 1;
            }
        }

        let mut top_tags: Vec<TagCount> = by_tag
            .iter()
            .map(|(tag, count)| TagCount {
                tag: tag.clone(),
                count: *count,
            })
            .collect();
        // Stable sort keeps ties in alphabetical order.
        top_tags.sort_by(|a, b| b.count.cmp(&a.count));
        top_tags.truncate(TOP_TAGS);

        TaskStatistics {
            total: tasks.len(),
            by_status,
            by_priority,
            by_tag,
            top_tags,
            overdue,
            due_today,
            due_this_week,
            due_this_month,
            with_dependencies,
            with_recurrence,
            files_with_tasks: files.len(),
            due_distribution: distribution,
        }
    }
}
