//! Parsing every task out of a note.

use crate::error::{Result, TaskError};
use crate::parser::task::parse_task_line;
use crate::types::Task;
use std::fs;
use std::path::Path;

/// Parse all tasks from content, in line order.
///
/// Line numbers are 1-indexed and every task records `file_path` as its
/// source.
pub fn parse_tasks(content: &str, file_path: &Path) -> Vec<Task> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_task_line(line, file_path, idx + 1))
        .collect()
}

/// Read a note from disk and parse its tasks.
///
/// Read failures (missing file, permissions, invalid UTF-8) are returned as
/// [`TaskError::Io`] carrying the path.
pub fn parse_file(path: &Path) -> Result<Vec<Task>> {
    let content = fs::read_to_string(path).map_err(|e| TaskError::io(path, e))?;
    let tasks = parse_tasks(&content, path);
    tracing::trace!(path = %path.display(), count = tasks.len(), "parsed note");
    Ok(tasks)
}
