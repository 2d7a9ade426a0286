//! Task query command.

use crate::cli::args::QueryArgs;
use crate::cli::output::Output;
use crate::cli::reference_date;
use crate::error::{ExitCode, Result};
use crate::query::{TaskFilter, query_tasks};
use crate::types::Task;
use crate::vault::Vault;
use serde::Serialize;
use std::path::Path;

/// Structured output of the query command.
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// Validate the filter, scan the vault and print the matching tasks.
pub fn run(vault: &Vault, args: &QueryArgs, output: &Output) -> Result<ExitCode> {
    // Reject bad filter input before any note is read.
    let today = reference_date(args.today.as_deref())?;
    let filter = TaskFilter::from_raw(&args.raw_filter(), today)?;

    let tasks = query_tasks(vault.get_all_tasks()?, &filter);
    tracing::debug!(matches = tasks.len(), "query finished");

    if args.plain {
        output.print_raw(&render_plain(&tasks, &vault.root, args.raw));
    } else {
        output.print(&QueryOutput {
            count: tasks.len(),
            tasks,
        })?;
    }

    Ok(ExitCode::Success)
}

/// Human-readable listing: a count line, then one bullet per task.
pub fn render_plain(tasks: &[Task], root: &Path, raw: bool) -> String {
    let mut lines = vec![format!("Found {} tasks matching your query.", tasks.len())];
    for task in tasks {
        if raw {
            let file = task
                .location
                .file
                .strip_prefix(root)
                .unwrap_or(&task.location.file);
            lines.push(format!("- {} (in {})", task.raw, file.display()));
        } else {
            lines.push(format!("- {}", task.description));
        }
    }
    lines.join("\n")
}
