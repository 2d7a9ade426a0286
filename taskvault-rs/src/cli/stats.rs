//! Task statistics command.

use crate::cli::args::StatsArgs;
use crate::cli::output::Output;
use crate::cli::reference_date;
use crate::error::{ExitCode, Result};
use crate::stats::TaskStatistics;
use crate::vault::Vault;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub vault_path: PathBuf,
    pub note_count: usize,
    pub today: NaiveDate,
    #[serde(flatten)]
    pub stats: TaskStatistics,
}

pub fn run(vault: &Vault, args: &StatsArgs, output: &Output) -> Result<ExitCode> {
    let today = reference_date(args.today.as_deref())?;
    let note_count = vault.list_notes()?.len();
    let tasks = vault.get_all_tasks()?;

    output.print(&StatsOutput {
        vault_path: vault.root.clone(),
        note_count,
        today,
        stats: TaskStatistics::compute(&tasks, today),
    })?;
    Ok(ExitCode::Success)
}
