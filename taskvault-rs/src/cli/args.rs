//! CLI argument definitions using clap.

use crate::query::RawFilter;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskvault")]
#[command(author, version, about = "Query Obsidian Tasks across a Markdown vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides environment and config)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Log filter implied by `-v`, if any.
    pub fn verbosity_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find tasks matching all given filters
    Query(QueryArgs),

    /// Summarize the tasks in the vault
    Stats(StatsArgs),

    /// Inspect or reset the task cache
    Cache(CacheArgs),
}

// === Query ===

#[derive(Parser, Debug, Default)]
pub struct QueryArgs {
    /// Status: open, completed or cancelled
    #[arg(long)]
    pub status: Option<String>,

    /// Priority: highest, high, medium, low, lowest or none
    #[arg(long)]
    pub priority: Option<String>,

    /// Due on this date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Open tasks due before today
    #[arg(long)]
    pub overdue: bool,

    /// Required tag, with or without '#' (repeatable for AND logic)
    #[arg(long)]
    pub tag: Vec<String>,

    /// Due on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_after: Option<String>,

    /// Due on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_before: Option<String>,

    /// Scheduled on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub scheduled_after: Option<String>,

    /// Scheduled on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub scheduled_before: Option<String>,

    /// Reference date for --overdue (YYYY-MM-DD, default: local today)
    #[arg(long)]
    pub today: Option<String>,

    /// Print a human-readable list instead of structured output
    #[arg(long)]
    pub plain: bool,

    /// With --plain, print the raw task line and its note
    #[arg(long, requires = "plain")]
    pub raw: bool,
}

impl QueryArgs {
    pub fn raw_filter(&self) -> RawFilter {
        RawFilter {
            status: self.status.clone(),
            priority: self.priority.clone(),
            due: self.due.clone(),
            overdue: self.overdue,
            due_after: self.due_after.clone(),
            due_before: self.due_before.clone(),
            scheduled_after: self.scheduled_after.clone(),
            scheduled_before: self.scheduled_before.clone(),
            tags: self.tag.clone(),
        }
    }
}

// === Stats ===

#[derive(Parser, Debug, Default)]
pub struct StatsArgs {
    /// Reference date for due-date buckets (YYYY-MM-DD, default: local today)
    #[arg(long)]
    pub today: Option<String>,
}

// === Cache ===

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Scan the vault and report cache statistics
    Status,

    /// Scan the vault, then drop every cache entry
    Clear,
}
