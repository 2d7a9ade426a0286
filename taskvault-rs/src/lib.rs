//! Taskvault - query Obsidian Tasks-style task lines across a Markdown vault.
//!
//! # Overview
//!
//! Taskvault extracts structured task records from checkbox list items that
//! follow the Obsidian Tasks emoji convention:
//! - Status from the checkbox (`[ ]`, `[x]`, `[-]`)
//! - Priority markers (🔺 ⏫ 🔼 🔽 ⏬)
//! - Typed dates (➕ 🛫 ⏳ 📅 ❌ ✅) in `YYYY-MM-DD` form
//! - Tags, block IDs, `⛔` dependencies and `🔁` recurrence text
//!
//! Parsed notes are cached by modification time, so repeated scans of an
//! unchanged vault do not touch the parser.
//!
//! # Example
//!
//! ```no_run
//! use taskvault::{Config, TaskFilter, TaskStatus, Vault, query_tasks};
//!
//! let vault = Vault::new("/path/to/vault", Config::default()).unwrap();
//! let tasks = vault.get_all_tasks().unwrap();
//!
//! let filter = TaskFilter {
//!     status: Some(TaskStatus::Open),
//!     tags: vec!["work".to_string()],
//!     ..Default::default()
//! };
//! for task in query_tasks(tasks, &filter) {
//!     println!("{}", task.description);
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod query;
pub mod stats;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use cache::{CacheStats, TaskCache};
pub use config::Config;
pub use error::{Result, TaskError};
pub use parser::{format_task, parse_file, parse_task_line, parse_tasks};
pub use query::{RawFilter, TaskFilter, query_tasks};
pub use stats::TaskStatistics;
pub use types::*;
pub use vault::Vault;
