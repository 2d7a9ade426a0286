//! Parsers for Obsidian Tasks markdown syntax.

pub mod file;
pub mod grammar;
pub mod task;

pub use file::{parse_file, parse_tasks};
pub use grammar::DateField;
pub use task::{format_task, parse_task_line};
