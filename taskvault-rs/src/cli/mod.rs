//! CLI command implementations.

pub mod args;
pub mod output;

pub mod cache;
pub mod query;
pub mod stats;

pub use args::{Cli, Commands};
pub use output::Output;

use crate::error::{Result, TaskError};
use crate::parser::grammar::parse_date_token;
use chrono::{Local, NaiveDate};

/// The `--today` override, or the local date.
pub fn reference_date(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(value) => parse_date_token(value.trim()).ok_or_else(|| {
            TaskError::InvalidQuery(format!("--today expects YYYY-MM-DD, got '{}'", value))
        }),
        None => Ok(Local::now().date_naive()),
    }
}
