//! Obsidian Tasks metadata symbols and the literal date format.

use crate::types::Priority;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Date format used by every date-valued field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Recurrence marker; its payload is free text.
pub const RECURRENCE_SYMBOL: &str = "🔁";

/// Dependency marker; its payload is one or more `^id` references.
pub const DEPENDENCY_SYMBOL: &str = "⛔";

/// Tag prefix.
pub const TAG_PREFIX: char = '#';

/// Block ID prefix.
pub const BLOCK_ID_PREFIX: char = '^';

/// Priority symbols, highest first.
pub const PRIORITY_SYMBOLS: [(&str, Priority); 5] = [
    ("🔺", Priority::Highest),
    ("⏫", Priority::High),
    ("🔼", Priority::Medium),
    ("🔽", Priority::Low),
    ("⏬", Priority::Lowest),
];

/// The date-valued fields of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Created,
    Start,
    Scheduled,
    Due,
    Cancelled,
    Done,
}

/// Date symbols in the order they are rendered.
pub const DATE_SYMBOLS: [(&str, DateField); 6] = [
    ("➕", DateField::Created),
    ("🛫", DateField::Start),
    ("⏳", DateField::Scheduled),
    ("📅", DateField::Due),
    ("❌", DateField::Cancelled),
    ("✅", DateField::Done),
];

static DATE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()
});

/// Drop a trailing emoji presentation selector (U+FE0F), which some editors
/// append to symbols such as ⛔.
pub fn normalize_symbol(token: &str) -> &str {
    token.trim_end_matches('\u{FE0F}')
}

/// Priority for a priority symbol.
pub fn priority_for_symbol(token: &str) -> Option<Priority> {
    let token = normalize_symbol(token);
    PRIORITY_SYMBOLS
        .iter()
        .find(|(symbol, _)| *symbol == token)
        .map(|(_, priority)| *priority)
}

/// Symbol for a priority, `None` for [`Priority::None`].
pub fn symbol_for_priority(priority: Priority) -> Option<&'static str> {
    PRIORITY_SYMBOLS
        .iter()
        .find(|(_, p)| *p == priority)
        .map(|(symbol, _)| *symbol)
}

/// Date field introduced by a date symbol.
pub fn date_field_for_symbol(token: &str) -> Option<DateField> {
    let token = normalize_symbol(token);
    DATE_SYMBOLS
        .iter()
        .find(|(symbol, _)| *symbol == token)
        .map(|(_, field)| *field)
}

/// Whether a whole token is one of the reverse-pass markers.
pub fn is_metadata_symbol(token: &str) -> bool {
    is_recurrence_symbol(token)
        || is_dependency_symbol(token)
        || priority_for_symbol(token).is_some()
        || date_field_for_symbol(token).is_some()
}

pub fn is_recurrence_symbol(token: &str) -> bool {
    normalize_symbol(token) == RECURRENCE_SYMBOL
}

pub fn is_dependency_symbol(token: &str) -> bool {
    normalize_symbol(token) == DEPENDENCY_SYMBOL
}

/// Parse a strict `YYYY-MM-DD` token into a calendar date.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    if !DATE_TOKEN.is_match(token) {
        return None;
    }
    NaiveDate::parse_from_str(token, DATE_FORMAT).ok()
}

/// Format a date the way it is written in task lines.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
