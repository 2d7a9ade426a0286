//! Task line parsing with Obsidian Tasks emoji metadata.
//!
//! A task line is split into whitespace-separated tokens and metadata is
//! stripped in two passes:
//!
//! 1. a forward pass for tags, the task's own block ID and the `⛔` dependency
//!    references, which may appear anywhere in the line;
//! 2. a reverse pass for priority, dates and recurrence, each recognised by
//!    its own marker wherever it appears; the rightmost occurrence wins.
//!
//! Whatever is not consumed by either pass is the description. Malformed
//! metadata is never an error: it simply stays in the description.

use crate::parser::grammar::{
    self, DateField, date_field_for_symbol, is_dependency_symbol, is_metadata_symbol,
    is_recurrence_symbol, parse_date_token, priority_for_symbol,
};
use crate::types::{Priority, Task, TaskLocation, TaskStatus};
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

/// Regex for task lines.
/// Matches: optional indent, a list bullet, "[symbol]", then the rest.
static TASK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[-*+]\s+\[(.)\](?:\s+(.*))?$").unwrap()
});

/// A tag token, optionally followed by a single trailing punctuation mark.
static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([\w/-]+)[,.]?$").unwrap()
});

/// A block ID reference token, optionally followed by trailing punctuation.
static BLOCK_ID_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\^([A-Za-z0-9_-]+)[,.]?$").unwrap()
});

/// Wikilinks, embeds and Markdown links. Tags inside these are not tags.
static LINK_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[\[[^\]]*\]\]|\[[^\]]*\]\([^)]*\)").unwrap()
});

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

#[derive(Debug)]
struct Token<'a> {
    text: &'a str,
    in_link: bool,
    consumed: bool,
}

impl Token<'_> {
    fn is_live(&self) -> bool {
        !self.consumed && !self.in_link
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let links: Vec<Range<usize>> = LINK_SPAN.find_iter(text).map(|m| m.range()).collect();

    TOKEN
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            in_link: links
                .iter()
                .any(|link| m.start() < link.end && link.start < m.end()),
            consumed: false,
        })
        .collect()
}

fn tag_name(token: &str) -> Option<&str> {
    TAG_TOKEN
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn block_id_name(token: &str) -> Option<&str> {
    BLOCK_ID_TOKEN
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a single line into a task.
///
/// Returns `None` when the line is not a checkbox list item or the checkbox
/// holds an unknown status character.
pub fn parse_task_line(line: &str, file_path: &Path, line_num: usize) -> Option<Task> {
    let line = line.trim_end();
    let caps = TASK_REGEX.captures(line)?;

    let status_char = caps.get(1)?.as_str().chars().next()?;
    let status = TaskStatus::from_checkbox(status_char)?;
    let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    let location = TaskLocation {
        file: file_path.to_path_buf(),
        line: line_num,
    };
    let mut task = Task::new(location, line, "");
    task.status = status;

    let mut tokens = tokenize(rest);
    forward_pass(&mut tokens, &mut task);
    reverse_pass(&mut tokens, &mut task);

    task.description = tokens
        .iter()
        .filter(|t| !t.consumed)
        .map(|t| t.text)
        .collect::<Vec<_>>()
        .join(" ");

    Some(task)
}

/// Extract tags, the own block ID and dependency references.
fn forward_pass(tokens: &mut [Token<'_>], task: &mut Task) {
    for token in tokens.iter_mut().filter(|t| t.is_live()) {
        if let Some(tag) = tag_name(token.text) {
            task.tags.insert(tag.to_string());
            token.consumed = true;
        }
    }

    // The dependency region starts at the first ⛔ whose next live token is a
    // block ID reference.
    let region_start = (0..tokens.len()).find(|&i| {
        tokens[i].is_live()
            && is_dependency_symbol(tokens[i].text)
            && tokens[i + 1..]
                .iter()
                .find(|t| t.is_live())
                .is_some_and(|next| block_id_name(next.text).is_some())
    });

    if let Some(start) = region_start {
        for token in tokens[start..].iter_mut().filter(|t| t.is_live()) {
            if is_dependency_symbol(token.text) {
                token.consumed = true;
            } else if let Some(id) = block_id_name(token.text) {
                if !task.depends_on.iter().any(|dep| dep == id) {
                    task.depends_on.push(id.to_string());
                }
                token.consumed = true;
            }
        }
    }

    // Only the first own-ID reference is taken; any others stay in the text.
    let own_end = region_start.unwrap_or(tokens.len());
    if let Some(token) = tokens[..own_end]
        .iter_mut()
        .find(|t| t.is_live() && block_id_name(t.text).is_some())
    {
        task.block_id = block_id_name(token.text).map(str::to_string);
        token.consumed = true;
    }
}

/// Extract priority, dates and recurrence, right to left.
///
/// Each kind is recognised by its own marker wherever it sits in the line.
/// The rightmost occurrence of a kind sets the field; earlier ones are
/// consumed and dropped. A marker without a valid payload stays in the text.
fn reverse_pass(tokens: &mut [Token<'_>], task: &mut Task) {
    let remaining: Vec<usize> = (0..tokens.len()).filter(|&i| !tokens[i].consumed).collect();

    let mut seen_priority = false;
    let mut seen_recurrence = false;
    let mut seen_dates: HashSet<DateField> = HashSet::new();
    // Position in `remaining` of the nearest marker to the right; bounds
    // recurrence text.
    let mut boundary = remaining.len();

    for pos in (0..remaining.len()).rev() {
        let idx = remaining[pos];
        let token = &tokens[idx];

        if token.in_link || !is_metadata_symbol(token.text) {
            continue;
        }

        if let Some(priority) = priority_for_symbol(token.text) {
            if !seen_priority {
                task.priority = priority;
                seen_priority = true;
            }
            tokens[idx].consumed = true;
        } else if let Some(field) = date_field_for_symbol(token.text) {
            let payload = remaining
                .get(pos + 1)
                .filter(|&&next| !tokens[next].consumed && !tokens[next].in_link)
                .and_then(|&next| parse_date_token(tokens[next].text).map(|date| (next, date)));

            if let Some((next, date)) = payload {
                if seen_dates.insert(field) {
                    set_date(task, field, date);
                }
                tokens[idx].consumed = true;
                tokens[next].consumed = true;
            }
        } else if is_recurrence_symbol(token.text) && pos + 1 < boundary {
            let payload = &remaining[pos + 1..boundary];
            if !seen_recurrence {
                task.recurrence = Some(
                    payload
                        .iter()
                        .map(|&i| tokens[i].text)
                        .collect::<Vec<_>>()
                        .join(" "),
                );
                seen_recurrence = true;
            }
            tokens[idx].consumed = true;
            for &i in payload {
                tokens[i].consumed = true;
            }
        }

        boundary = pos;
    }
}

fn set_date(task: &mut Task, field: DateField, date: chrono::NaiveDate) {
    let slot = match field {
        DateField::Created => &mut task.created,
        DateField::Start => &mut task.start,
        DateField::Scheduled => &mut task.scheduled,
        DateField::Due => &mut task.due,
        DateField::Cancelled => &mut task.cancelled,
        DateField::Done => &mut task.done,
    };
    *slot = Some(date);
}

fn get_date(task: &Task, field: DateField) -> Option<chrono::NaiveDate> {
    match field {
        DateField::Created => task.created,
        DateField::Start => task.start,
        DateField::Scheduled => task.scheduled,
        DateField::Due => task.due,
        DateField::Cancelled => task.cancelled,
        DateField::Done => task.done,
    }
}

/// Format a task back into an Obsidian Tasks line.
///
/// Canonical order: description, tags, block ID, dependencies, priority,
/// recurrence, then created, start, scheduled, due, cancelled and done dates.
pub fn format_task(task: &Task) -> String {
    let mut parts = vec![format!("- {}", task.status.checkbox())];

    if !task.description.is_empty() {
        parts.push(task.description.clone());
    }

    for tag in &task.tags {
        parts.push(format!("{}{}", grammar::TAG_PREFIX, tag));
    }

    if let Some(ref id) = task.block_id {
        parts.push(format!("{}{}", grammar::BLOCK_ID_PREFIX, id));
    }

    if !task.depends_on.is_empty() {
        parts.push(grammar::DEPENDENCY_SYMBOL.to_string());
        for dep in &task.depends_on {
            parts.push(format!("{}{}", grammar::BLOCK_ID_PREFIX, dep));
        }
    }

    if task.priority != Priority::None {
        if let Some(symbol) = grammar::symbol_for_priority(task.priority) {
            parts.push(symbol.to_string());
        }
    }

    if let Some(ref recurrence) = task.recurrence {
        parts.push(format!("{} {}", grammar::RECURRENCE_SYMBOL, recurrence));
    }

    for (symbol, field) in grammar::DATE_SYMBOLS {
        if let Some(date) = get_date(task, field) {
            parts.push(format!("{} {}", symbol, grammar::format_date(date)));
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(line: &str) -> Task {
        parse_task_line(line, Path::new("test.md"), 1).expect("line should parse as a task")
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_simple_task() {
        let task = parse("- [ ] A simple task");
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.description, "A simple task");
        assert_eq!(task.priority, Priority::None);
        assert_eq!(task.raw, "- [ ] A simple task");
        assert_eq!(task.location.file, PathBuf::from("test.md"));
        assert_eq!(task.location.line, 1);
    }

    #[test]
    fn test_parse_statuses() {
        assert_eq!(parse("- [x] Done").status, TaskStatus::Completed);
        assert_eq!(parse("- [X] Done").status, TaskStatus::Completed);
        assert_eq!(parse("- [-] Dropped").status, TaskStatus::Cancelled);
        assert_eq!(parse("\t\t- [ ] Indented").description, "Indented");
        assert_eq!(parse("* [ ] Asterisk").description, "Asterisk");
        assert_eq!(parse("+ [ ] Plus").description, "Plus");
    }

    #[test]
    fn test_non_task_lines() {
        let path = Path::new("test.md");
        assert!(parse_task_line("This is not a task.", path, 1).is_none());
        assert!(parse_task_line("- A list item", path, 1).is_none());
        assert!(parse_task_line("- [?] Unknown status", path, 1).is_none());
        assert!(parse_task_line("# - [ ] Heading", path, 1).is_none());
        assert!(parse_task_line("", path, 1).is_none());
    }

    #[test]
    fn test_empty_task() {
        let task = parse("- [ ]");
        assert_eq!(task.description, "");
    }

    #[test]
    fn test_high_priority_due_tag() {
        let task = parse("- [ ] Buy milk ⏫ 📅 2025-10-26 #home");
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due, date(2025, 10, 26));
        assert_eq!(task.tags.iter().collect::<Vec<_>>(), vec!["home"]);
        assert_eq!(task.description, "Buy milk");
    }

    #[test]
    fn test_completed_with_done_date() {
        let task = parse("- [x] Call dentist ✅ 2025-10-20");
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.done, date(2025, 10, 20));
        assert_eq!(task.priority, Priority::None);
        assert_eq!(task.description, "Call dentist");
    }

    #[test]
    fn test_metadata_in_any_order_at_end() {
        let task = parse("- [x] A completed low priority task ✅ 2023-10-25 🔽");
        assert_eq!(task.description, "A completed low priority task");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.done, date(2023, 10, 25));

        let task = parse("- [ ] Multiple dates ➕ 2023-10-20 📅 2023-10-26");
        assert_eq!(task.description, "Multiple dates");
        assert_eq!(task.created, date(2023, 10, 20));
        assert_eq!(task.due, date(2023, 10, 26));
    }

    #[test]
    fn test_all_date_fields() {
        let task = parse(
            "- [-] Full ➕ 2026-01-01 🛫 2026-02-01 ⏳ 2026-02-15 📅 2026-03-01 ❌ 2026-02-20 ✅ 2026-02-25",
        );
        assert_eq!(task.description, "Full");
        assert_eq!(task.created, date(2026, 1, 1));
        assert_eq!(task.start, date(2026, 2, 1));
        assert_eq!(task.scheduled, date(2026, 2, 15));
        assert_eq!(task.due, date(2026, 3, 1));
        assert_eq!(task.cancelled, date(2026, 2, 20));
        assert_eq!(task.done, date(2026, 2, 25));
    }

    #[test]
    fn test_metadata_mid_description() {
        let task = parse("- [ ] This ⏫ is part of the description 📅 2024-01-01");
        assert_eq!(task.description, "This is part of the description");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due, date(2024, 1, 1));

        let task = parse("- [ ] Buy ⏫ milk");
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.priority, Priority::High);

        let task = parse("- [ ] Pay 📅 2025-01-01 rent");
        assert_eq!(task.description, "Pay rent");
        assert_eq!(task.due, date(2025, 1, 1));
    }

    #[test]
    fn test_mid_line_recurrence_runs_to_next_marker() {
        let task = parse("- [ ] Water 🔁 every week ⏳ 2026-03-01 the plants");
        assert_eq!(task.recurrence.as_deref(), Some("every week"));
        assert_eq!(task.scheduled, date(2026, 3, 1));
        assert_eq!(task.description, "Water the plants");
    }

    #[test]
    fn test_malformed_date_stays_in_description() {
        let task = parse("- [ ] Pay rent 📅 2025-13-45");
        assert_eq!(task.description, "Pay rent 📅 2025-13-45");
        assert_eq!(task.due, None);

        let task = parse("- [ ] Pay rent 📅 tomorrow ⏫");
        assert_eq!(task.description, "Pay rent 📅 tomorrow");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_duplicate_marker_rightmost_wins() {
        let task = parse("- [ ] Report 📅 2025-01-01 📅 2025-02-02");
        assert_eq!(task.due, date(2025, 2, 2));
        assert_eq!(task.description, "Report");

        let task = parse("- [ ] Report 🔽 ⏫");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description, "Report");

        let task = parse("- [ ] Report 📅 2025-01-01 later 📅 2025-02-02");
        assert_eq!(task.due, date(2025, 2, 2));
        assert_eq!(task.description, "Report later");

        let task = parse("- [ ] Chores 🔁 every day ⏬ then 🔁 every week");
        assert_eq!(task.recurrence.as_deref(), Some("every week"));
        assert_eq!(task.priority, Priority::Lowest);
        assert_eq!(task.description, "Chores then");
    }

    #[test]
    fn test_date_marker_needs_adjacent_date() {
        let task = parse("- [ ] Odd 📅 📅 2025-01-01");
        assert_eq!(task.due, date(2025, 1, 1));
        assert_eq!(task.description, "Odd 📅");

        let task = parse("- [ ] Due 📅 [[2025-01-01]]");
        assert_eq!(task.due, None);
        assert_eq!(task.description, "Due 📅 [[2025-01-01]]");
    }

    #[test]
    fn test_recurrence() {
        let task = parse("- [ ] A recurring task 🔁 every week");
        assert_eq!(task.description, "A recurring task");
        assert_eq!(task.recurrence.as_deref(), Some("every week"));
    }

    #[test]
    fn test_recurrence_stops_at_next_marker() {
        let task = parse("- [ ] Recurring task 🔁 every week 📅 2026-03-01");
        assert_eq!(task.description, "Recurring task");
        assert_eq!(task.recurrence.as_deref(), Some("every week"));
        assert_eq!(task.due, date(2026, 3, 1));

        let task = parse("- [ ] Water plants ⏫ 🔁 every day when done ⏳ 2026-03-01");
        assert_eq!(task.description, "Water plants");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.recurrence.as_deref(), Some("every day when done"));
        assert_eq!(task.scheduled, date(2026, 3, 1));
    }

    #[test]
    fn test_lone_recurrence_marker_is_text() {
        let task = parse("- [ ] Odd 🔁");
        assert_eq!(task.recurrence, None);
        assert_eq!(task.description, "Odd 🔁");
    }

    #[test]
    fn test_tags() {
        let task = parse("- [ ] A task with #tags and #more/tags");
        assert_eq!(task.description, "A task with and");
        assert!(task.has_tag("tags"));
        assert!(task.has_tag("more/tags"));
        assert!(!task.has_tag("more"));
    }

    #[test]
    fn test_tags_are_case_sensitive_and_deduplicated() {
        let task = parse("- [ ] Plan #Work #work #work");
        assert_eq!(task.tags.len(), 2);
        assert!(task.has_tag("Work"));
        assert!(task.has_tag("work"));
    }

    #[test]
    fn test_tag_inside_link_is_not_a_tag() {
        let task = parse("- [ ] Read [[Note#Heading]] and [site](https://x.org/#anchor) #reading");
        assert_eq!(task.tags.iter().collect::<Vec<_>>(), vec!["reading"]);
        assert_eq!(
            task.description,
            "Read [[Note#Heading]] and [site](https://x.org/#anchor)"
        );

        let task = parse("- [ ] See [[My Note #draft]]");
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_block_id() {
        let task = parse("- [ ] A task with a block ID ^my-id");
        assert_eq!(task.description, "A task with a block ID");
        assert_eq!(task.block_id.as_deref(), Some("my-id"));
        assert!(task.depends_on.is_empty());
    }

    #[test]
    fn test_advanced_metadata() {
        let task = parse("- [ ] A complex task with #tags, a block ID ^complex-id, and 🔁 every day");
        assert_eq!(task.description, "A complex task with a block ID and");
        assert_eq!(task.block_id.as_deref(), Some("complex-id"));
        assert_eq!(task.recurrence.as_deref(), Some("every day"));
        assert!(task.has_tag("tags"));
    }

    #[test]
    fn test_dependencies() {
        let task = parse("- [ ] Deploy ^deploy ⛔ ^build ^test ^build 📅 2025-05-01");
        assert_eq!(task.description, "Deploy");
        assert_eq!(task.block_id.as_deref(), Some("deploy"));
        assert_eq!(task.depends_on, vec!["build", "test"]);
        assert_eq!(task.due, date(2025, 5, 1));
    }

    #[test]
    fn test_dependency_without_own_id() {
        let task = parse("- [ ] Ship ⛔ ^review");
        assert_eq!(task.block_id, None);
        assert_eq!(task.depends_on, vec!["review"]);
        assert_eq!(task.description, "Ship");
    }

    #[test]
    fn test_dependency_marker_without_ids_is_text() {
        let task = parse("- [ ] Blocked ⛔ on something");
        assert!(task.depends_on.is_empty());
        assert_eq!(task.description, "Blocked ⛔ on something");
    }

    #[test]
    fn test_multiple_own_ids_first_wins() {
        let task = parse("- [ ] Two ids ^first ^second");
        assert_eq!(task.block_id.as_deref(), Some("first"));
        assert_eq!(task.description, "Two ids ^second");
    }

    #[test]
    fn test_trailing_whitespace_and_crlf() {
        let task = parse("- [ ] Windows line ⏫   \r");
        assert_eq!(task.description, "Windows line");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.raw, "- [ ] Windows line ⏫");
    }

    #[test]
    fn test_description_has_no_recognised_markers() {
        let lines = [
            "- [ ] a ⏫ 📅 2025-10-26 #home",
            "- [x] b 🔁 every week ✅ 2025-01-01",
            "- [-] c ^id ⛔ ^dep ❌ 2025-01-02 🔼",
            "- [ ] d #x/y ➕ 2024-12-31 🛫 2025-01-01 ⏳ 2025-01-02",
            "- [ ] e ⏫ in the middle 📅 2025-03-01 of text",
            "- [ ] f 📅 2025-01-01 g ⏬ h 📅 2025-02-02 i 🔽",
            "- [ ] j 🔁 every day ✅ 2025-01-01 k 🔁 every month",
        ];
        for line in lines {
            let task = parse(line);
            for token in task.description.split_whitespace() {
                assert!(!is_metadata_symbol(token), "{line}: {token}");
                assert!(!token.starts_with('#'), "{line}: {token}");
                assert!(!token.starts_with('^'), "{line}: {token}");
            }
        }
    }

    #[test]
    fn test_format_task_canonical_order() {
        let task = parse(
            "- [ ] Task ✅ 2026-02-25 ❌ 2026-02-20 📅 2026-03-01 ⏳ 2026-02-15 🛫 2026-02-01 ➕ 2026-01-01 🔁 every week ⏫ ⛔ ^dep1 ^myid #b #a",
        );
        let line = format_task(&task);
        assert_eq!(
            line,
            "- [ ] Task #a #b ⛔ ^dep1 ^myid ⏫ 🔁 every week ➕ 2026-01-01 🛫 2026-02-01 ⏳ 2026-02-15 📅 2026-03-01 ❌ 2026-02-20 ✅ 2026-02-25"
        );
    }

    #[test]
    fn test_format_then_parse_roundtrip() {
        let mut task = Task::new(
            TaskLocation {
                file: PathBuf::from("notes/today.md"),
                line: 7,
            },
            "",
            "Write the quarterly report",
        );
        task.status = TaskStatus::Completed;
        task.priority = Priority::Highest;
        task.due = date(2025, 10, 26);
        task.scheduled = date(2025, 10, 20);
        task.done = date(2025, 10, 25);
        task.recurrence = Some("every quarter".to_string());
        task.block_id = Some("report".to_string());
        task.depends_on = vec!["numbers".to_string(), "review".to_string()];
        task.tags.insert("work".to_string());
        task.tags.insert("work/finance".to_string());

        let line = format_task(&task);
        task.raw = line.clone();

        let reparsed = parse_task_line(&line, Path::new("notes/today.md"), 7).unwrap();
        assert_eq!(reparsed, task);
    }
}
