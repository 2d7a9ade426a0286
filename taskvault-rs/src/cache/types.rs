//! Cache data structures.

use crate::types::Task;
use serde::Serialize;
use std::time::SystemTime;

/// Parsed tasks of one note together with the mtime they were parsed at.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Modification time observed when the note was parsed.
    pub mtime: SystemTime,
    /// Tasks in line order.
    pub tasks: Vec<Task>,
}

impl CacheEntry {
    /// Check if the note changed since it was cached.
    pub fn is_stale(&self, actual_mtime: SystemTime) -> bool {
        self.mtime != actual_mtime
    }
}

/// Counters describing cache usage since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of notes currently cached.
    pub entries: usize,
    /// Number of lookups served without parsing.
    pub hits: u64,
    /// Number of times a note was parsed.
    pub parses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_cache_entry_is_stale() {
        let old_time = SystemTime::UNIX_EPOCH + Duration::from_secs(1000);
        let new_time = SystemTime::UNIX_EPOCH + Duration::from_secs(2000);
        let entry = CacheEntry {
            mtime: old_time,
            tasks: vec![],
        };

        assert!(!entry.is_stale(old_time));
        assert!(entry.is_stale(new_time));
        // An mtime moving backwards (e.g. restored from backup) is a change too.
        assert!(entry.is_stale(SystemTime::UNIX_EPOCH));
    }
}
