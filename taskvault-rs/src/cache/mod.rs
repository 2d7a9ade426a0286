//! In-memory task cache keyed by note path and modification time.
//!
//! Each note is parsed at most once per distinct mtime. The cache lives as
//! long as its owner (normally a [`crate::Vault`]); nothing is persisted.

mod types;

pub use types::*;

use crate::error::{Result, TaskError};
use crate::parser::parse_file;
use crate::types::Task;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    parses: u64,
}

/// The task cache.
///
/// All methods take `&self`; the whole stat, compare, parse and store
/// sequence for a call runs under one lock.
#[derive(Debug, Default)]
pub struct TaskCache {
    state: Mutex<CacheState>,
}

impl TaskCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Entries are replaced with a single insert, so a panic elsewhere
        // cannot leave the map half-updated.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Tasks for every path, in the order given and each in line order.
    ///
    /// Notes whose mtime matches the cached one are served from the cache;
    /// anything else is parsed and the entry replaced. A path that cannot be
    /// stat'ed or read fails the whole call with [`TaskError::Io`] and its
    /// entry is dropped.
    pub fn get_tasks<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Task>> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let mut all_tasks = Vec::new();

        for path in paths {
            let path = path.as_ref();

            let mtime = match fs::metadata(path).and_then(|m| m.modified()) {
                Ok(mtime) => mtime,
                Err(e) => {
                    state.entries.remove(path);
                    return Err(TaskError::io(path, e));
                }
            };

            if let Some(entry) = state.entries.get(path) {
                if !entry.is_stale(mtime) {
                    state.hits += 1;
                    tracing::trace!(path = %path.display(), "task cache hit");
                    all_tasks.extend(entry.tasks.iter().cloned());
                    continue;
                }
            }

            let tasks = match parse_file(path) {
                Ok(tasks) => tasks,
                Err(e) => {
                    state.entries.remove(path);
                    return Err(e);
                }
            };
            state.parses += 1;
            tracing::debug!(path = %path.display(), tasks = tasks.len(), "parsed note into task cache");

            all_tasks.extend(tasks.iter().cloned());
            state
                .entries
                .insert(path.to_path_buf(), CacheEntry { mtime, tasks });
        }

        Ok(all_tasks)
    }

    /// Drop every entry. Counters are kept.
    pub fn invalidate_all(&self) {
        let mut state = self.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        tracing::info!(entries = dropped, "task cache cleared");
    }

    /// Drop the entry for one note, if any. Returns whether it was cached.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.lock().entries.remove(path).is_some()
    }

    /// Drop entries for notes not in `paths` (deleted or renamed notes).
    ///
    /// Returns the number of entries removed.
    pub fn retain_paths<P: AsRef<Path>>(&self, paths: &[P]) -> usize {
        let keep: HashSet<&Path> = paths.iter().map(|p| p.as_ref()).collect();
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|path, _| keep.contains(path.as_path()));
        let removed = before - state.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "pruned task cache entries for vanished notes");
        }
        removed
    }

    /// Whether a note currently has an entry.
    pub fn contains(&self, path: &Path) -> bool {
        self.lock().entries.contains_key(path)
    }

    /// Usage counters.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            hits: state.hits,
            parses: state.parses,
        }
    }
}
