//! Vault representation and task collection.

use crate::cache::{CacheStats, TaskCache};
use crate::config::Config;
use crate::error::{Result, TaskError};
use crate::parser::parse_file;
use crate::types::Task;
use glob::glob;
use std::path::{Path, PathBuf};

/// An Obsidian vault together with its task cache.
#[derive(Debug)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
    pub config: Config,
    cache: TaskCache,
}

impl Vault {
    /// Open a vault rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(TaskError::VaultNotFound(root));
        }

        Ok(Self {
            root,
            config,
            cache: TaskCache::new(),
        })
    }

    /// Get the full path to a note.
    pub fn note_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// List every note with a configured extension, relative to the root.
    ///
    /// Hidden files and anything under a hidden directory (such as
    /// `.obsidian/` or `.trash/`) are skipped. The result is sorted.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let mut notes = Vec::new();

        for ext in &self.config.extensions {
            let pattern = self
                .root
                .join(format!("**/*.{}", ext.trim_start_matches('.')));
            let pattern_str = pattern.to_string_lossy();

            for entry in glob(&pattern_str)? {
                match entry {
                    Ok(path) => {
                        if !path.is_file() {
                            continue;
                        }
                        if let Ok(relative) = path.strip_prefix(&self.root) {
                            if !relative
                                .components()
                                .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                            {
                                notes.push(relative.to_path_buf());
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable vault entry");
                    }
                }
            }
        }

        notes.sort();
        notes.dedup();
        tracing::debug!(root = %self.root.display(), notes = notes.len(), "discovered notes");

        Ok(notes)
    }

    /// Every task in the vault, ordered by note path and then line.
    ///
    /// Each task's `location.file` is the note's full path. Cache entries for
    /// notes that no longer exist are pruned before scanning.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let paths: Vec<PathBuf> = self
            .list_notes()?
            .iter()
            .map(|relative| self.note_path(relative))
            .collect();

        if !self.config.cache_enabled {
            let mut tasks = Vec::new();
            for path in &paths {
                tasks.extend(parse_file(path)?);
            }
            return Ok(tasks);
        }

        self.cache.retain_paths(&paths);
        self.cache.get_tasks(&paths)
    }

    /// Forget every cached note so the next scan reparses the whole vault.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Direct access to the underlying cache.
    pub fn cache(&self) -> &TaskCache {
        &self.cache
    }
}
