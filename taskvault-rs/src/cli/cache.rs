//! Cache CLI commands.
//!
//! The cache lives for one process, so both commands scan the vault first.

use crate::cache::CacheStats;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct StatusResult {
    vault_path: PathBuf,
    cache_enabled: bool,
    notes: usize,
    tasks: usize,
    cache: CacheStats,
}

#[derive(Debug, Serialize)]
struct ClearResult {
    cleared: bool,
    entries_removed: usize,
}

/// Show cache status.
pub fn status(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let notes = vault.list_notes()?.len();
    let tasks = vault.get_all_tasks()?.len();

    output.print(&StatusResult {
        vault_path: vault.root.clone(),
        cache_enabled: vault.config.cache_enabled,
        notes,
        tasks,
        cache: vault.cache_stats(),
    })?;
    Ok(ExitCode::Success)
}

/// Clear the cache.
pub fn clear(vault: &Vault, output: &Output) -> Result<ExitCode> {
    vault.get_all_tasks()?;
    let entries_removed = vault.cache_stats().entries;
    vault.clear_cache();

    output.info(&format!("Dropped {} cached notes", entries_removed));
    output.print(&ClearResult {
        cleared: vault.cache_stats().entries == 0,
        entries_removed,
    })?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_vault() -> (TempDir, Vault) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.md"), "- [ ] one\n- [ ] two").unwrap();
        fs::write(temp_dir.path().join("b.md"), "no tasks").unwrap();

        let vault = Vault::new(temp_dir.path(), Config::default()).unwrap();
        (temp_dir, vault)
    }

    #[test]
    fn test_status() {
        let (_temp_dir, vault) = create_test_vault();
        let output = Output::new(crate::cli::args::OutputFormat::Json, true);

        assert_eq!(status(&vault, &output).unwrap(), ExitCode::Success);
        assert_eq!(vault.cache_stats().entries, 2);
    }

    #[test]
    fn test_clear() {
        let (_temp_dir, vault) = create_test_vault();
        let output = Output::new(crate::cli::args::OutputFormat::Json, true);

        assert_eq!(clear(&vault, &output).unwrap(), ExitCode::Success);
        assert_eq!(vault.cache_stats().entries, 0);
        assert_eq!(vault.cache_stats().parses, 2);
    }
}
