//! User configuration.
//!
//! Read from `$TASKVAULT_CONFIG` when set, otherwise from
//! `<config dir>/taskvault/config.toml`. A missing file means defaults.

use crate::error::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TASKVAULT_CONFIG";

/// Environment variables consulted for the vault path, in order.
pub const VAULT_ENV_VARS: [&str; 2] = ["TASKVAULT_VAULT", "OBSIDIAN_VAULT_PATH"];

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_cache_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default vault path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// File extensions scanned for tasks, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Reuse parsed notes until their mtime changes.
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Log filter used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vault: None,
            extensions: default_extensions(),
            cache_enabled: default_cache_enabled(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskvault").join("config.toml"))
    }

    /// Load the config from `$TASKVAULT_CONFIG` or the default location.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load the config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| TaskError::io(path, e))?;
        Self::parse(&content)
    }

    /// Parse a config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.extensions.iter().any(|e| e.trim_start_matches('.').is_empty()) {
            return Err(TaskError::ConfigError(
                "extensions must not contain empty entries".to_string(),
            ));
        }
        Ok(config)
    }

    /// Resolve the vault path: `--vault`, then the environment, then the
    /// config file.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        let env_vault = VAULT_ENV_VARS
            .iter()
            .filter_map(std::env::var_os)
            .find(|v| !v.is_empty())
            .map(PathBuf::from);
        self.resolve_vault_path_with(cli_vault, env_vault)
    }

    fn resolve_vault_path_with(
        &self,
        cli_vault: Option<&Path>,
        env_vault: Option<PathBuf>,
    ) -> Result<PathBuf> {
        cli_vault
            .map(Path::to_path_buf)
            .or(env_vault)
            .or_else(|| self.vault.clone())
            .ok_or_else(|| {
                TaskError::ConfigError(format!(
                    "No vault specified. Use --vault, set {}, or add `vault` to the config file",
                    VAULT_ENV_VARS[0]
                ))
            })
    }
}
