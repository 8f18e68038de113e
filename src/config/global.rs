//! Global (user-wide) configuration.
//!
//! ```toml
//! # ~/.artpipe/config.toml
//! local_repository = "~/.m2/repository"
//!
//! [[repositories]]
//! id = "company"
//! url = "file:///mnt/shared/maven"
//!
//! [[repositories]]
//! id = "vendored"
//! url = "/opt/vendor/repo"
//! ```
//!
//! A missing file means defaults: the local repository at
//! `~/.artpipe/repository` and no remotes.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::parse_config;
use crate::constants::{CONFIG_ENV_VAR, CONFIG_FILENAME, DEFAULT_HOME_DIR};
use crate::resolver::{RemoteRepository, RepositoryContext};

/// Contents of the global configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalConfig {
    /// Local repository root; `~` and environment variables are expanded.
    #[serde(default)]
    pub local_repository: Option<String>,

    /// Remote repositories, consulted in order.
    #[serde(default)]
    pub repositories: Vec<RemoteRepository>,
}

impl GlobalConfig {
    /// Load from `path` if given, else from `ARTPIPE_CONFIG`, else the default
    /// location. A file that doesn't exist yields the defaults.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::config_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No global config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || parse_config(&path))
            .await
            .context("Global config loading task panicked")?
    }

    /// The config file in effect: `ARTPIPE_CONFIG` if set, else [`Self::default_path`].
    pub fn config_path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::default_path(),
        }
    }

    /// `~/.artpipe/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join(CONFIG_FILENAME))
    }

    /// `~/.artpipe/repository`
    pub fn default_local_repository() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("repository"))
    }

    fn home_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
            .join(DEFAULT_HOME_DIR))
    }

    /// The local repository root with `~` and `$VARS` expanded.
    pub fn local_repository_path(&self) -> Result<PathBuf> {
        match &self.local_repository {
            Some(raw) => expand_path(raw),
            None => Self::default_local_repository(),
        }
    }

    /// Add a remote, replacing any existing one with the same id.
    pub fn add_repository(&mut self, repository: RemoteRepository) {
        match self.repositories.iter_mut().find(|r| r.id == repository.id) {
            Some(existing) => *existing = repository,
            None => self.repositories.push(repository),
        }
    }

    /// Build the [`RepositoryContext`] described by this configuration.
    pub fn repository_context(&self) -> Result<RepositoryContext> {
        let local = self.local_repository_path()?;
        Ok(self
            .repositories
            .iter()
            .cloned()
            .fold(RepositoryContext::new(local), RepositoryContext::with_remote))
    }
}

/// Expand `~` and environment variables in a configured path.
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path '{raw}'"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
