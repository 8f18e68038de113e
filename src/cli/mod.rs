//! Command-line interface for `artpipe`.
//!
//! # Commands
//!
//! - `process`: build the dependency graph, resolve every artifact in
//!   dependency-first order, filter, and hand the result to a processor
//! - `order`: print the dependency-first order without resolving
//! - `tree`: print the dependency tree rooted at the project
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging
//! - `--quiet` / `-q`: errors only
//! - `--config` / `-c`: global configuration file
//! - `--manifest-path`: project descriptor to use instead of searching for
//!   `artifacts.toml` upwards from the current directory
//!
//! # Examples
//!
//! ```bash
//! # List the ordered artifacts
//! artpipe process
//!
//! # Copy only com.example artifacts into ./dist
//! artpipe process --processor copy --output dist --include 'com.example:*'
//!
//! # Use an extra repository for this run
//! artpipe process --repository file:///mnt/mirror
//!
//! # Inspect the graph
//! artpipe order --format json
//! artpipe tree
//! ```

mod order;
mod process;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags.
///
/// Passed down to commands explicitly instead of through environment
/// variables.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` leaves the choice to `RUST_LOG`, falling
    /// back to `info`.
    pub log_level: Option<String>,

    /// Global configuration file given with `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// The filter the subscriber should be installed with.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command-line arguments.
#[derive(Parser)]
#[command(
    name = "artpipe",
    about = "Order, resolve and process a project's dependency artifacts",
    version,
    long_about = "artpipe reads a project's artifacts.toml, orders its dependency graph so every artifact follows its dependencies, resolves missing artifacts from configured repositories and hands the result to a processor."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file [env: ARTPIPE_CONFIG]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to artifacts.toml (searched upwards from the current directory by default)
    #[arg(long, global = true, value_name = "FILE")]
    manifest_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the project's artifacts in dependency order and process them
    Process(process::ProcessCommand),

    /// Print the dependency-first artifact order
    Order(order::OrderCommand),

    /// Print the dependency tree
    Tree(tree::TreeCommand),
}

impl Cli {
    /// Execute with configuration derived from the global flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Derive [`CliConfig`] from the parsed flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Process(cmd) => cmd.execute_with_manifest_path(self.manifest_path, &config).await,
            Commands::Order(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
            Commands::Tree(cmd) => cmd.execute_with_manifest_path(self.manifest_path).await,
        }
    }
}
