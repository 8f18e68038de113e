//! Configuration management.
//!
//! Two files configure a run:
//!
//! 1. **Global configuration** (`~/.artpipe/config.toml`): the local repository
//!    location and the remote repositories to fetch from. Overridden by
//!    `--config` or the `ARTPIPE_CONFIG` environment variable.
//! 2. **Project descriptor** (`artifacts.toml`): the project's dependency graph,
//!    handled by [`crate::manifest`].
//!
//! Command-line flags (`--local-repository`, `--repository`) are applied on top
//! of the global configuration by the CLI.

mod global;
mod parser;

pub use global::{GlobalConfig, expand_path};
pub use parser::parse_config;
