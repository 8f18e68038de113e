//! Global constants used throughout the crate.
//!
//! File names, environment variables and defaults that more than one module
//! relies on are kept here so they stay consistent between the library, the
//! CLI and the tests.

/// Name of the project descriptor searched for by the CLI.
pub const MANIFEST_FILENAME: &str = "artifacts.toml";

/// Environment variable that overrides the global configuration file path.
pub const CONFIG_ENV_VAR: &str = "ARTPIPE_CONFIG";

/// Directory under the user's home holding the default config and repository.
pub const DEFAULT_HOME_DIR: &str = ".artpipe";

/// File name of the global configuration inside [`DEFAULT_HOME_DIR`].
pub const CONFIG_FILENAME: &str = "config.toml";

/// Packaging type assumed when a coordinate does not name one.
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

/// Extension of the digest file published next to a repository artifact.
pub const CHECKSUM_EXTENSION: &str = "sha256";

/// Message used when graph building, ordering or resolution fails.
pub const COLLECT_FAILURE_MESSAGE: &str = "Failed to get dependency artifacts";

/// Message used when the processor fails.
pub const PROCESS_FAILURE_MESSAGE: &str = "Failed to process artifacts";
