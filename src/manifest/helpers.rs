//! Project descriptor discovery.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::MANIFEST_FILENAME;
use crate::core::GraphBuildError;

/// Find the descriptor by searching up the directory tree from the current directory.
///
/// Mirrors Cargo and Git project file discovery: look for `artifacts.toml` in
/// the working directory, then in each parent until the filesystem root.
pub fn find_manifest() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory. This may indicate a permission issue or corrupted filesystem")?;
    Ok(find_manifest_from(current)?)
}

/// Find the descriptor using an explicit path or directory search.
///
/// # Errors
///
/// - Explicit path provided but doesn't exist
/// - No explicit path and no descriptor found via search
pub fn find_manifest_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(GraphBuildError::DescriptorNotFound {
                    path,
                }
                .into())
            }
        }
        None => find_manifest(),
    }
}

/// Find the descriptor by searching up from a specific starting directory.
///
/// ```text
/// /home/user/project/
/// ├── artifacts.toml      ← Found here
/// └── subdir/
///     └── nested/         ← Search started here, walks up
/// ```
pub fn find_manifest_from(start: PathBuf) -> Result<PathBuf, GraphBuildError> {
    let mut current = start.clone();
    loop {
        let manifest_path = current.join(MANIFEST_FILENAME);
        if manifest_path.exists() {
            return Ok(manifest_path);
        }

        if !current.pop() {
            return Err(GraphBuildError::DescriptorNotFound {
                path: start.join(MANIFEST_FILENAME),
            });
        }
    }
}
