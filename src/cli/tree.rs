//! Print the project's dependency tree.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::ProjectContext;
use crate::manifest::{ManifestGraphBuilder, find_manifest_with_optional};
use crate::resolver::GraphBuilder;

/// Display the dependency tree rooted at the project.
///
/// Artifacts reached more than once are marked `(*)` and not expanded again;
/// edges back into the current path are marked `(circular reference)`.
#[derive(Args, Debug)]
pub struct TreeCommand {}

impl TreeCommand {
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        let manifest_path = find_manifest_with_optional(manifest_path)
            .context("No artifacts.toml found. Create one to describe the project's dependencies.")?;
        let project = ProjectContext::new(manifest_path);

        let graph = ManifestGraphBuilder::new().build_graph(&project)?;
        print!("{}", graph.to_tree_string());

        if graph.is_empty() {
            println!("{}", "(no dependencies)".dimmed());
        }
        Ok(())
    }
}
