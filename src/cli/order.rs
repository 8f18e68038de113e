//! Print the dependency-first artifact order without resolving anything.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::core::ProjectContext;
use crate::manifest::{ManifestGraphBuilder, find_manifest_with_optional};
use crate::resolver::GraphBuilder;

/// Show the order artifacts would be resolved and delivered in.
#[derive(Args, Debug)]
pub struct OrderCommand {
    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

impl OrderCommand {
    pub async fn execute_with_manifest_path(self, manifest_path: Option<PathBuf>) -> Result<()> {
        if !matches!(self.format.as_str(), "text" | "json") {
            return Err(anyhow::anyhow!(
                "Invalid format '{}'. Valid formats are: text, json",
                self.format
            ));
        }

        let manifest_path = find_manifest_with_optional(manifest_path)
            .context("No artifacts.toml found. Create one to describe the project's dependencies.")?;
        let project = ProjectContext::new(manifest_path);

        let graph = ManifestGraphBuilder::new().build_graph(&project)?;
        let order = graph.ordered_coordinates()?;

        if self.format == "json" {
            let names: Vec<String> = order.iter().map(ToString::to_string).collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else {
            for (index, coordinate) in order.iter().enumerate() {
                println!("{:>3}. {}", index + 1, coordinate);
            }
        }
        Ok(())
    }
}
