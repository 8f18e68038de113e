//! Run the full artifact pipeline.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::GlobalConfig;
use crate::core::ProjectContext;
use crate::filter::{ArtifactFilter, PatternFilter};
use crate::manifest::{ManifestGraphBuilder, find_manifest_with_optional};
use crate::pipeline::ArtifactPipeline;
use crate::processor;
use crate::resolver::{RemoteRepository, RepositoryContext, RepositoryResolver};

use super::CliConfig;

/// Order, resolve and filter the project's artifacts, then process them.
#[derive(Args, Debug)]
pub struct ProcessCommand {
    /// Processor to hand the ordered artifacts to (list, json, copy)
    #[arg(short, long, default_value = "list")]
    processor: String,

    /// Destination directory for the copy processor [default: target/artifacts]
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Only deliver artifacts matching this pattern (group:name:version:type:classifier, globs allowed)
    #[arg(long = "include", value_name = "PATTERN")]
    includes: Vec<String>,

    /// Never deliver artifacts matching this pattern
    #[arg(long = "exclude", value_name = "PATTERN")]
    excludes: Vec<String>,

    /// Local repository root, overriding the global configuration
    #[arg(long, value_name = "DIR")]
    local_repository: Option<PathBuf>,

    /// Additional remote repository (directory or file:// URL), searched after configured ones
    #[arg(long = "repository", value_name = "URL")]
    repositories: Vec<String>,
}

impl ProcessCommand {
    pub async fn execute_with_manifest_path(
        self,
        manifest_path: Option<PathBuf>,
        config: &CliConfig,
    ) -> Result<()> {
        let manifest_path = find_manifest_with_optional(manifest_path)
            .context("No artifacts.toml found. Create one to describe the project's dependencies.")?;
        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;
        let repositories = self.repository_context(&global)?;

        let filter = PatternFilter::new(&self.includes, &self.excludes)?;
        let processor = processor::by_name(&self.processor, self.output.clone())?;
        let project = ProjectContext::new(manifest_path);

        tracing::debug!(
            "Processing {} with '{}' (local repository {})",
            project.descriptor_path().display(),
            self.processor,
            repositories.local().display()
        );

        let pipeline = ArtifactPipeline::new(
            Box::new(ManifestGraphBuilder::new()),
            Box::new(RepositoryResolver::new()),
            processor,
            repositories,
        );

        // Resolution and processing do blocking filesystem work.
        tokio::task::spawn_blocking(move || {
            let filter = (!filter.is_empty()).then_some(&filter as &dyn ArtifactFilter);
            pipeline.run(&project, filter)
        })
        .await
        .context("Pipeline task panicked")??;

        Ok(())
    }

    /// The global configuration with the command-line overrides applied.
    fn repository_context(&self, global: &GlobalConfig) -> Result<RepositoryContext> {
        let mut config = global.clone();
        if let Some(local) = &self.local_repository {
            config.local_repository = Some(local.display().to_string());
        }
        for (i, url) in self.repositories.iter().enumerate() {
            config.add_repository(RemoteRepository::new(format!("cli-{}", i + 1), url.clone()));
        }
        config.repository_context()
    }
}
