//! The end-to-end artifact pipeline.
//!
//! [`ArtifactPipeline`] wires the four stages together:
//!
//! ```text
//! GraphBuilder ─▶ topological order ─▶ resolve_in_order (+ filter) ─▶ ArtifactsProcessor
//! ```
//!
//! Any failure before processing is reported as an [`ExecutionFailure`] with
//! the message "Failed to get dependency artifacts"; a processor failure is
//! reported as "Failed to process artifacts". The original stage error is kept
//! as the failure's cause. An empty collection is a successful no-op and the
//! processor is not invoked.

use crate::constants::{COLLECT_FAILURE_MESSAGE, PROCESS_FAILURE_MESSAGE};
use crate::core::{ExecutionFailure, PipelineError, ProjectContext, ResolvedArtifact};
use crate::filter::ArtifactFilter;
use crate::processor::ArtifactsProcessor;
use crate::resolver::{ArtifactResolver, GraphBuilder, RepositoryContext, resolve_in_order};

/// A configured pipeline run.
///
/// Collaborators are trait objects so hosts can substitute their own graph
/// source, resolver or processor.
pub struct ArtifactPipeline {
    builder: Box<dyn GraphBuilder>,
    resolver: Box<dyn ArtifactResolver>,
    processor: Box<dyn ArtifactsProcessor>,
    repositories: RepositoryContext,
}

impl ArtifactPipeline {
    pub fn new(
        builder: Box<dyn GraphBuilder>,
        resolver: Box<dyn ArtifactResolver>,
        processor: Box<dyn ArtifactsProcessor>,
        repositories: RepositoryContext,
    ) -> Self {
        Self {
            builder,
            resolver,
            processor,
            repositories,
        }
    }

    pub fn repositories(&self) -> &RepositoryContext {
        &self.repositories
    }

    /// Build, order, resolve and filter, without processing.
    ///
    /// The result is in dependency-first order and may be empty.
    pub fn collect_artifacts(
        &self,
        project: &ProjectContext,
        filter: Option<&dyn ArtifactFilter>,
    ) -> Result<Vec<ResolvedArtifact>, PipelineError> {
        let mut graph = self.builder.build_graph(project)?;
        let order = graph.topological_order()?;
        tracing::debug!("Topological order has {} artifact(s)", order.len());
        resolve_in_order(&mut graph, &order, self.resolver.as_ref(), &self.repositories, filter)
    }

    /// Run the whole pipeline for `project`.
    pub fn run(
        &self,
        project: &ProjectContext,
        filter: Option<&dyn ArtifactFilter>,
    ) -> Result<(), ExecutionFailure> {
        let artifacts = self
            .collect_artifacts(project, filter)
            .map_err(|e| ExecutionFailure::new(COLLECT_FAILURE_MESSAGE, e))?;

        if artifacts.is_empty() {
            tracing::info!("No artifacts to process");
            return Ok(());
        }

        let returned = self
            .processor
            .process(project, &artifacts)
            .map_err(|e| ExecutionFailure::new(PROCESS_FAILURE_MESSAGE, PipelineError::Processing(e)))?;
        tracing::debug!(
            "Processor handled {} artifact(s) and returned {}",
            artifacts.len(),
            returned.len()
        );
        Ok(())
    }
}
