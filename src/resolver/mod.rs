//! Dependency graph construction, ordering and resolution.
//!
//! This module holds the algorithmic core of a pipeline run:
//!
//! 1. A [`GraphBuilder`] produces the [`DependencyGraph`] for a project.
//! 2. [`DependencyGraph::topological_order`] linearizes it so every artifact
//!    follows all of its dependencies, failing on cycles.
//! 3. [`resolve_in_order`] walks that order, asks the [`ArtifactResolver`] to
//!    materialize every artifact that has no local binary yet, and applies the
//!    caller's filter to decide what is delivered.
//!
//! # Resolution Policy
//!
//! Resolution is strictly sequential and follows the topological order: a
//! later artifact's resolution may depend on an earlier one already being on
//! local storage. The first failure halts the walk, because every artifact after
//! it may have assumed its presence.
//!
//! The filter only narrows the delivered collection. Every visited artifact is
//! resolved whether or not the filter keeps it.
//!
//! # Collaborators
//!
//! Graph building and resolution are pluggable. The crate ships
//! [`ManifestGraphBuilder`](crate::manifest::ManifestGraphBuilder), which reads an
//! `artifacts.toml` descriptor, and [`RepositoryResolver`], which reads
//! Maven-style repository directories. Hosts can supply their own.

pub mod dependency_graph;
pub mod orchestrator;
pub mod repository;

pub use dependency_graph::{DependencyGraph, NodeId};
pub use orchestrator::resolve_in_order;
pub use repository::RepositoryResolver;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{ArtifactCoordinate, GraphBuildError, ProjectContext, ResolutionError};

/// Produces the raw dependency graph for a project.
pub trait GraphBuilder: Send + Sync {
    /// Build the graph, rooted at the project's own coordinate.
    fn build_graph(&self, project: &ProjectContext) -> Result<DependencyGraph, GraphBuildError>;
}

/// Materializes artifacts on local storage.
///
/// Only called for artifacts that have no known local binary; the returned
/// path must exist when the call succeeds.
pub trait ArtifactResolver: Send + Sync {
    fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        repositories: &RepositoryContext,
    ) -> Result<PathBuf, ResolutionError>;
}

/// A repository artifacts may be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteRepository {
    /// Short name used in logs and error messages
    pub id: String,
    /// Directory path or `file://` URL of the repository root
    pub url: String,
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// The local repository plus the remotes to consult, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    local: PathBuf,
    remotes: Vec<RemoteRepository>,
}

impl RepositoryContext {
    pub fn new(local: impl Into<PathBuf>) -> Self {
        Self {
            local: local.into(),
            remotes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: RemoteRepository) -> Self {
        self.remotes.push(remote);
        self
    }

    pub fn local(&self) -> &Path {
        &self.local
    }

    pub fn remotes(&self) -> &[RemoteRepository] {
        &self.remotes
    }
}
