//! Project descriptor parsing and graph building.
//!
//! This module reads `artifacts.toml` project descriptors and turns them into a
//! [`DependencyGraph`] through [`ManifestGraphBuilder`], the crate's own
//! [`GraphBuilder`]. Hosts with their own metadata source implement
//! [`GraphBuilder`] instead.
//!
//! # Basic Structure
//!
//! ```toml
//! [project]
//! group = "com.example"
//! name = "app"
//! version = "1.0.0"
//! dependencies = ["com.example:core:1.2.0", "org.slf4j:slf4j-simple:2.0.9"]
//!
//! [artifacts."com.example:core:1.2.0"]
//! dependencies = ["org.slf4j:slf4j-api:2.0.9"]
//!
//! [artifacts."org.slf4j:slf4j-simple:2.0.9"]
//! dependencies = ["org.slf4j:slf4j-api:2.0.9"]
//! path = "libs/slf4j-simple-2.0.9.jar"
//! ```
//!
//! - `project.dependencies` are the project's direct dependencies, in order.
//! - Each `[artifacts."<coordinate>"]` entry lists that artifact's own
//!   dependencies. Artifacts without an entry are leaves.
//! - `path` marks an artifact as already materialized; relative paths are
//!   taken from the descriptor's directory. A `path` that does not exist is
//!   ignored with a warning and the artifact goes through resolution.
//!
//! Edges are added in declaration order, which fixes the order children are
//! visited in and therefore the topological order.

pub mod helpers;

pub use helpers::{find_manifest, find_manifest_from, find_manifest_with_optional};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::{ArtifactCoordinate, GraphBuildError, ProjectContext};
use crate::resolver::{DependencyGraph, GraphBuilder};

/// A parsed `artifacts.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectManifest {
    /// The project itself and its direct dependencies.
    pub project: ProjectSection,
    /// Per-artifact metadata keyed by coordinate string.
    #[serde(default)]
    pub artifacts: BTreeMap<String, ArtifactEntry>,
}

/// The `[project]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectSection {
    pub group: String,
    pub name: String,
    pub version: String,
    /// Packaging type of the project; defaults to `jar`.
    #[serde(default, rename = "type")]
    pub artifact_type: Option<String>,
    /// Direct dependencies as coordinate strings.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ProjectSection {
    /// The project's own coordinate, the root of its graph.
    pub fn coordinate(&self) -> ArtifactCoordinate {
        let coordinate = ArtifactCoordinate::new(&self.group, &self.name, &self.version);
        match &self.artifact_type {
            Some(artifact_type) => coordinate.with_type(artifact_type),
            None => coordinate,
        }
    }
}

/// One `[artifacts."<coordinate>"]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtifactEntry {
    /// Dependencies of this artifact as coordinate strings.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Local binary, if already materialized.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ProjectManifest {
    /// Load and parse a descriptor.
    pub fn load(path: &Path) -> Result<Self, GraphBuildError> {
        if !path.exists() {
            return Err(GraphBuildError::DescriptorNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| GraphBuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse descriptor text; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, GraphBuildError> {
        toml::from_str(content).map_err(|source| GraphBuildError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the dependency graph, resolving relative `path`s against `base_dir`.
    pub fn to_graph(&self, base_dir: &Path) -> Result<DependencyGraph, GraphBuildError> {
        let root = self.project.coordinate();
        let mut graph = DependencyGraph::new(root.clone());

        for dependency in &self.project.dependencies {
            let to: ArtifactCoordinate = dependency.parse()?;
            graph.add_node(to.clone());
            graph.add_edge(&root, &to)?;
        }

        for (key, entry) in &self.artifacts {
            let from: ArtifactCoordinate = key.parse()?;
            let id = graph.add_node(from.clone());

            if let Some(path) = &entry.path {
                let local = base_dir.join(path);
                if local.is_file() {
                    graph.mark_resolved(id, local);
                } else {
                    tracing::warn!(
                        "Declared path {} for {} does not exist; it will be resolved",
                        local.display(),
                        from
                    );
                }
            }

            for dependency in &entry.dependencies {
                let to: ArtifactCoordinate = dependency.parse()?;
                graph.add_node(to.clone());
                graph.add_edge(&from, &to)?;
            }
        }

        tracing::debug!(
            "Built dependency graph for {}: {} node(s), {} edge(s)",
            root,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// [`GraphBuilder`] reading the project's `artifacts.toml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestGraphBuilder;

impl ManifestGraphBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl GraphBuilder for ManifestGraphBuilder {
    fn build_graph(&self, project: &ProjectContext) -> Result<DependencyGraph, GraphBuildError> {
        let manifest = ProjectManifest::load(project.descriptor_path())?;
        manifest.to_graph(project.base_dir())
    }
}
