//! artifact-pipeline: dependency-ordered artifact resolution and processing.
//!
//! Given a project and its dependency graph, the pipeline
//!
//! 1. builds the graph with a [`resolver::GraphBuilder`],
//! 2. orders it so every artifact follows all of its dependencies, rejecting
//!    cycles,
//! 3. resolves every artifact that has no local binary yet, strictly in that
//!    order,
//! 4. filters the delivered set, and
//! 5. hands the ordered collection to a pluggable
//!    [`processor::ArtifactsProcessor`].
//!
//! # Example
//!
//! ```rust,no_run
//! use artifact_pipeline::core::ProjectContext;
//! use artifact_pipeline::manifest::ManifestGraphBuilder;
//! use artifact_pipeline::pipeline::ArtifactPipeline;
//! use artifact_pipeline::processor::{ListingFormat, ListingProcessor};
//! use artifact_pipeline::resolver::{RepositoryContext, RepositoryResolver};
//!
//! # fn example() -> anyhow::Result<()> {
//! let pipeline = ArtifactPipeline::new(
//!     Box::new(ManifestGraphBuilder::new()),
//!     Box::new(RepositoryResolver::new()),
//!     Box::new(ListingProcessor::new(ListingFormat::Text)),
//!     RepositoryContext::new("/home/me/.artpipe/repository"),
//! );
//! pipeline.run(&ProjectContext::new("artifacts.toml"), None)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`core`]: coordinates, resolved artifacts, project context, errors
//! - [`resolver`]: dependency graph, topological order, resolution
//! - [`filter`]: artifact filters
//! - [`processor`]: the processor seam and built-in processors
//! - [`pipeline`]: the end-to-end run
//! - [`manifest`]: `artifacts.toml` parsing and graph building
//! - [`config`]: global configuration
//! - [`cli`]: the `artpipe` command line

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod filter;
pub mod manifest;
pub mod pipeline;
pub mod processor;
pub mod resolver;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
