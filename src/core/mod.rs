//! Core types for the artifact pipeline
//!
//! This module holds the vocabulary every other module speaks:
//!
//! - [`ArtifactCoordinate`] - the identity of a dependency artifact
//! - [`ResolutionState`] and [`ResolvedArtifact`] - whether and where an
//!   artifact's binary exists on local storage
//! - [`ProjectContext`] - where the project lives and where processors write
//! - [`error`] - the typed errors of each pipeline stage and the user-facing
//!   [`ErrorContext`] rendering
//!
//! # Examples
//!
//! ```rust
//! use artifact_pipeline::core::ArtifactCoordinate;
//!
//! let coordinate: ArtifactCoordinate = "org.slf4j:slf4j-api:2.0.9".parse().unwrap();
//! assert_eq!(coordinate.file_name(), "slf4j-api-2.0.9.jar");
//! ```

pub mod artifact;
pub mod coordinate;
pub mod error;
pub mod project;

pub use artifact::{ResolutionState, ResolvedArtifact};
pub use coordinate::ArtifactCoordinate;
pub use project::ProjectContext;
pub use error::{
    CoordinateParseError, ErrorContext, ExecutionFailure, GraphBuildError, GraphError,
    PipelineError, ProcessingError, ResolutionError, user_friendly_error,
};
