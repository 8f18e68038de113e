//! Error handling for the artifact pipeline
//!
//! This module provides the typed errors raised at each stage of a pipeline run
//! and the user-friendly reporting used by the CLI. The error system follows two
//! principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Stages
//!
//! Every stage of a run has its own error type:
//! - **Graph construction**: [`GraphBuildError`] (descriptor missing, unparsable,
//!   invalid coordinate) and [`GraphError`] (edge between unknown artifacts)
//! - **Ordering**: [`PipelineError::CyclicDependency`] carrying the cycle
//! - **Resolution**: [`ResolutionError`], raised by an artifact resolver and
//!   wrapped in [`PipelineError::Resolution`] together with the offending coordinate
//! - **Processing**: [`ProcessingError`], raised by a pluggable processor
//!
//! [`PipelineError`] unifies the four stages. The pipeline entry point surfaces
//! any of them as a single [`ExecutionFailure`] whose `source()` is the original
//! cause; nothing is retried or suppressed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use artifact_pipeline::core::{ArtifactCoordinate, PipelineError, user_friendly_error};
//!
//! let a = ArtifactCoordinate::new("com.example", "a", "1.0");
//! let b = ArtifactCoordinate::new("com.example", "b", "1.0");
//! let error = PipelineError::CyclicDependency {
//!     cycle: vec![a.clone(), b, a],
//! };
//!
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // Shows the cycle with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::coordinate::ArtifactCoordinate;

/// A coordinate string could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid artifact coordinate '{input}': {reason}")]
pub struct CoordinateParseError {
    /// The text that failed to parse
    pub input: String,
    /// Why it was rejected
    pub reason: String,
}

/// Structural misuse of a [`DependencyGraph`](crate::resolver::DependencyGraph).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge referenced a coordinate that was never added as a node
    #[error("Artifact '{coordinate}' is not part of the dependency graph")]
    UnknownArtifact {
        /// The coordinate that has no node
        coordinate: ArtifactCoordinate,
    },
}

/// The dependency graph for a project could not be constructed.
///
/// Fatal: a run that hits this error aborts before ordering begins.
#[derive(Error, Debug)]
pub enum GraphBuildError {
    /// The project descriptor does not exist
    #[error("Project descriptor not found: {}", path.display())]
    DescriptorNotFound {
        /// Where the descriptor was expected
        path: PathBuf,
    },

    /// The project descriptor exists but could not be read
    #[error("Failed to read project descriptor {}", path.display())]
    Io {
        /// Path of the descriptor
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The project descriptor is not valid TOML for the expected schema
    #[error("Invalid project descriptor syntax in {}", path.display())]
    Parse {
        /// Path of the descriptor
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// The descriptor names an artifact with a malformed coordinate
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateParseError),

    /// The builder wired the graph inconsistently
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// An individual artifact could not be materialized on local storage.
///
/// Raised by [`ArtifactResolver`](crate::resolver::ArtifactResolver)
/// implementations. The orchestrator wraps it in
/// [`PipelineError::Resolution`] and halts the run.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// No repository holds the artifact
    #[error("Artifact '{coordinate}' not found in any repository")]
    NotFound {
        /// The missing artifact
        coordinate: ArtifactCoordinate,
        /// Locations that were searched, in order
        searched: Vec<String>,
    },

    /// The remote copy does not match its published digest
    #[error("Checksum mismatch for '{coordinate}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The artifact whose digest did not match
        coordinate: ArtifactCoordinate,
        /// Digest published next to the artifact
        expected: String,
        /// Digest computed from the downloaded bytes
        actual: String,
    },

    /// The coordinate maps to a location outside the repository root
    #[error("Artifact '{coordinate}' maps outside the repository: {}", path.display())]
    OutsideRepository {
        /// The offending artifact
        coordinate: ArtifactCoordinate,
        /// Layout path derived from the coordinate
        path: PathBuf,
    },

    /// The repository URL uses a scheme this resolver cannot read
    #[error("Unsupported repository URL: {url}")]
    UnsupportedRepository {
        /// The offending URL
        url: String,
    },

    /// Reading or copying the artifact failed
    #[error("I/O error at {}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A pluggable processor failed.
///
/// Carries the artifacts involved in the failure (possibly empty) and an
/// optional underlying cause.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ProcessingError {
    message: String,
    artifacts: Vec<ArtifactCoordinate>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ProcessingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            artifacts: Vec::new(),
            source: None,
        }
    }

    /// Record the artifacts that caused the failure.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: impl IntoIterator<Item = ArtifactCoordinate>) -> Self {
        self.artifacts = artifacts.into_iter().collect();
        self
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The artifacts that caused the failure.
    pub fn artifacts(&self) -> &[ArtifactCoordinate] {
        &self.artifacts
    }
}

/// Any failure of a pipeline stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The dependency graph could not be built
    #[error(transparent)]
    GraphBuild(#[from] GraphBuildError),

    /// Ordering found a cycle; `cycle` starts and ends with the same artifact
    #[error("Circular dependency detected: {}", format_cycle(cycle))]
    CyclicDependency {
        /// Artifacts along the cycle, closing on the first one
        cycle: Vec<ArtifactCoordinate>,
    },

    /// An artifact could not be resolved
    #[error("Failed to resolve artifact '{coordinate}'")]
    Resolution {
        /// The artifact that failed
        coordinate: ArtifactCoordinate,
        /// The resolver's error
        #[source]
        source: ResolutionError,
    },

    /// The processor failed
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Render a cycle as `a → b → a`.
pub fn format_cycle(cycle: &[ArtifactCoordinate]) -> String {
    cycle.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ")
}

/// The single failure surfaced to the host after a run.
///
/// The message says which phase failed; [`cause`](Self::cause) (also exposed
/// through `source()`) is the stage error that triggered it.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ExecutionFailure {
    message: String,
    #[source]
    cause: PipelineError,
}

impl ExecutionFailure {
    pub fn new(message: impl Into<String>, cause: PipelineError) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &PipelineError {
        &self.cause
    }

    pub fn into_cause(self) -> PipelineError {
        self.cause
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` holds the main message plus optional details and a
/// suggestion. This is how the CLI presents failures.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use artifact_pipeline::core::ErrorContext;
///
/// let context = ErrorContext::new("Artifact 'g:a:1' not found in any repository")
///     .with_details("Searched: /home/me/.artpipe/repository")
///     .with_suggestion("Add a repository with --repository");
/// context.display();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The main error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`ExecutionFailure`], [`PipelineError`] and the stage errors
/// (also when they are buried in an `anyhow` context chain), and falls back to
/// the full cause chain for anything else.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(failure) = cause.downcast_ref::<ExecutionFailure>() {
            let context = pipeline_error_context(failure.cause());
            return ErrorContext {
                message: format!("{}: {}", failure.message(), context.message),
                ..context
            };
        }
        if let Some(pipeline_error) = cause.downcast_ref::<PipelineError>() {
            return pipeline_error_context(pipeline_error);
        }
        if let Some(build_error) = cause.downcast_ref::<GraphBuildError>() {
            return graph_build_error_context(build_error);
        }
        if let Some(toml_error) = cause.downcast_ref::<toml::de::Error>() {
            return ErrorContext::new(format!("Invalid configuration syntax: {toml_error}"))
                .with_suggestion("Check the TOML syntax of the configuration file. Verify quotes, brackets, and indentation");
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

fn pipeline_error_context(error: &PipelineError) -> ErrorContext {
    match error {
        PipelineError::GraphBuild(build_error) => graph_build_error_context(build_error),
        PipelineError::CyclicDependency {
            cycle,
        } => ErrorContext::new(error.to_string())
            .with_details(format!(
                "{} artifact(s) depend on each other in a loop, so no dependency-first order exists",
                cycle.len().saturating_sub(1)
            ))
            .with_suggestion("Remove one of the dependency edges along the cycle in the project descriptor"),
        PipelineError::Resolution {
            coordinate,
            source,
        } => {
            let context = ErrorContext::new(format!("Failed to resolve artifact '{coordinate}': {source}"));
            match source {
                ResolutionError::NotFound {
                    searched, ..
                } => context
                    .with_details(format!("Searched: {}", searched.join(", ")))
                    .with_suggestion("Add a repository that hosts the artifact with --repository or in the [[repositories]] config section"),
                ResolutionError::ChecksumMismatch {
                    ..
                } => context.with_suggestion(
                    "The repository copy may be corrupted; republish it or remove the stale .sha256 file",
                ),
                ResolutionError::OutsideRepository {
                    ..
                } => context.with_suggestion(
                    "Coordinate segments must not contain path separators or '..'; fix the coordinate in the project descriptor",
                ),
                ResolutionError::UnsupportedRepository {
                    ..
                } => context.with_suggestion("Use a local directory or a file:// URL for repositories"),
                ResolutionError::Io {
                    ..
                } => context.with_suggestion("Check permissions on the local repository directory"),
            }
        }
        PipelineError::Processing(processing_error) => {
            let context = ErrorContext::new(format!("Processing failed: {processing_error}"));
            if processing_error.artifacts().is_empty() {
                context
            } else {
                context.with_details(format!(
                    "Artifacts involved: {}",
                    processing_error
                        .artifacts()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        }
    }
}

fn graph_build_error_context(error: &GraphBuildError) -> ErrorContext {
    match error {
        GraphBuildError::DescriptorNotFound {
            ..
        } => ErrorContext::new(error.to_string()).with_suggestion(
            "Create an artifacts.toml in the project directory or pass --manifest-path",
        ),
        GraphBuildError::Parse {
            source, ..
        } => ErrorContext::new(error.to_string())
            .with_details(source.to_string())
            .with_suggestion("Check the [project] table and the [artifacts] entries of the descriptor"),
        GraphBuildError::InvalidCoordinate(_) => ErrorContext::new(error.to_string())
            .with_suggestion("Write coordinates as group:name:version[:type[:classifier]]"),
        GraphBuildError::Io {
            source, ..
        } => ErrorContext::new(error.to_string()).with_details(source.to_string()),
        GraphBuildError::Graph(_) => ErrorContext::new(error.to_string()),
    }
}
