//! Resolution state and resolved artifacts.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::coordinate::ArtifactCoordinate;

/// Whether an artifact's binary is known to exist on local storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolutionState {
    /// No local binary is known yet.
    #[default]
    Unresolved,
    /// The binary is present at this local path.
    Resolved(PathBuf),
}

impl ResolutionState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The local path, if resolved.
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Unresolved => None,
        }
    }
}

/// A coordinate paired with a binary guaranteed to be present locally.
///
/// Produced by the resolution orchestrator and handed to processors;
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    coordinate: ArtifactCoordinate,
    path: PathBuf,
}

impl ResolvedArtifact {
    pub fn new(coordinate: ArtifactCoordinate, path: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            path: path.into(),
        }
    }

    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
