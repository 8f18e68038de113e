//! Copies the delivered collection into a directory.
//!
//! Each file is named `<ordinal>-<file name>`, with the ordinal zero-padded to
//! the width of the collection size (at least three digits), so a plain
//! directory listing shows the artifacts in dependency-first order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ProcessingError, ProjectContext, ResolvedArtifact};

use super::ArtifactsProcessor;

const MIN_ORDINAL_WIDTH: usize = 3;

/// Copies artifact binaries, in order, into an output directory.
#[derive(Debug, Clone, Default)]
pub struct CopyProcessor {
    target: Option<PathBuf>,
}

impl CopyProcessor {
    /// Copy into the project's output directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy into `dir` instead of the project's output directory.
    pub fn into_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Some(dir.into()),
        }
    }

    fn target_dir<'a>(&'a self, project: &'a ProjectContext) -> &'a Path {
        self.target.as_deref().unwrap_or_else(|| project.output_dir())
    }
}

/// File name of the artifact at `index` in a collection of `total`.
pub fn ordered_file_name(index: usize, total: usize, artifact: &ResolvedArtifact) -> String {
    let width = total.to_string().len().max(MIN_ORDINAL_WIDTH);
    format!("{:0width$}-{}", index + 1, artifact.coordinate().file_name())
}

impl ArtifactsProcessor for CopyProcessor {
    fn process(
        &self,
        project: &ProjectContext,
        artifacts: &[ResolvedArtifact],
    ) -> Result<Vec<ResolvedArtifact>, ProcessingError> {
        let target = self.target_dir(project);
        fs::create_dir_all(target).map_err(|e| {
            ProcessingError::new(format!("Failed to create output directory {}", target.display()))
                .with_source(e)
        })?;

        let mut copied = Vec::with_capacity(artifacts.len());
        for (index, artifact) in artifacts.iter().enumerate() {
            let destination = target.join(ordered_file_name(index, artifacts.len(), artifact));
            fs::copy(artifact.path(), &destination).map_err(|e| {
                ProcessingError::new(format!(
                    "Failed to copy {} to {}",
                    artifact.coordinate(),
                    destination.display()
                ))
                .with_artifacts([artifact.coordinate().clone()])
                .with_source(e)
            })?;
            tracing::debug!("Copied {} to {}", artifact.coordinate(), destination.display());
            copied.push(ResolvedArtifact::new(artifact.coordinate().clone(), destination));
        }

        tracing::info!("Copied {} artifact(s) to {}", copied.len(), target.display());
        Ok(copied)
    }
}
