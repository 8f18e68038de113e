//! The project a pipeline run works on.

use std::path::{Path, PathBuf};

/// Where a project lives and where processors may write.
///
/// Handed to the graph builder (to find the descriptor) and to processors
/// (for output locations). Processors must treat it as read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    descriptor_path: PathBuf,
    base_dir: PathBuf,
    output_dir: PathBuf,
}

impl ProjectContext {
    /// Create a context for the descriptor at `descriptor_path`.
    ///
    /// The base directory is the descriptor's parent and the output directory
    /// defaults to `<base>/target/artifacts`.
    pub fn new(descriptor_path: impl Into<PathBuf>) -> Self {
        let descriptor_path = descriptor_path.into();
        let base_dir = descriptor_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let output_dir = base_dir.join("target").join("artifacts");
        Self {
            descriptor_path,
            base_dir,
            output_dir,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
