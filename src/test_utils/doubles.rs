//! Pipeline collaborators for tests.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::core::{
    ArtifactCoordinate, ProcessingError, ProjectContext, ResolutionError, ResolvedArtifact,
};
use crate::processor::ArtifactsProcessor;
use crate::resolver::{ArtifactResolver, RepositoryContext};

/// Processor that records every collection it is handed.
///
/// Clones share the same record, so a test can keep one handle and give the
/// other to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RecordingProcessor {
    calls: Arc<Mutex<Vec<Vec<ResolvedArtifact>>>>,
    failure: Option<String>,
}

impl RecordingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A processor that records, then fails with `message` naming the first artifact.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Every collection received, in call order.
    pub fn calls(&self) -> Vec<Vec<ResolvedArtifact>> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the artifacts from the most recent call.
    pub fn last_names(&self) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|call| call.iter().map(|a| a.coordinate().name().to_string()).collect())
    }
}

impl ArtifactsProcessor for RecordingProcessor {
    fn process(
        &self,
        _project: &ProjectContext,
        artifacts: &[ResolvedArtifact],
    ) -> Result<Vec<ResolvedArtifact>, ProcessingError> {
        self.calls.lock().unwrap().push(artifacts.to_vec());
        match &self.failure {
            Some(message) => Err(ProcessingError::new(message.clone())
                .with_artifacts(artifacts.first().map(|a| a.coordinate().clone()))),
            None => Ok(artifacts.to_vec()),
        }
    }
}

/// Resolver answering from a fixed script.
///
/// Artifacts with a scripted path resolve to it, artifacts marked as failing
/// return [`ResolutionError::NotFound`], and anything else resolves to
/// `/scripted/<file name>`. Every call is recorded by coordinate name.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    paths: HashMap<ArtifactCoordinate, PathBuf>,
    failures: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_path(mut self, coordinate: ArtifactCoordinate, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(coordinate, path.into());
        self
    }

    /// Fail every artifact whose name is `name`.
    #[must_use]
    pub fn failing_on(mut self, name: impl Into<String>) -> Self {
        self.failures.insert(name.into());
        self
    }

    /// Names of the artifacts the resolver was asked for, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ArtifactResolver for ScriptedResolver {
    fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        repositories: &RepositoryContext,
    ) -> Result<PathBuf, ResolutionError> {
        self.calls.lock().unwrap().push(coordinate.name().to_string());
        if self.failures.contains(coordinate.name()) {
            return Err(ResolutionError::NotFound {
                coordinate: coordinate.clone(),
                searched: vec![repositories.local().display().to_string()],
            });
        }
        Ok(self
            .paths
            .get(coordinate)
            .cloned()
            .unwrap_or_else(|| PathBuf::from("/scripted").join(coordinate.file_name())))
    }
}
