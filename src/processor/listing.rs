//! Prints the delivered collection.

use serde::Serialize;
use std::path::Path;

use crate::core::{ProcessingError, ProjectContext, ResolvedArtifact};

use super::ArtifactsProcessor;

/// Output format of a [`ListingProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    /// One `coordinate -> path` line per artifact.
    Text,
    /// A pretty-printed JSON document.
    Json,
}

#[derive(Serialize)]
struct Listing<'a> {
    project: &'a Path,
    artifacts: Vec<ListingEntry<'a>>,
}

#[derive(Serialize)]
struct ListingEntry<'a> {
    coordinate: String,
    #[serde(rename = "type")]
    artifact_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    classifier: Option<&'a str>,
    path: &'a Path,
}

/// Writes the collection to stdout in delivery order.
#[derive(Debug, Clone, Copy)]
pub struct ListingProcessor {
    format: ListingFormat,
}

impl ListingProcessor {
    pub fn new(format: ListingFormat) -> Self {
        Self {
            format,
        }
    }

    pub fn format(&self) -> ListingFormat {
        self.format
    }

    /// Render the listing without printing it.
    pub fn render(
        &self,
        project: &ProjectContext,
        artifacts: &[ResolvedArtifact],
    ) -> Result<String, ProcessingError> {
        match self.format {
            ListingFormat::Text => Ok(artifacts
                .iter()
                .map(|artifact| format!("{} -> {}\n", artifact.coordinate(), artifact.path().display()))
                .collect()),
            ListingFormat::Json => {
                let listing = Listing {
                    project: project.descriptor_path(),
                    artifacts: artifacts
                        .iter()
                        .map(|artifact| ListingEntry {
                            coordinate: artifact.coordinate().to_string(),
                            artifact_type: artifact.coordinate().artifact_type(),
                            classifier: artifact.coordinate().classifier(),
                            path: artifact.path(),
                        })
                        .collect(),
                };
                serde_json::to_string_pretty(&listing)
                    .map(|mut json| {
                        json.push('\n');
                        json
                    })
                    .map_err(|e| ProcessingError::new("Failed to serialize artifact listing").with_source(e))
            }
        }
    }
}

impl ArtifactsProcessor for ListingProcessor {
    fn process(
        &self,
        project: &ProjectContext,
        artifacts: &[ResolvedArtifact],
    ) -> Result<Vec<ResolvedArtifact>, ProcessingError> {
        print!("{}", self.render(project, artifacts)?);
        Ok(artifacts.to_vec())
    }
}
