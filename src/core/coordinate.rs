//! Artifact coordinates.
//!
//! An [`ArtifactCoordinate`] is the identity of a dependency: group, name,
//! version, an optional classifier and a packaging type. Two coordinates are
//! the same artifact exactly when all five fields are equal.
//!
//! # Textual Form
//!
//! Coordinates are written as `group:name:version[:type[:classifier]]`:
//!
//! ```text
//! org.slf4j:slf4j-api:2.0.9
//! com.example:core:1.2.0:test-jar
//! com.example:native:3.1.0:jar:linux-x86_64
//! ```
//!
//! When the type is omitted it defaults to [`DEFAULT_ARTIFACT_TYPE`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_ARTIFACT_TYPE;
use crate::core::error::CoordinateParseError;

/// Identity of a dependency artifact.
///
/// Immutable once constructed; the graph keys nodes by coordinate, so fields
/// are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    group: String,
    name: String,
    version: String,
    #[serde(rename = "type")]
    artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
}

impl ArtifactCoordinate {
    /// Create a coordinate with the default type and no classifier.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            artifact_type: DEFAULT_ARTIFACT_TYPE.to_string(),
            classifier: None,
        }
    }

    /// Return a copy of this coordinate with a different packaging type.
    #[must_use]
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    /// Return a copy of this coordinate with a classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// File extension used for this artifact's binary in a repository layout.
    ///
    /// Several packaging types ship as plain jars; everything else uses the
    /// type name as the extension.
    pub fn extension(&self) -> &str {
        match self.artifact_type.as_str() {
            "test-jar" | "maven-plugin" | "ejb" | "bundle" | "java-source" | "javadoc" => "jar",
            other => other,
        }
    }

    /// File name of this artifact's binary: `name-version[-classifier].ext`.
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => {
                format!("{}-{}-{}.{}", self.name, self.version, classifier, self.extension())
            }
            None => format!("{}-{}.{}", self.name, self.version, self.extension()),
        }
    }

    /// Every field rendered in pattern order: `group:name:version:type:classifier`.
    ///
    /// The classifier segment is empty when absent. Used by pattern filters so
    /// that partial patterns line up with a fixed segment layout.
    pub fn segments(&self) -> [&str; 5] {
        [
            self.group.as_str(),
            self.name.as_str(),
            self.version.as_str(),
            self.artifact_type.as_str(),
            self.classifier.as_deref().unwrap_or(""),
        ]
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        match &self.classifier {
            Some(classifier) => write!(f, ":{}:{}", self.artifact_type, classifier),
            None if self.artifact_type != DEFAULT_ARTIFACT_TYPE => {
                write!(f, ":{}", self.artifact_type)
            }
            None => Ok(()),
        }
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(3..=5).contains(&parts.len()) {
            return Err(CoordinateParseError {
                input: s.to_string(),
                reason: format!(
                    "expected group:name:version[:type[:classifier]], found {} segment(s)",
                    parts.len()
                ),
            });
        }

        if let Some(position) = parts.iter().position(|part| part.trim().is_empty()) {
            return Err(CoordinateParseError {
                input: s.to_string(),
                reason: format!("segment {} is empty", position + 1),
            });
        }

        if let Some(position) = parts.iter().position(|part| !is_plain_segment(part.trim())) {
            return Err(CoordinateParseError {
                input: s.to_string(),
                reason: format!("segment {} must not contain '/', '\\' or '..'", position + 1),
            });
        }

        let mut coordinate = Self::new(parts[0].trim(), parts[1].trim(), parts[2].trim());
        if let Some(artifact_type) = parts.get(3) {
            coordinate = coordinate.with_type(artifact_type.trim());
        }
        if let Some(classifier) = parts.get(4) {
            coordinate = coordinate.with_classifier(classifier.trim());
        }
        Ok(coordinate)
    }
}

/// Segments become path components in a repository layout.
fn is_plain_segment(segment: &str) -> bool {
    !segment.contains(['/', '\\']) && !segment.contains("..")
}
