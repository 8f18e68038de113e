//! Descriptor fixtures and on-disk test projects.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::MANIFEST_FILENAME;
use crate::core::{ArtifactCoordinate, ProjectContext};
use crate::resolver::RepositoryResolver;
use crate::resolver::repository::checksum_path;

/// Ready-made `artifacts.toml` contents.
#[derive(Clone, Debug)]
pub struct ManifestFixture {
    pub content: String,
    pub name: String,
}

impl ManifestFixture {
    /// `app -> A -> B -> C`, delivered as `[C, B, A]`.
    pub fn chain() -> Self {
        Self {
            name: "chain".to_string(),
            content: r#"
[project]
group = "com.example"
name = "app"
version = "1.0.0"
dependencies = ["com.example:A:1.0"]

[artifacts."com.example:A:1.0"]
dependencies = ["com.example:B:1.0"]

[artifacts."com.example:B:1.0"]
dependencies = ["com.example:C:1.0"]
"#
            .trim()
            .to_string(),
        }
    }

    /// `app -> A -> B -> A`.
    pub fn cycle() -> Self {
        Self {
            name: "cycle".to_string(),
            content: r#"
[project]
group = "com.example"
name = "app"
version = "1.0.0"
dependencies = ["com.example:A:1.0"]

[artifacts."com.example:A:1.0"]
dependencies = ["com.example:B:1.0"]

[artifacts."com.example:B:1.0"]
dependencies = ["com.example:A:1.0"]
"#
            .trim()
            .to_string(),
        }
    }

    /// `app -> {A, B}`, `A -> D`, `B -> D`, delivered as `[D, A, B]`.
    pub fn diamond() -> Self {
        Self {
            name: "diamond".to_string(),
            content: r#"
[project]
group = "com.example"
name = "app"
version = "1.0.0"
dependencies = ["com.example:A:1.0", "org.other:B:2.0"]

[artifacts."com.example:A:1.0"]
dependencies = ["com.example:D:1.0"]

[artifacts."org.other:B:2.0"]
dependencies = ["com.example:D:1.0"]
"#
            .trim()
            .to_string(),
        }
    }

    /// A project with no dependencies.
    pub fn empty() -> Self {
        Self {
            name: "empty".to_string(),
            content: "[project]\ngroup = \"com.example\"\nname = \"app\"\nversion = \"1.0.0\"\n"
                .to_string(),
        }
    }

    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: "[project\ngroup = \"com.example\"\n".to_string(),
        }
    }

    /// Write as `artifacts.toml` in `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILENAME);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write {} fixture", self.name))?;
        Ok(path)
    }
}

/// A Maven-style repository directory.
#[derive(Debug, Clone)]
pub struct RepositoryFixture {
    root: PathBuf,
}

impl RepositoryFixture {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `file://` URL of the repository root.
    pub fn url(&self) -> String {
        format!("file://{}", self.root.display())
    }

    /// Where `coordinate` lives in this repository.
    pub fn path_of(&self, coordinate: &ArtifactCoordinate) -> PathBuf {
        self.root.join(RepositoryResolver::layout_path(coordinate))
    }

    /// Publish `content` for `coordinate`.
    pub fn publish(&self, coordinate: &ArtifactCoordinate, content: &[u8]) -> Result<PathBuf> {
        let path = self.path_of(coordinate);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to publish {coordinate} to {}", path.display()))?;
        Ok(path)
    }

    /// Publish `content` together with its `.sha256` sidecar.
    pub fn publish_with_checksum(
        &self,
        coordinate: &ArtifactCoordinate,
        content: &[u8],
    ) -> Result<PathBuf> {
        let path = self.publish(coordinate, content)?;
        fs::write(checksum_path(&path), hex::encode(Sha256::digest(content)))?;
        Ok(path)
    }

    pub fn contains(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.path_of(coordinate).is_file()
    }
}

/// A temporary project directory with its own local and remote repositories.
///
/// ```text
/// <temp>/project/artifacts.toml
/// <temp>/local/      local repository
/// <temp>/remote/     remote repository
/// ```
pub struct TestProject {
    temp: TempDir,
    pub local: RepositoryFixture,
    pub remote: RepositoryFixture,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        for dir in ["project", "local", "remote"] {
            fs::create_dir_all(temp.path().join(dir))?;
        }
        let local = RepositoryFixture::new(temp.path().join("local"));
        let remote = RepositoryFixture::new(temp.path().join("remote"));
        Ok(Self {
            temp,
            local,
            remote,
        })
    }

    /// Create a project and write `manifest` into it.
    pub fn with_manifest(manifest: &ManifestFixture) -> Result<Self> {
        let project = Self::new()?;
        manifest.write_to(&project.project_dir())?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn project_dir(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir().join(MANIFEST_FILENAME)
    }

    pub fn context(&self) -> ProjectContext {
        ProjectContext::new(self.manifest_path())
    }

    /// Write a global config pointing at this project's repositories.
    pub fn write_global_config(&self) -> Result<PathBuf> {
        let path = self.temp.path().join("config.toml");
        let content = format!(
            "local_repository = {:?}\n\n[[repositories]]\nid = \"remote\"\nurl = {:?}\n",
            self.local.root().display().to_string(),
            self.remote.url()
        );
        fs::write(&path, content)?;
        Ok(path)
    }
}
