//! Filesystem repository resolver.
//!
//! Resolves artifacts against Maven-style repository directories:
//!
//! ```text
//! <root>/com/example/core/1.2.0/core-1.2.0.jar
//! <root>/com/example/core/1.2.0/core-1.2.0.jar.sha256   (optional digest)
//! ```
//!
//! The local repository is consulted first. On a miss each remote is tried in
//! order; a hit is verified against its `.sha256` sidecar when one exists and
//! then copied into the local repository, which is where the returned path
//! points. Remotes are directory paths or `file://` URLs.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::constants::CHECKSUM_EXTENSION;
use crate::core::{ArtifactCoordinate, ResolutionError};

use super::{ArtifactResolver, RemoteRepository, RepositoryContext};

/// [`ArtifactResolver`] over local and file-based remote repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepositoryResolver;

impl RepositoryResolver {
    pub fn new() -> Self {
        Self
    }

    /// Path of an artifact relative to a repository root.
    pub fn layout_path(coordinate: &ArtifactCoordinate) -> PathBuf {
        let mut path: PathBuf = coordinate.group().split('.').collect();
        path.push(coordinate.name());
        path.push(coordinate.version());
        path.push(coordinate.file_name());
        path
    }

    /// [`Self::layout_path`], rejected unless every component is a plain name.
    ///
    /// Coordinates built with [`ArtifactCoordinate::new`] are not checked by
    /// the parser.
    fn contained_layout_path(coordinate: &ArtifactCoordinate) -> Result<PathBuf, ResolutionError> {
        let relative = Self::layout_path(coordinate);
        let plain = relative.components().all(|component| matches!(component, Component::Normal(_)));
        if plain && !relative.as_os_str().to_string_lossy().contains('\\') {
            Ok(relative)
        } else {
            Err(ResolutionError::OutsideRepository {
                coordinate: coordinate.clone(),
                path: relative,
            })
        }
    }

    fn remote_root(remote: &RemoteRepository) -> Result<PathBuf, ResolutionError> {
        if let Some(path) = remote.url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if remote.url.contains("://") {
            return Err(ResolutionError::UnsupportedRepository {
                url: remote.url.clone(),
            });
        }
        Ok(PathBuf::from(&remote.url))
    }

    /// Compare the file's SHA-256 against its sidecar, if the sidecar exists.
    fn verify_checksum(coordinate: &ArtifactCoordinate, file: &Path) -> Result<(), ResolutionError> {
        let sidecar = checksum_path(file);
        let expected = match fs::read_to_string(&sidecar) {
            Ok(content) => content.split_whitespace().next().unwrap_or_default().to_lowercase(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No checksum published for {}", coordinate);
                return Ok(());
            }
            Err(source) => {
                return Err(ResolutionError::Io {
                    path: sidecar,
                    source,
                });
            }
        };

        let actual = sha256_hex(file)?;
        if actual != expected {
            return Err(ResolutionError::ChecksumMismatch {
                coordinate: coordinate.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Copy `source` to `target` through a temporary file in the target directory.
    fn install(source: &Path, target: &Path) -> Result<(), ResolutionError> {
        let parent = target.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(io_error(parent))?;

        let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(io_error(parent))?;
        let mut input = File::open(source).map_err(io_error(source))?;
        io::copy(&mut input, staged.as_file_mut()).map_err(io_error(target))?;
        staged.persist(target).map_err(|e| ResolutionError::Io {
            path: target.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl ArtifactResolver for RepositoryResolver {
    fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        repositories: &RepositoryContext,
    ) -> Result<PathBuf, ResolutionError> {
        let relative = Self::contained_layout_path(coordinate)?;
        let local = repositories.local().join(&relative);
        if local.is_file() {
            tracing::debug!("Found {} in local repository", coordinate);
            return Ok(local);
        }

        let mut searched = vec![local.display().to_string()];
        for remote in repositories.remotes() {
            let candidate = Self::remote_root(remote)?.join(&relative);
            searched.push(format!("{} ({})", remote.id, candidate.display()));
            if !candidate.is_file() {
                continue;
            }

            Self::verify_checksum(coordinate, &candidate)?;
            Self::install(&candidate, &local)?;
            tracing::info!("Fetched {} from {}", coordinate, remote.id);
            return Ok(local);
        }

        Err(ResolutionError::NotFound {
            coordinate: coordinate.clone(),
            searched,
        })
    }
}

/// Location of the digest sidecar for an artifact file.
pub fn checksum_path(file: &Path) -> PathBuf {
    let mut name = file.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(CHECKSUM_EXTENSION);
    file.with_file_name(name)
}

/// Hex-encoded SHA-256 of a file's contents.
pub fn sha256_hex(file: &Path) -> Result<String, ResolutionError> {
    let mut hasher = Sha256::new();
    let mut input = File::open(file).map_err(io_error(file))?;
    io::copy(&mut input, &mut hasher).map_err(io_error(file))?;
    Ok(hex::encode(hasher.finalize()))
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ResolutionError + use<> {
    let path = path.to_path_buf();
    move |source| ResolutionError::Io {
        path,
        source,
    }
}
