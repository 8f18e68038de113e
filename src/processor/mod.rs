//! Pluggable consumers of the final artifact collection.
//!
//! An [`ArtifactsProcessor`] receives the ordered, resolved and filtered
//! collection together with the [`ProjectContext`]. It gets a shared slice, so
//! the delivered collection is never modified by a processor. The collection it
//! returns is informational; the pipeline logs its size and drops it.
//!
//! Built-in processors:
//!
//! - [`ListingProcessor`]: prints the collection as text or JSON
//! - [`CopyProcessor`]: copies the binaries into a directory in delivery order

pub mod copy;
pub mod listing;

pub use copy::CopyProcessor;
pub use listing::{ListingFormat, ListingProcessor};

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::core::{ProcessingError, ProjectContext, ResolvedArtifact};

/// Consumes the final ordered artifact collection.
pub trait ArtifactsProcessor: Send + Sync {
    /// Process `artifacts`, which are in dependency-first order.
    ///
    /// Never called with an empty slice by the pipeline.
    fn process(
        &self,
        project: &ProjectContext,
        artifacts: &[ResolvedArtifact],
    ) -> Result<Vec<ResolvedArtifact>, ProcessingError>;
}

/// Names accepted by [`by_name`].
pub const PROCESSOR_NAMES: &[&str] = &["list", "json", "copy"];

/// Look up a built-in processor by name.
///
/// `output` overrides the copy destination; the other processors ignore it.
pub fn by_name(name: &str, output: Option<PathBuf>) -> Result<Box<dyn ArtifactsProcessor>> {
    let processor: Box<dyn ArtifactsProcessor> = match name {
        "list" => Box::new(ListingProcessor::new(ListingFormat::Text)),
        "json" => Box::new(ListingProcessor::new(ListingFormat::Json)),
        "copy" => Box::new(match output {
            Some(dir) => CopyProcessor::into_dir(dir),
            None => CopyProcessor::new(),
        }),
        other => bail!("Unknown processor '{}'. Available: {}", other, PROCESSOR_NAMES.join(", ")),
    };
    Ok(processor)
}
