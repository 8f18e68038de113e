//! Sequential resolution of an ordered artifact list.

use std::path::Path;

use crate::core::{PipelineError, ResolvedArtifact};
use crate::filter::{ArtifactFilter, keeps};

use super::{ArtifactResolver, DependencyGraph, NodeId, RepositoryContext};

/// Resolve every artifact in `order` and return the ones the filter keeps.
///
/// For each node, in order:
/// - a node that already has a local binary is not passed to the resolver;
/// - otherwise the resolver is called and the returned path recorded on the
///   graph, so later calls see the node as resolved;
/// - the filter then decides whether the artifact is delivered.
///
/// The returned collection keeps the order of `order`, minus filtered nodes,
/// and is empty (never absent) when nothing survives.
///
/// # Errors
///
/// Returns [`PipelineError::Resolution`] for the first artifact the resolver
/// cannot materialize; nothing after it is attempted.
pub fn resolve_in_order(
    graph: &mut DependencyGraph,
    order: &[NodeId],
    resolver: &dyn ArtifactResolver,
    repositories: &RepositoryContext,
    filter: Option<&dyn ArtifactFilter>,
) -> Result<Vec<ResolvedArtifact>, PipelineError> {
    let mut delivered = Vec::new();
    let mut fetched = 0usize;

    for &id in order {
        let known = graph.resolution(id).local_path().map(Path::to_path_buf);
        let path = match known {
            Some(path) => {
                tracing::trace!("{} already present at {}", graph.coordinate(id), path.display());
                path
            }
            None => {
                let coordinate = graph.coordinate(id).clone();
                tracing::debug!("Resolving {}", coordinate);
                let path = resolver.resolve(&coordinate, repositories).map_err(|source| {
                    PipelineError::Resolution {
                        coordinate: coordinate.clone(),
                        source,
                    }
                })?;
                graph.mark_resolved(id, path.clone());
                fetched += 1;
                path
            }
        };

        let coordinate = graph.coordinate(id);
        if keeps(filter, coordinate) {
            delivered.push(ResolvedArtifact::new(coordinate.clone(), path));
        } else {
            tracing::debug!("Filtered out {}", coordinate);
        }
    }

    tracing::info!(
        "Resolved {} artifact(s) ({} fetched), delivering {}",
        order.len(),
        fetched,
        delivered.len()
    );
    Ok(delivered)
}
