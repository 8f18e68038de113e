//! Dependency graph model and topological ordering.
//!
//! This module provides the graph data structure for one project's artifacts
//! and the depth-first ordering that turns it into a dependency-first sequence,
//! including cycle detection.
//!
//! Nodes live in a petgraph arena and are addressed by [`NodeId`]. Coordinates
//! never change once added; the only per-node mutable data is the
//! [`ResolutionState`], which is kept in a parallel table indexed by node id.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::core::{ArtifactCoordinate, GraphError, PipelineError, ResolutionState};

/// Stable handle to a node in a [`DependencyGraph`].
pub type NodeId = NodeIndex;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Dependency graph for one project.
///
/// Edges point from a dependent to its dependency: an edge `A → B` means
/// "A depends on B", so B must come first in any valid order. The graph is
/// rooted at the project's own node, which is never part of the ordered output.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The underlying directed graph.
    graph: DiGraph<ArtifactCoordinate, ()>,
    /// Map from coordinates to their graph indices.
    node_map: HashMap<ArtifactCoordinate, NodeId>,
    /// Resolution state per node, indexed by `NodeId::index()`.
    states: Vec<ResolutionState>,
    /// The project's own node.
    root: NodeId,
}

impl DependencyGraph {
    /// Create a graph containing only the project's root node.
    pub fn new(root: ArtifactCoordinate) -> Self {
        let mut graph = DiGraph::new();
        let root_idx = graph.add_node(root.clone());
        let mut node_map = HashMap::new();
        node_map.insert(root, root_idx);
        Self {
            graph,
            node_map,
            states: vec![ResolutionState::Unresolved],
            root: root_idx,
        }
    }

    /// The project's own node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add a node to the graph if it doesn't already exist.
    ///
    /// Returns the existing node when the coordinate is already present.
    pub fn add_node(&mut self, coordinate: ArtifactCoordinate) -> NodeId {
        if let Some(&index) = self.node_map.get(&coordinate) {
            index
        } else {
            let index = self.graph.add_node(coordinate.clone());
            self.node_map.insert(coordinate, index);
            self.states.push(ResolutionState::Unresolved);
            index
        }
    }

    /// Record that `from` depends on `to`.
    ///
    /// Both coordinates must already be nodes. Adding the same edge twice is a
    /// no-op, so insertion order is the order of first addition.
    pub fn add_edge(
        &mut self,
        from: &ArtifactCoordinate,
        to: &ArtifactCoordinate,
    ) -> Result<(), GraphError> {
        let from_idx = self.require(from)?;
        let to_idx = self.require(to)?;

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
        Ok(())
    }

    fn require(&self, coordinate: &ArtifactCoordinate) -> Result<NodeId, GraphError> {
        self.node_map.get(coordinate).copied().ok_or_else(|| GraphError::UnknownArtifact {
            coordinate: coordinate.clone(),
        })
    }

    /// Look up the node for a coordinate.
    pub fn node_id(&self, coordinate: &ArtifactCoordinate) -> Option<NodeId> {
        self.node_map.get(coordinate).copied()
    }

    /// The coordinate of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn coordinate(&self, id: NodeId) -> &ArtifactCoordinate {
        &self.graph[id]
    }

    /// The resolution state of a node.
    pub fn resolution(&self, id: NodeId) -> &ResolutionState {
        &self.states[id.index()]
    }

    /// Record where a node's binary lives locally.
    pub fn mark_resolved(&mut self, id: NodeId, path: impl Into<PathBuf>) {
        self.states[id.index()] = ResolutionState::Resolved(path.into());
    }

    /// Direct dependencies of a node, in edge insertion order.
    pub fn direct_dependencies(&self, id: NodeId) -> Vec<NodeId> {
        // petgraph lists outgoing neighbors newest-first
        let mut deps: Vec<NodeId> = self.graph.neighbors(id).collect();
        deps.reverse();
        deps
    }

    /// Check if the graph has no nodes besides the root.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 1
    }

    /// Get the total number of nodes in the graph, root included.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the total number of edges (dependencies) in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Linearize the graph so every artifact follows all of its dependencies.
    ///
    /// Performs a depth-first traversal from the root, visiting children in
    /// edge insertion order and emitting each node once all its children are
    /// done. The result is deterministic for a given graph. The root itself is
    /// not emitted, and nodes unreachable from the root are skipped.
    ///
    /// The traversal keeps its own stack, so graph depth is bounded by memory
    /// rather than by the thread's stack size.
    ///
    /// Revisiting a node that is still on the traversal stack fails with
    /// [`PipelineError::CyclicDependency`]; no partial order is returned.
    pub fn topological_order(&self) -> Result<Vec<NodeId>, PipelineError> {
        let mut colors = vec![Color::White; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count().saturating_sub(1));

        self.dfs_post_order(&mut colors, &mut order).map_err(|cycle| {
            PipelineError::CyclicDependency {
                cycle,
            }
        })?;

        let unreachable = colors.iter().filter(|color| **color == Color::White).count();
        if unreachable > 0 {
            tracing::debug!(
                "Skipping {} artifact(s) not reachable from {}",
                unreachable,
                self.graph[self.root]
            );
        }

        Ok(order)
    }

    /// Same as [`topological_order`](Self::topological_order), as coordinates.
    pub fn ordered_coordinates(&self) -> Result<Vec<ArtifactCoordinate>, PipelineError> {
        Ok(self.topological_order()?.into_iter().map(|id| self.graph[id].clone()).collect())
    }

    /// Iterative DFS from the root, pushing nodes in post-order.
    ///
    /// Returns `Err(cycle_path)` if a cycle is detected.
    fn dfs_post_order(
        &self,
        colors: &mut [Color],
        order: &mut Vec<NodeId>,
    ) -> Result<(), Vec<ArtifactCoordinate>> {
        let mut stack = vec![Frame::new(self.root, self.direct_dependencies(self.root))];
        colors[self.root.index()] = Color::Gray;

        while let Some(frame) = stack.last_mut() {
            let Some(dependency) = frame.next_child() else {
                let node = frame.node;
                stack.pop();
                colors[node.index()] = Color::Black;
                if node != self.root {
                    order.push(node);
                }
                continue;
            };

            match colors[dependency.index()] {
                Color::Gray => {
                    // The stack is the current path; the cycle starts where it
                    // first entered `dependency`
                    let cycle_start =
                        stack.iter().position(|f| f.node == dependency).unwrap_or(0);
                    let mut cycle: Vec<ArtifactCoordinate> =
                        stack[cycle_start..].iter().map(|f| self.graph[f.node].clone()).collect();
                    cycle.push(self.graph[dependency].clone());
                    return Err(cycle);
                }
                Color::White => {
                    colors[dependency.index()] = Color::Gray;
                    stack.push(Frame::new(dependency, self.direct_dependencies(dependency)));
                }
                Color::Black => {}
            }
        }
        Ok(())
    }

    /// Build a human-readable dependency tree starting at the root.
    ///
    /// Artifacts reached a second time are printed once more but not expanded;
    /// edges back into the current path are marked as circular.
    pub fn to_tree_string(&self) -> String {
        let mut result = format!("{}\n", self.graph[self.root]);
        let mut expanded = HashSet::new();
        let mut on_path = HashSet::from([self.root]);
        // each frame carries the prefix for its children's lines
        let mut stack = vec![(Frame::new(self.root, self.direct_dependencies(self.root)), String::new())];

        while let Some((frame, prefix)) = stack.last_mut() {
            let Some(node) = frame.next_child() else {
                on_path.remove(&frame.node);
                stack.pop();
                continue;
            };

            let is_last = frame.is_exhausted();
            let connector = if is_last {
                "└── "
            } else {
                "├── "
            };

            if on_path.contains(&node) {
                result.push_str(&format!("{}{}{} (circular reference)\n", prefix, connector, self.graph[node]));
                continue;
            }
            if !expanded.insert(node) {
                result.push_str(&format!("{}{}{} (*)\n", prefix, connector, self.graph[node]));
                continue;
            }
            result.push_str(&format!("{}{}{}\n", prefix, connector, self.graph[node]));

            let child_prefix = if is_last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            on_path.insert(node);
            stack.push((Frame::new(node, self.direct_dependencies(node)), child_prefix));
        }
        result
    }
}

/// One level of an explicit depth-first traversal.
struct Frame {
    node: NodeId,
    children: Vec<NodeId>,
    cursor: usize,
}

impl Frame {
    fn new(node: NodeId, children: Vec<NodeId>) -> Self {
        Self {
            node,
            children,
            cursor: 0,
        }
    }

    fn next_child(&mut self) -> Option<NodeId> {
        let child = self.children.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(child)
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.children.len()
    }
}
