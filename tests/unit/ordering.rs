use artifact_pipeline::core::{ArtifactCoordinate, PipelineError};
use artifact_pipeline::manifest::ProjectManifest;
use artifact_pipeline::resolver::{DependencyGraph, NodeId};
use artifact_pipeline::test_utils::ManifestFixture;
use std::path::Path;

fn graph(fixture: &ManifestFixture) -> DependencyGraph {
    ProjectManifest::parse(&fixture.content, Path::new("artifacts.toml"))
        .unwrap()
        .to_graph(Path::new("."))
        .unwrap()
}

fn names(order: &[ArtifactCoordinate]) -> Vec<&str> {
    order.iter().map(ArtifactCoordinate::name).collect()
}

#[test]
fn test_chain_is_dependency_first() {
    let order = graph(&ManifestFixture::chain()).ordered_coordinates().unwrap();
    assert_eq!(names(&order), vec!["C", "B", "A"]);
}

#[test]
fn test_diamond_shared_dependency_once() {
    let order = graph(&ManifestFixture::diamond()).ordered_coordinates().unwrap();
    assert_eq!(names(&order), vec!["D", "A", "B"]);
}

#[test]
fn test_every_edge_points_backwards() {
    let graph = graph(&ManifestFixture::diamond());
    let order = graph.topological_order().unwrap();
    let position = |id: NodeId| order.iter().position(|n| *n == id).unwrap();

    for &node in &order {
        for dependency in graph.direct_dependencies(node) {
            assert!(position(dependency) < position(node));
        }
    }
}

#[test]
fn test_order_is_stable_across_runs() {
    let first = graph(&ManifestFixture::diamond()).ordered_coordinates().unwrap();
    for _ in 0..5 {
        assert_eq!(graph(&ManifestFixture::diamond()).ordered_coordinates().unwrap(), first);
    }
}

#[test]
fn test_cycle_names_participants() {
    let error = graph(&ManifestFixture::cycle()).topological_order().unwrap_err();
    let PipelineError::CyclicDependency {
        cycle,
    } = &error
    else {
        panic!("expected a cycle, got {error:?}");
    };

    let cycle_names = names(cycle);
    assert!(cycle_names.contains(&"A"));
    assert!(cycle_names.contains(&"B"));
    assert_eq!(cycle.first(), cycle.last());
    assert!(error.to_string().starts_with("Circular dependency detected"));
}

#[test]
fn test_empty_project_orders_nothing() {
    assert!(graph(&ManifestFixture::empty()).topological_order().unwrap().is_empty());
}
