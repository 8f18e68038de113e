use artifact_pipeline::core::ResolvedArtifact;
use artifact_pipeline::filter::{ArtifactFilter, PatternFilter};
use artifact_pipeline::manifest::ProjectManifest;
use artifact_pipeline::resolver::{RepositoryContext, resolve_in_order};
use artifact_pipeline::test_utils::{ManifestFixture, ScriptedResolver};
use std::path::Path;

fn run(filter: Option<&dyn ArtifactFilter>, resolver: &ScriptedResolver) -> Vec<ResolvedArtifact> {
    let manifest =
        ProjectManifest::parse(&ManifestFixture::diamond().content, Path::new("artifacts.toml"))
            .unwrap();
    let mut graph = manifest.to_graph(Path::new(".")).unwrap();
    let order = graph.topological_order().unwrap();
    resolve_in_order(&mut graph, &order, resolver, &RepositoryContext::new("/repo"), filter)
        .unwrap()
}

fn names(artifacts: &[ResolvedArtifact]) -> Vec<&str> {
    artifacts.iter().map(|a| a.coordinate().name()).collect()
}

#[test]
fn test_group_include_keeps_order() {
    let filter = PatternFilter::new(["com.example"], Vec::<String>::new()).unwrap();
    let resolver = ScriptedResolver::new();
    let delivered = run(Some(&filter), &resolver);

    assert_eq!(names(&delivered), vec!["D", "A"]);
    // filtered artifacts are still resolved
    assert_eq!(resolver.calls(), vec!["D", "A", "B"]);
}

#[test]
fn test_exclude_wins_over_include() {
    let filter = PatternFilter::new(["*"], ["*:D"]).unwrap();
    let delivered = run(Some(&filter), &ScriptedResolver::new());
    assert_eq!(names(&delivered), vec!["A", "B"]);
}

#[test]
fn test_no_filter_delivers_everything() {
    let delivered = run(None, &ScriptedResolver::new());
    assert_eq!(names(&delivered), vec!["D", "A", "B"]);
    assert_eq!(delivered[0].path(), Path::new("/scripted/D-1.0.jar"));
}

#[test]
fn test_filter_rejecting_all_yields_empty() {
    let filter = PatternFilter::new(["nothing.matches"], Vec::<String>::new()).unwrap();
    assert!(run(Some(&filter), &ScriptedResolver::new()).is_empty());
}
