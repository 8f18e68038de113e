use artifact_pipeline::constants::{COLLECT_FAILURE_MESSAGE, PROCESS_FAILURE_MESSAGE};
use artifact_pipeline::core::{
    ArtifactCoordinate, ExecutionFailure, GraphBuildError, PipelineError, ProcessingError,
    ResolutionError, user_friendly_error,
};
use std::path::PathBuf;

fn coord(name: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new("com.example", name, "1.0")
}

#[test]
fn test_cycle_failure_message() {
    let failure = ExecutionFailure::new(
        COLLECT_FAILURE_MESSAGE,
        PipelineError::CyclicDependency {
            cycle: vec![coord("A"), coord("B"), coord("A")],
        },
    );
    let context = user_friendly_error(failure.into());

    assert!(context.message.starts_with(COLLECT_FAILURE_MESSAGE));
    assert!(context.message.contains("com.example:A:1.0"));
    assert!(context.suggestion.is_some());
}

#[test]
fn test_not_found_lists_searched_locations() {
    let failure = ExecutionFailure::new(
        COLLECT_FAILURE_MESSAGE,
        PipelineError::Resolution {
            coordinate: coord("C"),
            source: ResolutionError::NotFound {
                coordinate: coord("C"),
                searched: vec!["/local".to_string(), "mirror (/mirror)".to_string()],
            },
        },
    );
    let context = user_friendly_error(failure.into());

    assert!(context.message.contains("com.example:C:1.0"));
    assert_eq!(context.details.as_deref(), Some("Searched: /local, mirror (/mirror)"));
}

#[test]
fn test_processing_failure_names_artifacts() {
    let failure = ExecutionFailure::new(
        PROCESS_FAILURE_MESSAGE,
        PipelineError::Processing(ProcessingError::new("disk full").with_artifacts([coord("A")])),
    );
    let context = user_friendly_error(failure.into());

    assert!(context.message.starts_with(PROCESS_FAILURE_MESSAGE));
    assert!(context.details.unwrap().contains("com.example:A:1.0"));
}

#[test]
fn test_missing_descriptor_suggests_manifest_path() {
    let error = GraphBuildError::DescriptorNotFound {
        path: PathBuf::from("/nowhere/artifacts.toml"),
    };
    let context = user_friendly_error(anyhow::Error::new(error).context("loading project"));
    assert!(context.suggestion.unwrap().contains("--manifest-path"));
}

#[test]
fn test_unknown_error_keeps_chain() {
    let error = anyhow::anyhow!("root cause").context("outer");
    let context = user_friendly_error(error);
    assert!(context.message.starts_with("outer"));
    assert!(context.message.contains("1: root cause"));
}
