use anyhow::Result;
use artifact_pipeline::constants::{COLLECT_FAILURE_MESSAGE, PROCESS_FAILURE_MESSAGE};
use artifact_pipeline::core::{ArtifactCoordinate, PipelineError, ResolutionError};
use artifact_pipeline::manifest::ManifestGraphBuilder;
use artifact_pipeline::pipeline::ArtifactPipeline;
use artifact_pipeline::processor::CopyProcessor;
use artifact_pipeline::resolver::{RemoteRepository, RepositoryContext, RepositoryResolver};
use artifact_pipeline::test_utils::{
    ManifestFixture, RecordingProcessor, TestProject, init_test_logging,
};
use std::fs;

fn coord(name: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new("com.example", name, "1.0")
}

fn repositories(project: &TestProject) -> RepositoryContext {
    RepositoryContext::new(project.local.root())
        .with_remote(RemoteRepository::new("remote", project.remote.url()))
}

fn pipeline(project: &TestProject, processor: RecordingProcessor) -> ArtifactPipeline {
    ArtifactPipeline::new(
        Box::new(ManifestGraphBuilder::new()),
        Box::new(RepositoryResolver::new()),
        Box::new(processor),
        repositories(project),
    )
}

#[test]
fn test_chain_fetched_from_remote_in_order() -> Result<()> {
    init_test_logging(None);
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    for name in ["A", "B", "C"] {
        project.remote.publish_with_checksum(&coord(name), name.as_bytes())?;
    }

    let processor = RecordingProcessor::new();
    pipeline(&project, processor.clone()).run(&project.context(), None)?;

    assert_eq!(processor.last_names(), Some(vec!["C".into(), "B".into(), "A".into()]));
    for artifact in &processor.calls()[0] {
        assert!(artifact.path().starts_with(project.local.root()));
        assert!(artifact.path().is_file());
    }
    assert!(project.local.contains(&coord("A")));
    Ok(())
}

#[test]
fn test_declared_path_is_not_fetched() -> Result<()> {
    let project = TestProject::new()?;
    fs::create_dir_all(project.project_dir().join("libs"))?;
    fs::write(project.project_dir().join("libs/b.jar"), "vendored")?;
    fs::write(
        project.manifest_path(),
        r#"
[project]
group = "com.example"
name = "app"
version = "1.0.0"
dependencies = ["com.example:A:1.0"]

[artifacts."com.example:A:1.0"]
dependencies = ["com.example:B:1.0"]

[artifacts."com.example:B:1.0"]
path = "libs/b.jar"
"#,
    )?;
    project.remote.publish(&coord("A"), b"a")?;

    let processor = RecordingProcessor::new();
    pipeline(&project, processor.clone()).run(&project.context(), None)?;

    let delivered = &processor.calls()[0];
    assert_eq!(delivered[0].path(), project.project_dir().join("libs/b.jar"));
    assert!(!project.local.contains(&coord("B")));
    assert!(project.local.contains(&coord("A")));
    Ok(())
}

#[test]
fn test_cycle_fails_before_any_fetch() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::cycle())?;
    project.remote.publish(&coord("A"), b"a")?;
    project.remote.publish(&coord("B"), b"b")?;

    let processor = RecordingProcessor::new();
    let failure = pipeline(&project, processor.clone()).run(&project.context(), None).unwrap_err();

    assert_eq!(failure.message(), COLLECT_FAILURE_MESSAGE);
    assert!(matches!(failure.cause(), PipelineError::CyclicDependency { .. }));
    assert!(!project.local.contains(&coord("A")));
    assert!(processor.calls().is_empty());
    Ok(())
}

#[test]
fn test_missing_artifact_stops_the_run() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    project.remote.publish(&coord("A"), b"a")?;
    project.remote.publish(&coord("B"), b"b")?;

    let processor = RecordingProcessor::new();
    let failure = pipeline(&project, processor.clone()).run(&project.context(), None).unwrap_err();

    let PipelineError::Resolution {
        coordinate,
        source,
    } = failure.cause()
    else {
        panic!("expected a resolution failure, got {:?}", failure.cause());
    };
    assert_eq!(*coordinate, coord("C"));
    assert!(matches!(source, ResolutionError::NotFound { .. }));
    // C comes first, so nothing after it was fetched
    assert!(!project.local.contains(&coord("B")));
    assert!(processor.calls().is_empty());
    Ok(())
}

#[test]
fn test_corrupt_remote_artifact_is_rejected() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    for name in ["A", "B", "C"] {
        project.remote.publish_with_checksum(&coord(name), name.as_bytes())?;
    }
    fs::write(project.remote.path_of(&coord("B")), "tampered")?;

    let failure = pipeline(&project, RecordingProcessor::new())
        .run(&project.context(), None)
        .unwrap_err();
    assert!(matches!(
        failure.cause(),
        PipelineError::Resolution { source: ResolutionError::ChecksumMismatch { .. }, .. }
    ));
    Ok(())
}

#[test]
fn test_processor_failure_is_reported() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    for name in ["A", "B", "C"] {
        project.local.publish(&coord(name), name.as_bytes())?;
    }

    let processor = RecordingProcessor::failing("cannot write");
    let failure = pipeline(&project, processor.clone()).run(&project.context(), None).unwrap_err();

    assert_eq!(failure.message(), PROCESS_FAILURE_MESSAGE);
    let PipelineError::Processing(error) = failure.cause() else {
        panic!("expected a processing failure");
    };
    assert_eq!(error.artifacts(), &[coord("C")]);
    assert_eq!(processor.calls().len(), 1);
    Ok(())
}

#[test]
fn test_empty_project_skips_processor() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::empty())?;
    let processor = RecordingProcessor::new();
    pipeline(&project, processor.clone()).run(&project.context(), None)?;
    assert!(processor.calls().is_empty());
    Ok(())
}

#[test]
fn test_copy_processor_end_to_end() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::diamond())?;
    project.local.publish(&coord("A"), b"a")?;
    project.local.publish(&coord("D"), b"d")?;
    project.local.publish(&ArtifactCoordinate::new("org.other", "B", "2.0"), b"b")?;

    let output = project.root().join("dist");
    ArtifactPipeline::new(
        Box::new(ManifestGraphBuilder::new()),
        Box::new(RepositoryResolver::new()),
        Box::new(CopyProcessor::into_dir(&output)),
        repositories(&project),
    )
    .run(&project.context(), None)?;

    let mut files: Vec<String> = fs::read_dir(&output)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    files.sort();
    assert_eq!(files, vec!["001-D-1.0.jar", "002-A-1.0.jar", "003-B-2.0.jar"]);
    Ok(())
}
