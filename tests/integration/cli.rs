use anyhow::Result;
use artifact_pipeline::core::ArtifactCoordinate;
use artifact_pipeline::test_utils::{ManifestFixture, TestProject};
use assert_cmd::Command;
use predicates::prelude::*;

fn coord(name: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new("com.example", name, "1.0")
}

fn artpipe(project: &TestProject) -> Result<Command> {
    let mut cmd = Command::cargo_bin("artpipe")?;
    cmd.current_dir(project.project_dir())
        .env("ARTPIPE_CONFIG", project.write_global_config()?)
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_order_command() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    artpipe(&project)?
        .arg("order")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  1. com.example:C:1.0\n  2. com.example:B:1.0\n  3. com.example:A:1.0\n",
        ));
    Ok(())
}

#[test]
fn test_order_json() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::diamond())?;
    let output = artpipe(&project)?.args(["order", "--format", "json"]).output()?;
    assert!(output.status.success());

    let order: Vec<String> = serde_json::from_slice(&output.stdout)?;
    assert_eq!(order, vec!["com.example:D:1.0", "com.example:A:1.0", "org.other:B:2.0"]);
    Ok(())
}

#[test]
fn test_tree_command() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::diamond())?;
    artpipe(&project)?
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("com.example:app:1.0.0"))
        .stdout(predicate::str::contains("com.example:D:1.0 (*)"));
    Ok(())
}

#[test]
fn test_process_lists_resolved_artifacts() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    for name in ["A", "B", "C"] {
        project.remote.publish(&coord(name), name.as_bytes())?;
    }

    artpipe(&project)?
        .args(["process", "--exclude", "*:B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example:C:1.0 -> "))
        .stdout(predicate::str::contains("com.example:A:1.0 -> "))
        .stdout(predicate::str::contains("com.example:B:1.0").not());

    // excluded artifacts are still resolved into the local repository
    assert!(project.local.contains(&coord("B")));
    Ok(())
}

#[test]
fn test_process_with_explicit_manifest_and_repository() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    let extra = project.root().join("extra");
    let extra_repo = artifact_pipeline::test_utils::RepositoryFixture::new(&extra);
    for name in ["A", "B", "C"] {
        extra_repo.publish(&coord(name), name.as_bytes())?;
    }
    let output = project.root().join("out");

    let mut cmd = Command::cargo_bin("artpipe")?;
    cmd.current_dir(project.root())
        .env("ARTPIPE_CONFIG", project.root().join("absent.toml"))
        .arg("--manifest-path")
        .arg(project.manifest_path())
        .args(["process", "--processor", "copy", "--local-repository"])
        .arg(project.local.root())
        .arg("--repository")
        .arg(&extra)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.join("001-C-1.0.jar").is_file());
    assert!(output.join("003-A-1.0.jar").is_file());
    Ok(())
}

#[test]
fn test_cycle_reports_friendly_error() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::cycle())?;
    artpipe(&project)?
        .arg("process")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to get dependency artifacts"))
        .stderr(predicate::str::contains("Circular dependency detected"));
    Ok(())
}

#[test]
fn test_missing_artifact_reports_searched_locations() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::chain())?;
    artpipe(&project)?
        .arg("process")
        .assert()
        .failure()
        .stderr(predicate::str::contains("com.example:C:1.0"))
        .stderr(predicate::str::contains("Searched:"));
    Ok(())
}

#[test]
fn test_missing_manifest() -> Result<()> {
    let project = TestProject::new()?;
    artpipe(&project)?
        .arg("order")
        .assert()
        .failure()
        .stderr(predicate::str::contains("artifacts.toml"));
    Ok(())
}

#[test]
fn test_invalid_manifest_syntax() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::invalid_syntax())?;
    artpipe(&project)?
        .arg("tree")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project descriptor syntax"));
    Ok(())
}

#[test]
fn test_unknown_processor() -> Result<()> {
    let project = TestProject::with_manifest(&ManifestFixture::empty())?;
    artpipe(&project)?
        .args(["process", "--processor", "zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown processor 'zip'"));
    Ok(())
}
