//! Integration tests for `reldocs <TAG> --check`

use crate::helpers::{FRAGMENT_PATH, TestProject, reldocs, run_reldocs, stderr, stdout};
use anyhow::Result;

#[test]
fn test_check_passes_after_prepare() -> Result<()> {
  let project = TestProject::new()?;
  run_reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12"])?;

  let output = run_reldocs(&project.path, &["v0.4.8", "--check"])?;
  assert!(stdout(&output).contains("Release docs are up to date for v0.4.8."));
  assert!(stderr(&output).is_empty(), "stderr: {}", stderr(&output));

  Ok(())
}

#[test]
fn test_check_reports_drift_without_writing() -> Result<()> {
  let project = TestProject::new()?;
  let before = project.snapshot()?;

  let output = reldocs(&project.path, &["0.4.8", "--date", "2026-02-12", "--check"])?;
  assert_eq!(output.status.code(), Some(3));

  let err = stderr(&output);
  assert!(err.contains("Release docs are not up to date for v0.4.8."), "stderr: {}", err);
  assert!(err.contains("Run: reldocs v0.4.8 --date 2026-02-12\n"));
  assert!(err.contains("Outdated files:\n- CHANGELOG.md\n- README.md\n"));
  assert!(err.contains(&format!("- {}\n", FRAGMENT_PATH)));

  assert_eq!(project.snapshot()?, before);

  Ok(())
}

#[test]
fn test_check_lists_only_outdated_files() -> Result<()> {
  let project = TestProject::new()?;
  run_reldocs(&project.path, &["v0.4.7"])?;
  let readme = project.read_file("README.md")?;
  project.write_file("README.md", &readme.replace("- Tag: `v0.4.7`", "- Tag: `v0.4.6`"))?;

  let output = reldocs(&project.path, &["v0.4.7", "--check"])?;
  assert_eq!(output.status.code(), Some(3));

  let err = stderr(&output);
  assert!(err.contains("Run: reldocs v0.4.7\n"));
  assert!(err.contains("- README.md\n"));
  assert!(!err.contains("- CHANGELOG.md"));
  assert!(!err.contains(FRAGMENT_PATH));

  Ok(())
}

#[test]
fn test_check_diff_shows_changes() -> Result<()> {
  let project = TestProject::new()?;

  let output = reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12", "--check", "--diff"])?;
  assert_eq!(output.status.code(), Some(3));

  let out = stdout(&output);
  assert!(out.contains("--- a/README.md\n+++ b/README.md\n"), "stdout: {}", out);
  assert!(out.contains("-- Tag: `v0.4.6`\n"));
  assert!(out.contains("+- Tag: `v0.4.8`\n"));
  assert!(out.contains("+## [v0.4.8] - 2026-02-12\n"));

  Ok(())
}

#[test]
fn test_check_json_report() -> Result<()> {
  let project = TestProject::new()?;

  let output = reldocs(&project.path, &["v0.4.8", "--check", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["check"], true);
  assert_eq!(report["up_to_date"], false);
  assert_eq!(report["documents"][0]["document"], "changelog");
  assert_eq!(report["documents"][0]["path"], "CHANGELOG.md");

  Ok(())
}

#[test]
fn test_diff_requires_check() -> Result<()> {
  let project = TestProject::new()?;
  let before = project.snapshot()?;

  let output = reldocs(&project.path, &["v0.4.8", "--diff"])?;
  assert!(!output.status.success());
  assert_eq!(project.snapshot()?, before);

  Ok(())
}

#[test]
fn test_missing_document_is_a_user_error() -> Result<()> {
  let project = TestProject::new()?;
  project.remove_file(FRAGMENT_PATH)?;

  let output = reldocs(&project.path, &["v0.4.8", "--check"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Missing file:"));
  assert!(stderr(&output).contains("PanelsAndHelpers.swift"));

  // Write mode leaves the other documents alone too
  let output = reldocs(&project.path, &["v0.4.8"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(!project.read_file("CHANGELOG.md")?.contains("v0.4.8"));

  Ok(())
}

#[test]
fn test_missing_readme_anchor_fails_validation() -> Result<()> {
  let project = TestProject::new()?;
  let readme = project.read_file("README.md")?;
  project.write_file("README.md", &readme.replace("Full release history:", "History:"))?;
  let before = project.snapshot()?;

  let output = reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("README missing 'Full release history' marker"));
  assert_eq!(project.snapshot()?, before);

  Ok(())
}

#[test]
fn test_missing_fragment_block_fails_validation() -> Result<()> {
  let project = TestProject::new()?;
  let fragment = project.read_file(FRAGMENT_PATH)?;
  project.write_file(FRAGMENT_PATH, &fragment.replace("toolbarItems: []", "toolbarItems: [.save]"))?;
  let before = project.snapshot()?;

  let output = reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Could not find Welcome Tour 'What's New' page block"));
  assert_eq!(project.snapshot()?, before);

  Ok(())
}
