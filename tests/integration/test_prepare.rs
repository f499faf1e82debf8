//! Integration tests for `reldocs <TAG>` (write mode)

use crate::helpers::{CHANGELOG, FRAGMENT_PATH, TestProject, reldocs, run_reldocs, stderr, stdout};
use anyhow::Result;

#[test]
fn test_prepare_new_release() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12"])?;
  let out = stdout(&output);
  assert!(out.contains("Added CHANGELOG template for v0.4.8 (2026-02-12)."), "stdout: {}", out);
  assert!(out.contains("Updated README release references and top 3 sorted summaries."));
  assert!(out.contains("Updated Welcome Tour release page from CHANGELOG for v0.4.8."));

  let changelog = project.read_file("CHANGELOG.md")?;
  let new_at = changelog.find("## [v0.4.8] - 2026-02-12\n\n### Added\n- TODO\n\n### Improved\n- TODO\n\n### Fixed\n- TODO\n\n");
  let old_at = changelog.find("## [v0.4.7] - 2026-02-01");
  assert!(new_at.is_some() && new_at < old_at, "changelog:\n{}", changelog);

  let readme = project.read_file("README.md")?;
  assert!(readme.contains("> Latest release: **v0.4.8**\n"));
  assert!(readme.contains("- Latest release: **v0.4.8**\n"));
  assert!(readme.contains("- Tag: `v0.4.8`\n"));
  assert!(readme.contains("git rev-parse --verify v0.4.8\n"));
  assert!(readme.contains(
    "## Changelog\n\n\
### v0.4.8 (summary)\n\n- TODO\n- TODO\n- TODO\n\n\
### v0.4.7 (summary)\n\n- Minimap\n- Vim mode\n- Crash when closing the last tab\n\n\
### v0.4.7-beta (summary)\n\n- Minimap preview\n\n\
Full release history: [CHANGELOG.md](CHANGELOG.md)\n"
  ), "readme:\n{}", readme);
  assert!(!readme.contains("### v0.4.6 (summary)"));

  let fragment = project.read_file(FRAGMENT_PATH)?;
  assert!(fragment.contains("            subtitle: \"Major changes since v0.4.7:\",\n"));
  assert!(fragment.contains("                \"TODO\",\n                \"TODO\",\n                \"TODO\"\n"));
  assert!(!fragment.contains("Save dialog focus"));
  assert!(fragment.starts_with("import SwiftUI\n"));

  Ok(())
}

#[test]
fn test_prepare_is_idempotent() -> Result<()> {
  let project = TestProject::new()?;

  run_reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12"])?;
  let first = project.snapshot()?;

  let output = run_reldocs(&project.path, &["0.4.8", "--date", "2026-03-01"])?;
  let out = stdout(&output);
  assert!(out.contains("Found existing CHANGELOG section for v0.4.8."), "stdout: {}", out);
  assert!(out.contains("Release docs are up to date for v0.4.8."));

  assert_eq!(project.snapshot()?, first);
  assert!(!first[0].contains("2026-03-01"));

  Ok(())
}

#[test]
fn test_prepare_existing_section_without_prefix() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_reldocs(&project.path, &["0.4.7"])?;
  assert!(stdout(&output).contains("Found existing CHANGELOG section for v0.4.7."));

  assert_eq!(project.read_file("CHANGELOG.md")?, CHANGELOG);

  let readme = project.read_file("README.md")?;
  assert!(readme.contains("- Tag: `v0.4.7`\n"));
  assert!(readme.contains("### v0.4.6 (summary)\n\n- Save dialog focus\n\nFull release history:"));

  // Stable release skips its own beta when pointing back
  let fragment = project.read_file(FRAGMENT_PATH)?;
  assert!(fragment.contains("subtitle: \"Major changes since v0.4.6:\""));
  assert!(fragment.contains("                \"Minimap\",\n                \"Vim mode\",\n"));

  Ok(())
}

#[test]
fn test_prepare_crlf_changelog_keeps_one_section() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("CHANGELOG.md", &CHANGELOG.replace('\n', "\r\n"))?;

  let output = run_reldocs(&project.path, &["v0.4.7", "--date", "2026-05-05"])?;
  assert!(stdout(&output).contains("Found existing CHANGELOG section for v0.4.7."));

  let changelog = project.read_file("CHANGELOG.md")?;
  assert_eq!(changelog.matches("## [v0.4.7] - ").count(), 1);
  assert!(!changelog.contains("2026-05-05"));
  assert_eq!(changelog, CHANGELOG);

  let fragment = project.read_file(FRAGMENT_PATH)?;
  assert!(fragment.contains("subtitle: \"Major changes since v0.4.6:\""));

  Ok(())
}

#[test]
fn test_prepare_with_config_file() -> Result<()> {
  let project = TestProject::empty()?;
  project.write_file("docs/CHANGES.md", CHANGELOG)?;
  project.write_file("docs/README.md", crate::helpers::README)?;
  project.write_file("App/WhatsNew.swift", crate::helpers::FRAGMENT)?;
  project.write_file(
    "reldocs.toml",
    r#"
[paths]
changelog = "docs/CHANGES.md"
readme = "docs/README.md"
fragment = "App/WhatsNew.swift"

[release]
readme_window = 1
fragment_bullets = 1
"#,
  )?;

  let output = run_reldocs(&project.path, &["v0.4.7"])?;
  assert!(stdout(&output).contains("top 1 sorted summaries"));

  let readme = project.read_file("docs/README.md")?;
  assert!(readme.contains("## Changelog\n\n### v0.4.7 (summary)\n\n- Minimap\n- Vim mode\n- Crash when closing the last tab\n\nFull release history:"));

  let fragment = project.read_file("App/WhatsNew.swift")?;
  assert!(fragment.contains("            bullets: [\n                \"Minimap\"\n            ],\n"));

  Ok(())
}

#[test]
fn test_prepare_explicit_config_and_root() -> Result<()> {
  let project = TestProject::new()?;
  let elsewhere = TestProject::empty()?;
  elsewhere.write_file("alt.toml", "[release]\nreadme_window = 2\n")?;

  let root = project.path.to_string_lossy().into_owned();
  let config = elsewhere.path.join("alt.toml").to_string_lossy().into_owned();
  run_reldocs(&elsewhere.path, &["v0.4.8", "--date", "2026-02-12", "--root", &root, "--config", &config])?;

  let readme = project.read_file("README.md")?;
  assert!(readme.contains("### v0.4.7 (summary)"));
  assert!(!readme.contains("### v0.4.7-beta (summary)"));

  Ok(())
}

#[test]
fn test_prepare_json_report() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_reldocs(&project.path, &["v0.4.8", "--date", "2026-02-12", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["tag"], "v0.4.8");
  assert_eq!(report["check"], false);
  assert_eq!(report["created_section"], true);
  assert_eq!(report["previous_tag"], "v0.4.7");
  assert_eq!(report["documents"].as_array().map(Vec::len), Some(3));
  assert_eq!(report["documents"][2]["document"], "fragment");
  assert_eq!(report["documents"][2]["path"], FRAGMENT_PATH);

  Ok(())
}

#[test]
fn test_prepare_rejects_empty_tag() -> Result<()> {
  let project = TestProject::new()?;
  let before = project.snapshot()?;

  let output = reldocs(&project.path, &["   "])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid release tag"));
  assert_eq!(project.snapshot()?, before);

  Ok(())
}

#[test]
fn test_prepare_rejects_bad_date() -> Result<()> {
  let project = TestProject::new()?;

  let output = reldocs(&project.path, &["v0.4.8", "--date", "2026-13-01"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid release date '2026-13-01'"));
  assert!(!project.read_file("CHANGELOG.md")?.contains("v0.4.8"));

  Ok(())
}

#[test]
fn test_prepare_rejects_invalid_config() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(".config/reldocs.toml", "[release]\nreadme_window = 0\n")?;

  let output = reldocs(&project.path, &["v0.4.8"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("release.readme_window"));

  Ok(())
}
