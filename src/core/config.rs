use crate::core::error::{ConfigError, DocsError, DocsResult, ResultExt};
use crate::docs::fragment::FragmentTemplate;
use crate::docs::summary;
use crate::release::tag::DEFAULT_TAG_PREFIX;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for reldocs
/// Searched in order: reldocs.toml, .reldocs.toml, .config/reldocs.toml
///
/// Every section is optional; a project without a config file gets the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocsConfig {
  #[serde(default)]
  pub paths: PathsConfig,
  #[serde(default)]
  pub release: ReleaseSettings,
  #[serde(default)]
  pub fragment: FragmentTemplate,
}

/// Document locations, relative to the project root
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
  #[serde(default = "default_changelog_path")]
  pub changelog: PathBuf,
  #[serde(default = "default_readme_path")]
  pub readme: PathBuf,
  /// Swift source holding the "What's New" tour page
  #[serde(default = "default_fragment_path")]
  pub fragment: PathBuf,
}

fn default_changelog_path() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_readme_path() -> PathBuf {
  PathBuf::from("README.md")
}

fn default_fragment_path() -> PathBuf {
  PathBuf::from("Neon Vision Editor").join("UI").join("PanelsAndHelpers.swift")
}

impl Default for PathsConfig {
  fn default() -> Self {
    Self {
      changelog: default_changelog_path(),
      readme: default_readme_path(),
      fragment: default_fragment_path(),
    }
  }
}

/// Tag format and summary sizes
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSettings {
  /// Prefix every canonical tag starts with (default: "v")
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,

  /// Releases kept in the README summary region (default: 3)
  #[serde(default = "default_readme_window")]
  pub readme_window: usize,

  /// Bullets per README summary block (default: 5)
  #[serde(default = "default_readme_bullets")]
  pub readme_bullets: usize,

  /// Bullets in the in-app fragment (default: 4)
  #[serde(default = "default_fragment_bullets")]
  pub fragment_bullets: usize,
}

fn default_tag_prefix() -> String {
  DEFAULT_TAG_PREFIX.to_string()
}

fn default_readme_window() -> usize {
  3
}

fn default_readme_bullets() -> usize {
  summary::DEFAULT_LIMIT
}

fn default_fragment_bullets() -> usize {
  4
}

impl Default for ReleaseSettings {
  fn default() -> Self {
    Self {
      tag_prefix: default_tag_prefix(),
      readme_window: default_readme_window(),
      readme_bullets: default_readme_bullets(),
      fragment_bullets: default_fragment_bullets(),
    }
  }
}

impl ReleaseSettings {
  pub fn validate(&self) -> DocsResult<()> {
    if self.tag_prefix.chars().any(char::is_whitespace) {
      return Err(invalid("release.tag_prefix", "must not contain whitespace"));
    }

    for (field, value) in [
      ("release.readme_window", self.readme_window),
      ("release.readme_bullets", self.readme_bullets),
      ("release.fragment_bullets", self.fragment_bullets),
    ] {
      if value == 0 {
        return Err(invalid(field, "must be at least 1"));
      }
    }

    Ok(())
  }
}

fn validate_fragment(template: &FragmentTemplate) -> DocsResult<()> {
  for (field, value) in [
    ("fragment.title", &template.title),
    ("fragment.icon_name", &template.icon_name),
    ("fragment.colors", &template.colors),
  ] {
    if value.trim().is_empty() {
      return Err(invalid(field, "must not be empty"));
    }
    if value.contains('\n') {
      return Err(invalid(field, "must be a single line"));
    }
  }

  // Title and icon are written inside Swift string literals
  for (field, value) in [("fragment.title", &template.title), ("fragment.icon_name", &template.icon_name)] {
    if value.contains(['"', '\\']) {
      return Err(invalid(field, "must not contain quotes or backslashes"));
    }
  }

  Ok(())
}

fn invalid(field: &str, reason: &str) -> DocsError {
  DocsError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}

impl DocsConfig {
  /// Find config file in search order: reldocs.toml, .reldocs.toml, .config/reldocs.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = [
      root.join("reldocs.toml"),
      root.join(".reldocs.toml"),
      root.join(".config").join("reldocs.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the project root, falling back to defaults
  pub fn load(root: &Path) -> DocsResult<Self> {
    match Self::find_config_path(root) {
      Some(path) => Self::load_from(&path),
      None => {
        tracing::debug!(root = %root.display(), "no reldocs.toml found, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// Load config from an explicit file
  pub fn load_from(path: &Path) -> DocsResult<Self> {
    if !path.exists() {
      return Err(DocsError::Config(ConfigError::NotFound {
        path: path.to_path_buf(),
      }));
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");

    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> DocsResult<Self> {
    let config: DocsConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> DocsResult<()> {
    self.release.validate()?;
    validate_fragment(&self.fragment)
  }
}
