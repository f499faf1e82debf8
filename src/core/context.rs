//! Project context - build once in main.rs, pass to the command
//!
//! ```text
//! main.rs:
//!   DocsContext::build(root, --config) -> &DocsContext
//!   |
//!   v
//! commands/prepare.rs:
//!   fn run_prepare(ctx: &DocsContext, ...)
//! ```

use crate::core::config::DocsConfig;
use crate::core::error::{DocsError, DocsResult, ResultExt};
use crate::release::sync::{DocumentKind, ReleaseDocuments};
use std::fs;
use std::path::{Path, PathBuf};

/// Project root plus the configuration that applies to it
#[derive(Debug, Clone)]
pub struct DocsContext {
  /// Project root directory
  pub root: PathBuf,

  /// Loaded reldocs.toml, or defaults
  pub config: DocsConfig,
}

impl DocsContext {
  /// Build the context for `root`
  ///
  /// `config_path` overrides the config search; relative paths resolve against the
  /// current directory like any other CLI path.
  pub fn build(root: &Path, config_path: Option<&Path>) -> DocsResult<Self> {
    if !root.is_dir() {
      return Err(DocsError::with_help(
        format!("Project root is not a directory: {}", root.display()),
        "Pass an existing directory with --root.",
      ));
    }

    let config = match config_path {
      Some(path) => DocsConfig::load_from(path)?,
      None => DocsConfig::load(root)?,
    };

    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Absolute location of a document
  pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
    let paths = &self.config.paths;
    let relative = match kind {
      DocumentKind::Changelog => &paths.changelog,
      DocumentKind::Readme => &paths.readme,
      DocumentKind::Fragment => &paths.fragment,
    };
    self.root.join(relative)
  }

  /// Read all three documents, failing on the first missing one
  pub fn read_documents(&self) -> DocsResult<ReleaseDocuments> {
    Ok(ReleaseDocuments {
      changelog: self.read_document(DocumentKind::Changelog)?,
      readme: self.read_document(DocumentKind::Readme)?,
      fragment: self.read_document(DocumentKind::Fragment)?,
    })
  }

  /// Read a document with line endings normalized to `\n`
  pub fn read_document(&self, kind: DocumentKind) -> DocsResult<String> {
    let path = self.path_for(kind);
    if !path.is_file() {
      return Err(DocsError::MissingFile { path });
    }
    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    if text.contains('\r') {
      tracing::debug!(path = %path.display(), "normalizing CRLF line endings");
      return Ok(text.replace("\r\n", "\n"));
    }
    Ok(text)
  }

  pub fn write_document(&self, kind: DocumentKind, content: &str) -> DocsResult<()> {
    let path = self.path_for(kind);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), document = %kind, "wrote document");
    Ok(())
  }
}
