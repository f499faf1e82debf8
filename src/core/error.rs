//! Error types for reldocs with contextual messages and exit codes
//!
//! Every failure is fatal to the run. Errors carry enough detail to name the
//! failing precondition, and most variants offer a help line pointing at the fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for reldocs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid tag or date, missing files, bad config)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (document structure, check-mode drift)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for reldocs
#[derive(Debug)]
pub enum DocsError {
  /// Release tag was empty after trimming
  InvalidTag { raw: String },

  /// Release date is not an ISO `YYYY-MM-DD` calendar date
  InvalidDate { raw: String },

  /// A target document does not exist
  MissingFile { path: PathBuf },

  /// The changelog has no heading for the tag
  SectionNotFound { tag: String },

  /// A document lacks one of its structural anchors
  Anchor(AnchorError),

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// I/O error with the operation that failed
  IoContext { source: io::Error, context: String },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DocsError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DocsError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    DocsError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DocsError::Message { message, context, help } => DocsError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      DocsError::Io(source) => DocsError::IoContext { source, context: ctx_str },
      DocsError::IoContext { source, context } => DocsError::IoContext {
        source,
        context: format!("{}\n{}", ctx_str, context),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DocsError::InvalidTag { .. } | DocsError::InvalidDate { .. } | DocsError::MissingFile { .. } => ExitCode::User,
      DocsError::Config(_) => ExitCode::User,
      DocsError::SectionNotFound { .. } | DocsError::Anchor(_) => ExitCode::Validation,
      DocsError::Io(_) | DocsError::IoContext { .. } => ExitCode::System,
      DocsError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DocsError::InvalidTag { .. } => Some("Pass a release tag such as `v1.2.3` or `1.2.3`.".to_string()),
      DocsError::InvalidDate { .. } => Some("Use an ISO calendar date, e.g. `--date 2026-02-12`.".to_string()),
      DocsError::MissingFile { .. } => Some(
        "Run from the project root (or pass --root), or point [paths] in reldocs.toml at the right file.".to_string(),
      ),
      DocsError::SectionNotFound { tag } => Some(format!(
        "Add a `## [{}] - YYYY-MM-DD` heading to the changelog, or rerun without --check to create one.",
        tag
      )),
      DocsError::Anchor(e) => e.help_message(),
      DocsError::Config(e) => e.help_message(),
      DocsError::Message { help, .. } => help.clone(),
      DocsError::Io(_) | DocsError::IoContext { .. } => None,
    }
  }
}

impl fmt::Display for DocsError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DocsError::InvalidTag { raw } => write!(f, "Invalid release tag {:?}: tag cannot be empty", raw),
      DocsError::InvalidDate { raw } => write!(f, "Invalid release date '{}': expected YYYY-MM-DD", raw),
      DocsError::MissingFile { path } => write!(f, "Missing file: {}", path.display()),
      DocsError::SectionNotFound { tag } => write!(f, "Could not find CHANGELOG section for {}", tag),
      DocsError::Anchor(e) => write!(f, "{}", e),
      DocsError::Config(e) => write!(f, "{}", e),
      DocsError::Io(e) => write!(f, "I/O error: {}", e),
      DocsError::IoContext { source, context } => write!(f, "I/O error: {}\n{}", source, context),
      DocsError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DocsError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DocsError::Io(e) | DocsError::IoContext { source: e, .. } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DocsError {
  fn from(err: io::Error) -> Self {
    DocsError::Io(err)
  }
}

impl From<AnchorError> for DocsError {
  fn from(err: AnchorError) -> Self {
    DocsError::Anchor(err)
  }
}

impl From<ConfigError> for DocsError {
  fn from(err: ConfigError) -> Self {
    DocsError::Config(err)
  }
}

impl From<String> for DocsError {
  fn from(msg: String) -> Self {
    DocsError::message(msg)
  }
}

impl From<&str> for DocsError {
  fn from(msg: &str) -> Self {
    DocsError::message(msg)
  }
}

impl From<regex::Error> for DocsError {
  fn from(err: regex::Error) -> Self {
    DocsError::message(format!("Pattern error: {}", err))
  }
}

impl From<toml_edit::de::Error> for DocsError {
  fn from(err: toml_edit::de::Error) -> Self {
    DocsError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for DocsError {
  fn from(err: serde_json::Error) -> Self {
    DocsError::message(format!("JSON error: {}", err))
  }
}

/// Structural anchors a document must carry before it can be rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
  /// README has no `## Changelog` header
  ChangelogHeader,

  /// README has no `Full release history:` marker below the header
  HistoryMarker,

  /// UI source does not contain exactly one "What's New" block
  FragmentBlock { found: usize },
}

impl AnchorError {
  fn help_message(&self) -> Option<String> {
    match self {
      AnchorError::ChangelogHeader => {
        Some("Add a `## Changelog` heading followed by a blank line to the README.".to_string())
      }
      AnchorError::HistoryMarker => {
        Some("Add a `Full release history:` line below the README `## Changelog` section.".to_string())
      }
      AnchorError::FragmentBlock { found: 0 } => Some(
        "Check the TourPage block: title, iconName, colors and toolbarItems must match [fragment] in reldocs.toml."
          .to_string(),
      ),
      AnchorError::FragmentBlock { .. } => Some("Keep a single \"What's New\" TourPage block in the UI source.".to_string()),
    }
  }
}

impl fmt::Display for AnchorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AnchorError::ChangelogHeader => write!(f, "README missing '## Changelog' section"),
      AnchorError::HistoryMarker => write!(f, "README missing 'Full release history' marker"),
      AnchorError::FragmentBlock { found: 0 } => {
        write!(f, "Could not find Welcome Tour 'What's New' page block to update")
      }
      AnchorError::FragmentBlock { found } => {
        write!(f, "Expected one Welcome Tour 'What's New' page block, found {}", found)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// A field holds a value the tool cannot work with
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Drop --config to use reldocs.toml from the project root, or built-in defaults.".to_string())
      }
      ConfigError::InvalidField { field, .. } => Some(format!("Fix `{}` in reldocs.toml.", field)),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => write!(f, "Config file not found: {}", path.display()),
      ConfigError::InvalidField { field, reason } => write!(f, "Invalid config field `{}`: {}", field, reason),
    }
  }
}

/// Result type alias for reldocs
pub type DocsResult<T> = Result<T, DocsError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DocsResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DocsResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DocsError>,
{
  fn context(self, ctx: impl Into<String>) -> DocsResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DocsResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DocsError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
