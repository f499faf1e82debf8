//! Release tag normalization
//!
//! Every other module keys documents by the canonical tag produced here,
//! so `0.4.6` and `v0.4.6` always address the same changelog section.

use crate::core::error::{DocsError, DocsResult};
use std::fmt;

/// Default release prefix (`v1.2.3`)
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Canonical release tag, e.g. `v1.2.3` or `v1.2.3-beta.1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseTag(String);

impl ReleaseTag {
  /// Trim `raw` and prepend `prefix` unless it is already there
  pub fn normalize(raw: &str, prefix: &str) -> DocsResult<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(DocsError::InvalidTag { raw: raw.to_string() });
    }

    if trimmed.starts_with(prefix) {
      Ok(Self(trimmed.to_string()))
    } else {
      Ok(Self(format!("{}{}", prefix, trimmed)))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ReleaseTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for ReleaseTag {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
