//! Version-aware ordering of release tags
//!
//! Tags are compared by a derived [`VersionKey`] rather than as text, so
//! `v0.4.10` sorts above `v0.4.9` and a stable release outranks its own
//! pre-releases. Tags that do not look like versions still sort, just below
//! every tag that does.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z.-]+))?$").expect("version pattern is a valid regex")
});

/// Release stability, ordered so stable sorts above pre-release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stability {
  Prerelease,
  Stable,
}

/// Sort key for a release tag
///
/// Variant order matters: every `Unversioned` key sorts below every
/// `Versioned` key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionKey {
  /// Tag outside the `MAJOR.MINOR.PATCH[-PRE]` shape, ordered by raw text
  Unversioned(String),
  Versioned {
    major: u64,
    minor: u64,
    patch: u64,
    stability: Stability,
    /// Pre-release label compared as plain text (empty for stable)
    prerelease: String,
  },
}

/// Ordering and lookup over tags sharing one release prefix
#[derive(Debug, Clone)]
pub struct TagOrdering {
  prefix: String,
}

impl TagOrdering {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self { prefix: prefix.into() }
  }

  /// Derive the sort key for a tag (never fails)
  pub fn key(&self, tag: &str) -> VersionKey {
    let Some(version) = tag.strip_prefix(self.prefix.as_str()) else {
      return VersionKey::Unversioned(tag.to_string());
    };
    let Some(caps) = VERSION_RE.captures(version) else {
      return VersionKey::Unversioned(tag.to_string());
    };

    let numbers = (caps[1].parse::<u64>(), caps[2].parse::<u64>(), caps[3].parse::<u64>());
    let (Ok(major), Ok(minor), Ok(patch)) = numbers else {
      // Components too large for u64
      return VersionKey::Unversioned(tag.to_string());
    };

    match caps.get(4) {
      Some(pre) => VersionKey::Versioned {
        major,
        minor,
        patch,
        stability: Stability::Prerelease,
        prerelease: pre.as_str().to_string(),
      },
      None => VersionKey::Versioned {
        major,
        minor,
        patch,
        stability: Stability::Stable,
        prerelease: String::new(),
      },
    }
  }

  /// Check if a tag names a pre-release (a `-suffix` after the prefix)
  pub fn is_prerelease(&self, tag: &str) -> bool {
    tag.strip_prefix(self.prefix.as_str()).unwrap_or(tag).contains('-')
  }

  /// Select the `limit` newest tags, newest first
  ///
  /// Duplicates collapse onto their first occurrence. When `ensure` is given
  /// and did not make the cut it is prepended and the rest truncated, so the
  /// lowest-ranked member of the window gives way.
  pub fn latest<S: AsRef<str>>(&self, tags: &[S], limit: usize, ensure: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<&str> = tags
      .iter()
      .map(AsRef::as_ref)
      .filter(|tag| seen.insert(*tag))
      .collect();

    // Stable sort keeps document order among equal keys
    unique.sort_by_cached_key(|tag| std::cmp::Reverse(self.key(tag)));

    let mut top: Vec<String> = unique.into_iter().take(limit).map(str::to_string).collect();

    if let Some(tag) = ensure
      && !top.iter().any(|t| t == tag)
    {
      top.truncate(limit.saturating_sub(1));
      top.insert(0, tag.to_string());
    }

    top
  }

  /// Find the release that precedes `tag` in a newest-first heading list
  ///
  /// For a stable `tag`, intermediate pre-releases are skipped so the
  /// "since" reference of `v0.4.8` points at `v0.4.7`, not `v0.4.8-rc.1`.
  pub fn previous_release<S: AsRef<str>>(&self, headings: &[S], tag: &str) -> Option<String> {
    let idx = headings.iter().position(|h| h.as_ref() == tag)?;
    let skip_prereleases = !self.is_prerelease(tag);

    headings[idx + 1..]
      .iter()
      .map(AsRef::as_ref)
      .find(|candidate| !(skip_prereleases && self.is_prerelease(candidate)))
      .map(str::to_string)
  }
}
