//! README release references and the rolling changelog summary
//!
//! The README carries two kinds of release data:
//!
//! - **References**: single lines naming the latest tag (a blockquote, a list item,
//!   a `Tag:` line and a `git rev-parse --verify` command). These are rewritten in place.
//! - **Summaries**: one `### <tag> (summary)` block per recent release, between the
//!   `## Changelog` header and the `Full release history:` marker. This region is
//!   regenerated from the changelog on every run.

use crate::core::error::{AnchorError, DocsResult};
use crate::docs::changelog::ChangelogDocument;
use crate::docs::summary::summarize;
use crate::release::version::TagOrdering;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Header that opens the summary region (including its blank line)
pub const CHANGELOG_HEADER: &str = "## Changelog\n\n";

/// Marker that closes the summary region
pub const HISTORY_MARKER: &str = "Full release history:";

struct ReferenceRule {
  pattern: Regex,
  render: fn(&str) -> String,
}

impl ReferenceRule {
  fn new(pattern: &str, render: fn(&str) -> String) -> Self {
    Self {
      pattern: Regex::new(pattern).expect("reference pattern is a valid regex"),
      render,
    }
  }
}

static REFERENCE_RULES: LazyLock<[ReferenceRule; 4]> = LazyLock::new(|| {
  [
    ReferenceRule::new(r"(?m)^> Latest release: \*\*.*\*\*$", |tag| {
      format!("> Latest release: **{}**", tag)
    }),
    ReferenceRule::new(r"(?m)^- Latest release: \*\*.*\*\*$", |tag| {
      format!("- Latest release: **{}**", tag)
    }),
    ReferenceRule::new(r"(?m)^- Tag: `.*`$", |tag| format!("- Tag: `{}`", tag)),
    ReferenceRule::new(r"(?m)^git rev-parse --verify .*$", |tag| {
      format!("git rev-parse --verify {}", tag)
    }),
  ]
});

static NEXT_HEADING_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^#{1,3} ").expect("heading pattern is a valid regex"));

/// Rewrites README release references and summary blocks
#[derive(Debug, Clone)]
pub struct ReadmeSynchronizer {
  ordering: TagOrdering,
  /// Number of releases kept in the summary region
  window: usize,
  /// Bullets per summary block
  bullet_limit: usize,
}

impl ReadmeSynchronizer {
  pub fn new(ordering: TagOrdering, window: usize, bullet_limit: usize) -> Self {
    Self {
      ordering,
      window,
      bullet_limit,
    }
  }

  /// Point every "latest release" reference line at `tag`
  pub fn update_refs(&self, readme: &str, tag: &str) -> String {
    let mut updated = readme.to_string();
    for rule in REFERENCE_RULES.iter() {
      let replacement = (rule.render)(tag);
      updated = rule.pattern.replace_all(&updated, NoExpand(&replacement)).into_owned();
    }
    updated
  }

  /// Replace the block for `tag` and put it first in the summary region
  ///
  /// Every existing `### <tag> (summary)` block is removed, wherever it sits.
  pub fn upsert_summary(&self, readme: &str, tag: &str, bullets: &[String]) -> DocsResult<String> {
    if !readme.contains(CHANGELOG_HEADER) {
      return Err(AnchorError::ChangelogHeader.into());
    }

    let mut updated = remove_summaries(readme, tag)?;
    let insert_at = updated
      .find(CHANGELOG_HEADER)
      .ok_or(AnchorError::ChangelogHeader)?
      + CHANGELOG_HEADER.len();
    updated.insert_str(insert_at, &format!("{}\n", summary_block(tag, bullets)));

    Ok(updated)
  }

  /// Regenerate the summary region from the changelog
  ///
  /// Keeps the newest `window` releases, always including `current_tag`.
  pub fn rebuild_summaries(&self, readme: &str, changelog: &ChangelogDocument, current_tag: &str) -> DocsResult<String> {
    let region_start = readme.find(CHANGELOG_HEADER).ok_or(AnchorError::ChangelogHeader)? + CHANGELOG_HEADER.len();
    let region_end = readme[region_start..]
      .find(HISTORY_MARKER)
      .map(|offset| region_start + offset)
      .ok_or(AnchorError::HistoryMarker)?;

    let tags = changelog.release_tags();
    let selected = self.ordering.latest(&tags, self.window, Some(current_tag));
    tracing::debug!(?selected, window = self.window, "rebuilding README summaries");

    let blocks = selected
      .iter()
      .map(|tag| -> DocsResult<String> {
        let body = changelog.section_body(tag)?;
        Ok(summary_block(tag, &summarize(body, self.bullet_limit)))
      })
      .collect::<DocsResult<Vec<_>>>()?;

    Ok(format!(
      "{}{}\n{}",
      &readme[..region_start],
      blocks.join("\n"),
      &readme[region_end..]
    ))
  }
}

fn summary_block(tag: &str, bullets: &[String]) -> String {
  format!("### {} (summary)\n\n{}\n", tag, bullets.join("\n"))
}

/// Drop every summary block for `tag`
///
/// A block runs until the next heading, the history marker or the end of the document.
fn remove_summaries(readme: &str, tag: &str) -> DocsResult<String> {
  let block_start = Regex::new(&format!(r"(?m)^### {} \(summary\)\n\n", regex::escape(tag)))?;

  let mut kept = String::with_capacity(readme.len());
  let mut cursor = 0;
  while let Some(found) = block_start.find_at(readme, cursor) {
    kept.push_str(&readme[cursor..found.start()]);
    cursor = block_end(readme, found.end());
  }
  kept.push_str(&readme[cursor..]);

  Ok(kept)
}

fn block_end(readme: &str, from: usize) -> usize {
  let next_heading = NEXT_HEADING_RE.find_at(readme, from).map(|m| m.start());
  let marker = readme[from..].find(HISTORY_MARKER).map(|offset| from + offset);

  [next_heading, marker].into_iter().flatten().min().unwrap_or(readme.len())
}
