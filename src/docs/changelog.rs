//! Changelog section detection, creation and extraction
//!
//! The changelog is a Keep-a-Changelog style document: releases are `## [tag] - YYYY-MM-DD`
//! headings, newest first, each followed by `### Group` sub-headings with bullet lists.

use crate::core::error::{DocsError, DocsResult};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Sub-groups of a freshly templated section, in order
pub const TEMPLATE_GROUPS: [&str; 3] = ["Added", "Improved", "Fixed"];

/// Placeholder bullet written into each templated group
pub const PLACEHOLDER_BULLET: &str = "- TODO";

static RELEASE_HEADING_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?m)^## \[").expect("release heading pattern is a valid regex"));

/// A changelog document held in memory
#[derive(Debug, Clone)]
pub struct ChangelogDocument {
  text: String,
  /// Dated headings whose tag carries the release prefix
  dated_heading: Regex,
}

impl ChangelogDocument {
  pub fn new(text: impl Into<String>, prefix: &str) -> DocsResult<Self> {
    let dated_heading = Regex::new(&format!(
      r"(?m)^## \[({}[^\]]+)\] - \d{{4}}-\d{{2}}-\d{{2}}$",
      regex::escape(prefix)
    ))?;

    Ok(Self {
      text: text.into(),
      dated_heading,
    })
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  /// Check if a `## [tag] - YYYY-MM-DD` heading exists for exactly this tag
  pub fn has_section(&self, tag: &str) -> DocsResult<bool> {
    let heading = Regex::new(&format!(
      r"(?m)^## \[{}\] - \d{{4}}-\d{{2}}-\d{{2}}$",
      regex::escape(tag)
    ))?;
    Ok(heading.is_match(&self.text))
  }

  /// Insert a templated section for `tag` above the newest release
  ///
  /// Does not look for an existing section; see [`Self::ensure_section`].
  pub fn add_section(&mut self, tag: &str, date: NaiveDate) {
    let template = section_template(tag, date);

    match RELEASE_HEADING_RE.find(&self.text) {
      Some(first) => self.text.insert_str(first.start(), &template),
      None => {
        let trimmed_len = self.text.trim_end().len();
        self.text.truncate(trimmed_len);
        self.text.push_str("\n\n");
        self.text.push_str(&template);
      }
    }
  }

  /// Add a templated section unless one exists; returns whether it was created
  pub fn ensure_section(&mut self, tag: &str, date: NaiveDate) -> DocsResult<bool> {
    if self.has_section(tag)? {
      return Ok(false);
    }
    self.add_section(tag, date);
    Ok(true)
  }

  /// Body of the section for `tag`, up to the next release heading
  ///
  /// Leading and trailing blank lines are trimmed.
  pub fn section_body(&self, tag: &str) -> DocsResult<&str> {
    let heading = Regex::new(&format!(r"(?m)^## \[{}\] - [^\n]*(?:\n|\z)", regex::escape(tag)))?;
    let found = heading
      .find(&self.text)
      .ok_or_else(|| DocsError::SectionNotFound { tag: tag.to_string() })?;

    let body_start = found.end();
    let body_end = RELEASE_HEADING_RE
      .find_at(&self.text, body_start)
      .map_or(self.text.len(), |next| next.start());

    Ok(self.text[body_start..body_end].trim())
  }

  /// Tags of every dated release heading, in document order
  pub fn release_tags(&self) -> Vec<String> {
    self
      .dated_heading
      .captures_iter(&self.text)
      .map(|caps| caps[1].to_string())
      .collect()
  }
}

fn section_template(tag: &str, date: NaiveDate) -> String {
  let mut template = format!("## [{}] - {}\n\n", tag, date.format("%Y-%m-%d"));
  for group in TEMPLATE_GROUPS {
    template.push_str(&format!("### {}\n{}\n\n", group, PLACEHOLDER_BULLET));
  }
  template
}
