//! Pure release-docs sync over in-memory documents
//!
//! Nothing here touches the filesystem. Callers read the three documents,
//! hand them to [`ReleaseDocsSync::apply`], and decide what to do with the
//! candidates (write them, or compare them in check mode).

use crate::core::config::DocsConfig;
use crate::core::error::DocsResult;
use crate::docs::changelog::ChangelogDocument;
use crate::docs::fragment::FragmentSynchronizer;
use crate::docs::readme::ReadmeSynchronizer;
use crate::docs::summary::summarize;
use crate::release::tag::ReleaseTag;
use crate::release::version::TagOrdering;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// One of the three documents kept in sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
  Changelog,
  Readme,
  Fragment,
}

impl DocumentKind {
  /// Write order
  pub const ALL: [DocumentKind; 3] = [DocumentKind::Changelog, DocumentKind::Readme, DocumentKind::Fragment];
}

impl fmt::Display for DocumentKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DocumentKind::Changelog => write!(f, "changelog"),
      DocumentKind::Readme => write!(f, "readme"),
      DocumentKind::Fragment => write!(f, "fragment"),
    }
  }
}

/// Full text of the three documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDocuments {
  pub changelog: String,
  pub readme: String,
  pub fragment: String,
}

impl ReleaseDocuments {
  pub fn get(&self, kind: DocumentKind) -> &str {
    match kind {
      DocumentKind::Changelog => &self.changelog,
      DocumentKind::Readme => &self.readme,
      DocumentKind::Fragment => &self.fragment,
    }
  }

  /// Documents whose text differs from `other`, in write order
  pub fn changed(&self, other: &ReleaseDocuments) -> Vec<DocumentKind> {
    DocumentKind::ALL
      .into_iter()
      .filter(|kind| self.get(*kind) != other.get(*kind))
      .collect()
  }
}

/// Result of one sync run
#[derive(Debug, Clone)]
pub struct SyncOutcome {
  pub tag: ReleaseTag,
  /// A templated changelog section was added for `tag`
  pub created_section: bool,
  /// Release the fragment subtitle points back to
  pub previous_tag: Option<String>,
  /// Candidate documents
  pub documents: ReleaseDocuments,
}

/// Changelog -> README -> UI fragment pipeline
#[derive(Debug, Clone)]
pub struct ReleaseDocsSync {
  prefix: String,
  ordering: TagOrdering,
  readme: ReadmeSynchronizer,
  fragment: FragmentSynchronizer,
  readme_bullets: usize,
  fragment_bullets: usize,
}

impl ReleaseDocsSync {
  pub fn from_config(config: &DocsConfig) -> DocsResult<Self> {
    let settings = &config.release;
    let ordering = TagOrdering::new(settings.tag_prefix.as_str());

    Ok(Self {
      prefix: settings.tag_prefix.clone(),
      readme: ReadmeSynchronizer::new(ordering.clone(), settings.readme_window, settings.readme_bullets),
      fragment: FragmentSynchronizer::new(config.fragment.clone())?,
      ordering,
      readme_bullets: settings.readme_bullets,
      fragment_bullets: settings.fragment_bullets,
    })
  }

  /// Tag prefix used for normalization
  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  /// Produce the candidate documents for `tag`
  ///
  /// `date` is only used when the changelog has no section for `tag` yet.
  pub fn apply(&self, docs: &ReleaseDocuments, tag: &ReleaseTag, date: NaiveDate) -> DocsResult<SyncOutcome> {
    let tag_str = tag.as_str();

    let mut changelog = ChangelogDocument::new(docs.changelog.as_str(), &self.prefix)?;
    let created_section = changelog.ensure_section(tag_str, date)?;
    tracing::debug!(tag = tag_str, created_section, "changelog section ready");

    let body = changelog.section_body(tag_str)?;
    let readme_bullets = summarize(body, self.readme_bullets);
    let fragment_bullets = summarize(body, self.fragment_bullets);
    tracing::debug!(bullets = readme_bullets.len(), "summarized changelog section");

    let readme = self.readme.update_refs(&docs.readme, tag_str);
    let readme = self.readme.upsert_summary(&readme, tag_str, &readme_bullets)?;
    let readme = self.readme.rebuild_summaries(&readme, &changelog, tag_str)?;

    let previous_tag = self.ordering.previous_release(&changelog.release_tags(), tag_str);
    tracing::debug!(?previous_tag, "resolved previous release");

    let fragment = self
      .fragment
      .apply(&docs.fragment, tag_str, &fragment_bullets, previous_tag.as_deref())?;

    Ok(SyncOutcome {
      tag: tag.clone(),
      created_section,
      previous_tag,
      documents: ReleaseDocuments {
        changelog: changelog.text().to_string(),
        readme,
        fragment,
      },
    })
  }
}
