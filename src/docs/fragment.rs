//! In-app "What's New" fragment
//!
//! The welcome tour in the app's Swift source has one `TourPage(...)` block that
//! presents the current release. Its shape is fixed: title, subtitle, bullet list,
//! icon, colour pair and an empty toolbar list. Only the subtitle and bullets vary
//! between releases, and the whole block is replaced on each run.

use crate::core::error::{AnchorError, DocsResult};
use crate::docs::summary::bullet_text;
use regex::Regex;
use serde::Deserialize;

const PAGE_INDENT: &str = "        ";
const FIELD_INDENT: &str = "            ";
const BULLET_INDENT: &str = "                ";

/// Bullet shown when the release has nothing to list
pub const FALLBACK_BULLET: &str = "See CHANGELOG.md for details";

/// Literal fields that identify the "What's New" page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FragmentTemplate {
  /// Page title; `'` and `’` are interchangeable when matching
  pub title: String,
  /// SF Symbol name in `iconName:`
  pub icon_name: String,
  /// Swift expression in `colors:`
  pub colors: String,
}

impl Default for FragmentTemplate {
  fn default() -> Self {
    Self {
      title: "What\u{2019}s New in This Release".to_string(),
      icon_name: "sparkles.rectangle.stack".to_string(),
      colors: "[Color(red: 0.40, green: 0.28, blue: 0.90), Color(red: 0.96, green: 0.46, blue: 0.55)]".to_string(),
    }
  }
}

/// Replaces the "What's New" block in a UI source file
#[derive(Debug, Clone)]
pub struct FragmentSynchronizer {
  template: FragmentTemplate,
  block: Regex,
}

impl FragmentSynchronizer {
  pub fn new(template: FragmentTemplate) -> DocsResult<Self> {
    let title = regex::escape(&swift_string(&template.title)).replace(['\'', '\u{2019}'], "['\u{2019}]");
    let block = Regex::new(&format!(
      concat!(
        r#"(?s){page}TourPage\(\n"#,
        r#"{field}title: "{title}",\n"#,
        r#"{field}subtitle: [^\n]*\n"#,
        r#"{field}bullets: \[\n"#,
        r#".*?"#,
        r#"{field}\],\n"#,
        r#"{field}iconName: "{icon}",\n"#,
        r#"{field}colors: {colors},\n"#,
        r#"{field}toolbarItems: \[\]\n"#,
        r#"{page}\),"#,
      ),
      page = PAGE_INDENT,
      field = FIELD_INDENT,
      title = title,
      icon = regex::escape(&swift_string(&template.icon_name)),
      colors = regex::escape(&template.colors),
    ))?;

    Ok(Self { template, block })
  }

  /// Render the block for `tag`
  ///
  /// The subtitle points at `previous` when there is one.
  pub fn render(&self, tag: &str, bullets: &[String], previous: Option<&str>) -> String {
    let bullet_lines: Vec<String> = if bullets.is_empty() {
      vec![format!("{}\"{}\"", BULLET_INDENT, FALLBACK_BULLET)]
    } else {
      bullets
        .iter()
        .map(|bullet| format!("{}\"{}\"", BULLET_INDENT, swift_string(bullet_text(bullet))))
        .collect()
    };

    let subtitle = match previous {
      Some(prev) => format!("Major changes since {}:", prev),
      None => format!("Highlights for {}:", tag),
    };

    let mut block = String::new();
    block.push_str(&format!("{}TourPage(\n", PAGE_INDENT));
    block.push_str(&format!("{}title: \"{}\",\n", FIELD_INDENT, swift_string(&self.template.title)));
    block.push_str(&format!("{}subtitle: \"{}\",\n", FIELD_INDENT, swift_string(&subtitle)));
    block.push_str(&format!("{}bullets: [\n", FIELD_INDENT));
    block.push_str(&bullet_lines.join(",\n"));
    block.push('\n');
    block.push_str(&format!("{}],\n", FIELD_INDENT));
    block.push_str(&format!("{}iconName: \"{}\",\n", FIELD_INDENT, swift_string(&self.template.icon_name)));
    // Swift expression, written verbatim
    block.push_str(&format!("{}colors: {},\n", FIELD_INDENT, self.template.colors));
    block.push_str(&format!("{}toolbarItems: []\n", FIELD_INDENT));
    block.push_str(&format!("{}),", PAGE_INDENT));
    block
  }

  /// Swap the single "What's New" block in `source` for a freshly rendered one
  pub fn apply(&self, source: &str, tag: &str, bullets: &[String], previous: Option<&str>) -> DocsResult<String> {
    let matches: Vec<_> = self.block.find_iter(source).collect();
    let [found] = matches.as_slice() else {
      return Err(AnchorError::FragmentBlock { found: matches.len() }.into());
    };

    let rendered = self.render(tag, bullets, previous);
    Ok(format!("{}{}{}", &source[..found.start()], rendered, &source[found.end()..]))
  }
}

/// Escape text for a Swift string literal
pub fn swift_string(value: &str) -> String {
  value.replace('\\', "\\\\").replace('"', "\\\"")
}
