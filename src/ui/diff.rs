//! Unified diffs for check mode

use similar::TextDiff;

const CONTEXT_LINES: usize = 3;

/// Render a unified diff between the on-disk text and the synced candidate
///
/// `label` names the file in the `---`/`+++` headers. Returns an empty string
/// when the texts are identical.
pub fn unified_diff(label: &str, current: &str, expected: &str) -> String {
  if current == expected {
    return String::new();
  }

  let old_header = format!("a/{}", label);
  let new_header = format!("b/{}", label);
  TextDiff::from_lines(current, expected)
    .unified_diff()
    .context_radius(CONTEXT_LINES)
    .header(&old_header, &new_header)
    .to_string()
}
