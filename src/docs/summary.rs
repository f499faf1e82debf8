//! Bullet summaries of changelog sections

/// Default number of bullets kept per summary
pub const DEFAULT_LIMIT: usize = 5;

/// Bullet used when a section has no bullets of its own
pub const FALLBACK_BULLET: &str = "- See CHANGELOG.md entry.";

const BULLET_MARKER: &str = "- ";

/// Reduce a section body to at most `limit` bullet lines, in authored order
pub fn summarize(body: &str, limit: usize) -> Vec<String> {
  let bullets: Vec<String> = body
    .lines()
    .map(str::trim)
    .filter(|line| line.starts_with(BULLET_MARKER))
    .map(str::to_string)
    .collect();

  if bullets.is_empty() {
    return vec![FALLBACK_BULLET.to_string()];
  }

  bullets.into_iter().take(limit).collect()
}

/// Bullet text without its list marker
pub fn bullet_text(bullet: &str) -> &str {
  bullet.strip_prefix(BULLET_MARKER).unwrap_or(bullet)
}
