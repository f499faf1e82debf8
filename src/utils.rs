//! Path display helpers

use std::path::Path;

/// Show `path` relative to `root` when possible, with `/` separators
pub fn display_path(root: &Path, path: &Path) -> String {
  let relative = if path.is_absolute() == root.is_absolute() {
    pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
  } else {
    path.to_path_buf()
  };

  let shown = relative.to_string_lossy().replace('\\', "/");
  if shown.is_empty() { ".".to_string() } else { shown }
}
