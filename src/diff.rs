//! # Diff Module
//!
//! This module renders diffs between a file's current content and the
//! content `apply` would write. It is used by check mode's `--show-diff`
//! flag to preview pending changes without mutating anything.

use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff};

/// Renders a line diff between the original and updated content.
///
/// The output uses `-`/`+`/` ` markers per line, prefixed by a header naming
/// the file, in the style of `diff` output.
pub fn render_diff(relative_path: &str, original: &str, updated: &str) -> String {
  let diff = TextDiff::from_lines(original, updated);

  let mut rendered = String::new();
  let _ = writeln!(rendered, "--- {relative_path}");
  let _ = writeln!(rendered, "+++ {relative_path} (with header)");

  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    let _ = write!(rendered, "{sign}{change}");
    if change.missing_newline() {
      rendered.push('\n');
    }
  }

  rendered
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_diff_marks_inserted_header() {
    let original = "class Foo {}\n";
    let updated = "/*\n * Copyright 2024\n */\n\nclass Foo {}\n";

    let rendered = render_diff("src/Foo.java", original, updated);

    assert!(rendered.starts_with("--- src/Foo.java\n"));
    assert!(rendered.contains("+/*\n"));
    assert!(rendered.contains("+ * Copyright 2024\n"));
    assert!(rendered.contains(" class Foo {}\n"));
  }

  #[test]
  fn test_render_diff_identical_content_has_no_change_markers() {
    let rendered = render_diff("src/Foo.java", "same\n", "same\n");
    assert!(!rendered.lines().skip(2).any(|l| l.starts_with('+') || l.starts_with('-')));
  }
}
