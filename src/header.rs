//! # Header Module
//!
//! This module implements the header detector/comparator and the header
//! updater.
//!
//! A "leading block comment" is the region from the first `/*` (after
//! optional leading whitespace) up to the first `*/`. Detection and
//! replacement share that rule, which is what makes `apply` idempotent: the
//! header a run just inserted is what the next run detects and replaces.
//!
//! Comparison uses wildcard mode: a matching pattern is built from the raw
//! template where every declared variable placeholder becomes a non-greedy
//! any-characters wildcard and all other text is escaped literally. A file
//! whose header differs from the template only in a variable's value is
//! therefore considered valid.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::LineEnding;
use crate::template::HeaderTemplate;

/// Captures the body of a leading block comment.
static LEADING_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used)] // literal pattern, checked by tests
  Regex::new(r"(?s)\A\s*/\*(.*?)\*/").unwrap()
});

/// Matches a leading block comment plus the whitespace run after it.
static LEADING_COMMENT_WITH_TRAILER: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used)] // literal pattern, checked by tests
  Regex::new(r"(?s)\A\s*/\*.*?\*/\s*").unwrap()
});

/// Strips the ` * ` / `*` decoration from a header body line.
static LINE_DECORATION: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used)] // literal pattern, checked by tests
  Regex::new(r"^\s*\*\s?").unwrap()
});

/// Same placeholder forms the template processor substitutes.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used)] // literal pattern, checked by tests
  Regex::new(r"\$\{([A-Za-z0-9_.-]+)\}|\{\{([A-Za-z0-9_.-]+)\}\}").unwrap()
});

/// Error returned when the wildcard header pattern cannot be compiled.
#[derive(Debug, Error)]
#[error("Failed to build header matching pattern: {source}")]
pub struct HeaderPatternError {
  #[source]
  source: regex::Error,
}

/// Compiled wildcard matcher for header bodies.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
  regex: Regex,
}

impl HeaderMatcher {
  /// Builds a matcher from the template.
  ///
  /// Declared variable placeholders (`${name}` or `{{name}}`) become
  /// non-greedy wildcards; every other character matches literally. The
  /// pattern is normalized the same way extracted header bodies are (each
  /// line trimmed, surrounding blank lines dropped) so decoration and
  /// indentation differences never cause false negatives.
  pub fn from_template(template: &HeaderTemplate) -> Result<Self, HeaderPatternError> {
    let declared: HashSet<&str> = template.variable_names().collect();
    let normalized = normalize_body(template.text());

    let mut expr = String::with_capacity(normalized.len() * 2 + 8);
    expr.push_str("(?s)^");

    let mut last_end = 0;
    for caps in PLACEHOLDER.captures_iter(&normalized) {
      let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
      let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or("");

      expr.push_str(&regex::escape(&normalized[last_end..whole.0]));
      if declared.contains(name) {
        expr.push_str(".*?");
      } else {
        // Undeclared placeholders render as-is, so they match literally.
        expr.push_str(&regex::escape(&normalized[whole.0..whole.1]));
      }
      last_end = whole.1;
    }
    expr.push_str(&regex::escape(&normalized[last_end..]));
    expr.push('$');

    let regex = Regex::new(&expr).map_err(|source| HeaderPatternError { source })?;
    Ok(Self { regex })
  }

  /// Checks whether the file content carries a valid leading header.
  ///
  /// Returns `false` when no leading block comment exists at all.
  pub fn is_valid(&self, content: &str) -> bool {
    match extract_header_body(content) {
      Some(body) => self.regex.is_match(&body),
      None => false,
    }
  }
}

/// Extracts the normalized body of the leading block comment, if any.
///
/// The file must begin, after optional whitespace, with `/*`; the first
/// `*/` closes the comment. Each body line is stripped of its leading
/// `*` decoration and trimmed.
pub fn extract_header_body(content: &str) -> Option<String> {
  let captures = LEADING_COMMENT.captures(content)?;
  let raw = captures.get(1)?.as_str();

  let stripped = raw
    .lines()
    .map(|line| LINE_DECORATION.replace(line, "").trim().to_string())
    .collect::<Vec<_>>()
    .join("\n");

  Some(stripped.trim().to_string())
}

/// Rewrites file content so it starts with the rendered header comment.
///
/// Any existing leading block comment is stripped, including the whitespace
/// run that follows it. Exactly `spacing_lines` blank lines separate the
/// header from the remaining content (zero is legal), and every line ending
/// in the output is normalized to the configured style.
pub fn update(content: &str, rendered_comment: &str, line_ending: LineEnding, spacing_lines: usize) -> String {
  let remainder = match LEADING_COMMENT_WITH_TRAILER.find(content) {
    Some(m) => &content[m.end()..],
    None => content,
  };

  let mut updated = String::with_capacity(rendered_comment.len() + spacing_lines + remainder.len() + 1);
  updated.push_str(rendered_comment);
  for _ in 0..=spacing_lines {
    updated.push('\n');
  }
  updated.push_str(remainder);

  normalize_line_endings(&updated, line_ending)
}

/// Normalizes every line ending in the text to the configured style.
///
/// CRLF output is produced in two phases (collapse to LF, then expand) so
/// mixed or already-CRLF input never yields `\r\r\n`.
pub fn normalize_line_endings(text: &str, line_ending: LineEnding) -> String {
  let unified = text.replace("\r\n", "\n");
  match line_ending {
    LineEnding::Lf => unified,
    LineEnding::Crlf => unified.replace('\n', "\r\n"),
  }
}

/// Trims each line and the whole text, mirroring [`extract_header_body`].
fn normalize_body(text: &str) -> String {
  text
    .lines()
    .map(str::trim)
    .collect::<Vec<_>>()
    .join("\n")
    .trim()
    .to_string()
}
