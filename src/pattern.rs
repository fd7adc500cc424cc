//! # Pattern Module
//!
//! This module translates simplified glob patterns into path-matching
//! predicates. Supported wildcards are `*` (zero or more of any character,
//! including `/`) and `?` (exactly one character); everything else is matched
//! literally.
//!
//! Note that because `*` matches path separators, `**/*.kt` and `*.kt` behave
//! identically here. This is a deliberate simplification, not standard glob
//! behavior: patterns stay platform-independent because paths are normalized
//! to `/` separators before matching.

use regex::Regex;
use thiserror::Error;

/// Error returned when a glob pattern cannot be compiled.
#[derive(Debug, Error)]
#[error("Invalid glob pattern '{pattern}': {source}")]
pub struct PatternError {
  /// The original pattern string
  pub pattern: String,
  /// The underlying regex compilation error
  #[source]
  pub source: regex::Error,
}

/// A compiled glob pattern.
///
/// Matching uses full-match semantics: the whole path must satisfy the
/// pattern, not just a substring of it.
///
/// # Examples
///
/// ```rust
/// use headsync::pattern::GlobPattern;
///
/// let pattern = GlobPattern::compile("**/*.kt").unwrap();
/// assert!(pattern.matches("src/main/kotlin/Foo.kt"));
/// assert!(!pattern.matches("src/main/resources/Foo.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct GlobPattern {
  /// The original pattern string, kept for error reporting
  source: String,
  /// The compiled anchored regex
  regex: Regex,
}

impl GlobPattern {
  /// Compiles a glob pattern into a matcher.
  ///
  /// Every regex metacharacter except `*` and `?` is escaped, then `*` is
  /// rewritten to match zero or more of any character and `?` to match
  /// exactly one. The resulting expression is anchored at both ends.
  ///
  /// # Errors
  ///
  /// Returns a [`PatternError`] if the generated expression does not compile.
  /// Invalid patterns never silently match everything.
  pub fn compile(pattern: &str) -> Result<Self, PatternError> {
    let mut expr = String::with_capacity(pattern.len() * 2 + 2);
    expr.push('^');

    for ch in pattern.chars() {
      match ch {
        '*' => expr.push_str(".*"),
        '?' => expr.push('.'),
        c => expr.push_str(&regex::escape(&c.to_string())),
      }
    }

    expr.push('$');

    let regex = Regex::new(&expr).map_err(|source| PatternError {
      pattern: pattern.to_string(),
      source,
    })?;

    Ok(Self {
      source: pattern.to_string(),
      regex,
    })
  }

  /// Compiles a list of patterns, failing on the first invalid one.
  pub fn compile_all(patterns: &[String]) -> Result<Vec<Self>, PatternError> {
    patterns.iter().map(|p| Self::compile(p)).collect()
  }

  /// Checks whether the given path satisfies this pattern.
  ///
  /// The path is expected to use `/` separators; callers normalize
  /// platform-specific separators before matching.
  pub fn matches(&self, path: &str) -> bool {
    self.regex.is_match(path)
  }

  /// Returns the original pattern string.
  pub fn as_str(&self) -> &str {
    &self.source
  }
}
