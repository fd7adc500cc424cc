//! # Template Module
//!
//! This module loads the header template file, substitutes declared
//! variables, and renders the result as a block comment.
//!
//! Two placeholder syntaxes are recognized: `${key}` and `{{key}}`.
//! Substitution is a single literal pass over the template, so a variable
//! value that itself contains a placeholder is never re-expanded, and the
//! result is independent of the order in which variables were declared.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

/// Matches both `${name}` and `{{name}}` placeholder forms.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used)] // literal pattern, checked by tests
  Regex::new(r"\$\{([A-Za-z0-9_.-]+)\}|\{\{([A-Za-z0-9_.-]+)\}\}").unwrap()
});

/// A loaded header template plus its variable substitution map.
///
/// Rendering is pure: the same template and variables always yield the same
/// output, so the rendered header is computed once per run and treated as a
/// constant for every file.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
  /// Raw text content of the header file
  text: String,
  /// Variable name to replacement value
  variables: BTreeMap<String, String>,
}

impl HeaderTemplate {
  /// Creates a template from raw text and variables.
  pub const fn new(text: String, variables: BTreeMap<String, String>) -> Self {
    Self { text, variables }
  }

  /// Loads a template from the given file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist or cannot be read. Both
  /// commands fail fast on this before touching any source file.
  pub fn load(path: &Path, variables: BTreeMap<String, String>) -> Result<Self> {
    debug!("Loading header template from: {}", path.display());

    let text =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read header template: {}", path.display()))?;

    Ok(Self::new(text, variables))
  }

  /// Renders the template with all declared variables substituted.
  ///
  /// Placeholders naming undeclared variables are left as-is.
  pub fn render(&self) -> String {
    PLACEHOLDER
      .replace_all(&self.text, |caps: &Captures<'_>| {
        let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()).unwrap_or("");
        match self.variables.get(name) {
          Some(value) => value.clone(),
          None => caps[0].to_string(),
        }
      })
      .into_owned()
  }

  /// Renders the template and wraps it as a block comment.
  ///
  /// The rendered text is trimmed, then each non-blank line is prefixed with
  /// ` * ` and blank lines are emitted as ` *` with no trailing space. The
  /// whole body is bounded by a `/*` line and a ` */` line (no trailing
  /// newline; spacing after the comment is the updater's concern).
  pub fn render_as_comment(&self) -> String {
    as_block_comment(&self.render())
  }

  /// Returns the declared variable names.
  pub fn variable_names(&self) -> impl Iterator<Item = &str> {
    self.variables.keys().map(String::as_str)
  }

  /// Returns the raw template text.
  pub fn text(&self) -> &str {
    &self.text
  }
}

/// Wraps already-rendered text as a `/* ... */` block comment.
pub fn as_block_comment(rendered: &str) -> String {
  let mut comment = String::from("/*\n");

  for line in rendered.trim().lines() {
    if line.trim().is_empty() {
      comment.push_str(" *\n");
    } else {
      comment.push_str(" * ");
      comment.push_str(line);
      comment.push('\n');
    }
  }

  comment.push_str(" */");
  comment
}
