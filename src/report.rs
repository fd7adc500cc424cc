//! # Report Module
//!
//! This module captures the per-file results of a run and renders them for
//! scripting consumers.
//!
//! Check reports are deterministic: files appear in lexicographic order of
//! their relative path, so CI output is stable across runs and diffable. The
//! JSON form is emitted with `serde_json` for machine consumption.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Validation status of a single checked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
  /// The leading header matches the template (variables as wildcards)
  Valid,
  /// The header is missing or does not match the template
  Invalid,
}

/// Result of checking one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
  /// Project-relative path with `/` separators
  pub path: String,
  pub status: FileStatus,
}

/// Outcome of a `check` run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
  /// Every checked file, in relative-path order
  pub files: Vec<FileRecord>,
  /// Number of files checked
  pub checked: usize,
  /// Relative paths of non-compliant files, sorted
  pub violations: Vec<String>,
}

impl CheckOutcome {
  /// Builds an outcome from per-file records.
  ///
  /// Records are expected in relative-path order; violations are derived
  /// from them and inherit that order.
  pub fn from_records(files: Vec<FileRecord>) -> Self {
    let checked = files.len();
    let violations = files
      .iter()
      .filter(|f| f.status == FileStatus::Invalid)
      .map(|f| f.path.clone())
      .collect();

    Self {
      files,
      checked,
      violations,
    }
  }

  /// Whether every checked file carries a valid header.
  pub fn is_clean(&self) -> bool {
    self.violations.is_empty()
  }

  /// Writes the outcome as pretty-printed JSON to the given path.
  pub fn write_json(&self, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(self).context("Failed to serialize check report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))
  }
}

/// Outcome of an `apply` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyOutcome {
  /// Number of candidate files inspected
  pub inspected: usize,
  /// Relative paths of files whose content actually changed, sorted
  pub updated: Vec<String>,
}

impl ApplyOutcome {
  /// Number of files actually modified.
  pub fn updated_count(&self) -> usize {
    self.updated.len()
  }
}
