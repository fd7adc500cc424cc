//! # Selector Module
//!
//! This module walks the configured source roots and returns the set of
//! candidate files whose project-relative path satisfies the include/exclude
//! glob rules.
//!
//! Selection is deterministic: candidates are returned in lexicographic order
//! of their relative path, so check reports and apply runs are reproducible
//! and diff-friendly. Symlinked directories are not followed and symlinked
//! files are skipped, which keeps traversal cycle-free.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use crate::pattern::GlobPattern;

/// A file selected for header processing.
///
/// Holds both the on-disk path and the project-relative path used for glob
/// matching and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
  /// Absolute (or project-root-joined) path used for file I/O
  pub path: PathBuf,
  /// Path relative to the project root, normalized to `/` separators
  pub relative: String,
}

/// File selector for the configured source roots.
#[derive(Debug)]
pub struct FileSelector {
  /// Root of the project; relative paths are computed against this
  project_root: PathBuf,
  /// Compiled include patterns; empty means "match everything"
  includes: Vec<GlobPattern>,
  /// Compiled exclude patterns; always win over includes
  excludes: Vec<GlobPattern>,
}

impl FileSelector {
  /// Creates a new selector.
  ///
  /// # Parameters
  ///
  /// * `project_root` - The project root directory
  /// * `includes` - Compiled include patterns (empty matches everything)
  /// * `excludes` - Compiled exclude patterns
  pub const fn new(project_root: PathBuf, includes: Vec<GlobPattern>, excludes: Vec<GlobPattern>) -> Self {
    Self {
      project_root,
      includes,
      excludes,
    }
  }

  /// Selects all matching files under the given source roots.
  ///
  /// Roots are resolved relative to the project root. Roots that do not
  /// exist on disk are silently skipped, which allows optional source sets.
  ///
  /// # Returns
  ///
  /// The selected candidates, sorted lexicographically by relative path.
  ///
  /// # Errors
  ///
  /// Returns an error if a directory entry under an existing root cannot be
  /// read (for example due to permissions). Partial selection is a
  /// correctness hazard for this tool, so traversal failures abort the run.
  pub fn select(&self, roots: &[String]) -> Result<Vec<CandidateFile>> {
    let mut candidates = Vec::new();

    for root in roots {
      let root_dir = self.project_root.join(root);
      if !root_dir.is_dir() {
        debug!("Skipping missing source root: {}", root_dir.display());
        continue;
      }

      debug!("Scanning source root: {}", root_dir.display());

      for entry in WalkDir::new(&root_dir).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to read directory entry under {}", root_dir.display()))?;

        if !entry.file_type().is_file() {
          continue;
        }

        let relative = relative_path(entry.path(), &self.project_root);
        if self.is_selected(&relative) {
          candidates.push(CandidateFile {
            path: entry.path().to_path_buf(),
            relative,
          });
        }
      }
    }

    candidates.sort_by(|a, b| a.relative.cmp(&b.relative));
    candidates.dedup_by(|a, b| a.relative == b.relative);

    debug!("Selected {} candidate files", candidates.len());

    Ok(candidates)
  }

  /// Applies the include/exclude rules to a relative path.
  ///
  /// A file is selected iff includes is empty or at least one include
  /// matches, and no exclude matches.
  fn is_selected(&self, relative: &str) -> bool {
    let included = self.includes.is_empty() || self.includes.iter().any(|p| p.matches(relative));
    let excluded = self.excludes.iter().any(|p| p.matches(relative));
    included && !excluded
  }
}

/// Computes the project-relative path with `/` separators.
///
/// Paths outside the project root fall back to their full display form; that
/// only happens when a source root itself escapes the project root.
fn relative_path(path: &Path, project_root: &Path) -> String {
  let relative = path.strip_prefix(project_root).unwrap_or(path);
  let display = relative.to_string_lossy();

  if std::path::MAIN_SEPARATOR == '/' {
    display.into_owned()
  } else {
    display.replace(std::path::MAIN_SEPARATOR, "/")
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn selector(root: &Path, includes: &[&str], excludes: &[&str]) -> FileSelector {
    let includes = GlobPattern::compile_all(&includes.iter().map(|s| s.to_string()).collect::<Vec<_>>()).unwrap();
    let excludes = GlobPattern::compile_all(&excludes.iter().map(|s| s.to_string()).collect::<Vec<_>>()).unwrap();
    FileSelector::new(root.to_path_buf(), includes, excludes)
  }

  fn write(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "content").unwrap();
  }

  #[test]
  fn test_select_all_when_includes_empty() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/main/kotlin/Foo.kt");
    write(temp.path(), "src/main/resources/app.properties");

    let selector = selector(temp.path(), &[], &[]);
    let files = selector.select(&["src".to_string()]).unwrap();

    assert_eq!(files.len(), 2);
  }

  #[test]
  fn test_include_filtering() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/main/kotlin/Foo.kt");
    write(temp.path(), "src/main/resources/Foo.txt");

    let selector = selector(temp.path(), &["**/*.kt"], &[]);
    let files = selector.select(&["src".to_string()]).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].relative, "src/main/kotlin/Foo.kt");
  }

  #[test]
  fn test_exclude_wins_over_include() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/a/Keep.java");
    write(temp.path(), "src/generated/Skip.java");

    let selector = selector(temp.path(), &["**/*.java"], &["*generated*"]);
    let files = selector.select(&["src".to_string()]).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].relative, "src/a/Keep.java");
  }

  #[test]
  fn test_missing_root_is_skipped() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/Foo.kt");

    let selector = selector(temp.path(), &[], &[]);
    let files = selector
      .select(&["src".to_string(), "does-not-exist".to_string()])
      .unwrap();

    assert_eq!(files.len(), 1);
  }

  #[test]
  fn test_deterministic_lexicographic_order() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/z.rs");
    write(temp.path(), "src/a.rs");
    write(temp.path(), "src/m/b.rs");

    let selector = selector(temp.path(), &[], &[]);
    let files = selector.select(&["src".to_string()]).unwrap();

    let relatives: Vec<_> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(relatives, vec!["src/a.rs", "src/m/b.rs", "src/z.rs"]);
  }

  #[cfg(unix)]
  #[test]
  fn test_symlinked_directories_are_not_followed() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/real.rs");
    write(temp.path(), "other/outside.rs");
    std::os::unix::fs::symlink(temp.path().join("other"), temp.path().join("src/linked")).unwrap();

    let selector = selector(temp.path(), &[], &[]);
    let files = selector.select(&["src".to_string()]).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].relative, "src/real.rs");
  }
}
