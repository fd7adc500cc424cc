//! # Processor Module
//!
//! This module orchestrates a run: it loads and renders the header template
//! once, selects the candidate files once, and then processes them one at a
//! time in relative-path order.
//!
//! Both modes fail fast before touching any file if the template is missing
//! or a glob pattern is invalid. An I/O failure on an individual file aborts
//! the whole run; partially applied headers across a tree are a correctness
//! hazard for this tool, so there is no skip-and-continue policy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, trace};

use crate::config::Config;
use crate::header::{self, HeaderMatcher};
use crate::pattern::GlobPattern;
use crate::report::{ApplyOutcome, CheckOutcome, FileRecord, FileStatus};
use crate::selector::{CandidateFile, FileSelector};
use crate::template::HeaderTemplate;

/// Processor for header check and apply runs.
///
/// Construction performs all configuration-dependent work: template loading
/// and rendering, wildcard matcher compilation, and glob compilation. After
/// that the processor is immutable and every per-file operation is pure
/// except for the file write in apply mode.
#[derive(Debug)]
pub struct Processor {
  /// Root of the project being processed
  project_root: PathBuf,

  /// Immutable run configuration
  config: Config,

  /// The rendered header block comment, constant for the whole run
  rendered_comment: String,

  /// Wildcard matcher built from the template
  matcher: HeaderMatcher,

  /// Selector over the configured source roots
  selector: FileSelector,
}

impl Processor {
  /// Creates a processor for the given project root and configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the header template does not exist or cannot be
  /// read, or if any include/exclude glob fails to compile. No file is
  /// touched when construction fails.
  pub fn new(project_root: PathBuf, config: Config) -> Result<Self> {
    let header_path = project_root.join(&config.header_file);
    if !header_path.is_file() {
      bail!("Header template not found: {}", header_path.display());
    }

    let template = HeaderTemplate::load(&header_path, config.variables.clone())?;
    let rendered_comment = template.render_as_comment();
    let matcher = HeaderMatcher::from_template(&template).context("Invalid header template")?;

    let includes = GlobPattern::compile_all(&config.includes).context("Invalid include pattern")?;
    let excludes = GlobPattern::compile_all(&config.excludes).context("Invalid exclude pattern")?;
    let selector = FileSelector::new(project_root.clone(), includes, excludes);

    debug!("Rendered header comment:\n{}", rendered_comment);

    Ok(Self {
      project_root,
      config,
      rendered_comment,
      matcher,
      selector,
    })
  }

  /// Selects the candidate files for this run, in relative-path order.
  pub fn select(&self) -> Result<Vec<CandidateFile>> {
    self.selector.select(&self.config.source_roots)
  }

  /// Returns the project root this processor operates on.
  pub fn project_root(&self) -> &Path {
    &self.project_root
  }

  /// Computes the content `apply` would write for the given file content.
  pub fn updated_content(&self, content: &str) -> String {
    header::update(
      content,
      &self.rendered_comment,
      self.config.line_ending,
      self.config.spacing_after_header,
    )
  }

  /// Checks whether the given file content carries a valid header.
  pub fn has_valid_header(&self, content: &str) -> bool {
    self.matcher.is_valid(content)
  }

  /// Runs a read-only check over all candidate files.
  ///
  /// The full candidate set is scanned before reporting so one run gives
  /// the complete picture; a violation never short-circuits the scan.
  pub fn check(&self) -> Result<CheckOutcome> {
    let candidates = self.select()?;
    let mut records = Vec::with_capacity(candidates.len());

    for candidate in &candidates {
      let content = read_file(&candidate.path)?;
      let status = if self.matcher.is_valid(&content) {
        FileStatus::Valid
      } else {
        trace!("Invalid header: {}", candidate.relative);
        FileStatus::Invalid
      };

      records.push(FileRecord {
        path: candidate.relative.clone(),
        status,
      });
    }

    Ok(CheckOutcome::from_records(records))
  }

  /// Rewrites non-compliant candidate files in place.
  ///
  /// Files whose header already validates (including ones differing only in
  /// a declared variable's value) are left untouched, and a file counts as
  /// updated only when its bytes actually changed. Running apply twice
  /// therefore produces byte-identical output on the second run.
  pub fn apply(&self) -> Result<ApplyOutcome> {
    let candidates = self.select()?;
    let mut outcome = ApplyOutcome {
      inspected: candidates.len(),
      ..ApplyOutcome::default()
    };

    for candidate in &candidates {
      let content = read_file(&candidate.path)?;
      if self.matcher.is_valid(&content) {
        trace!("Header already valid: {}", candidate.relative);
        continue;
      }

      let updated = self.updated_content(&content);
      if updated == content {
        continue;
      }

      write_file(&candidate.path, &updated)?;
      debug!("Updated header in: {}", candidate.relative);
      outcome.updated.push(candidate.relative.clone());
    }

    Ok(outcome)
  }
}

fn read_file(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
  fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
