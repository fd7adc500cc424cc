//! # Output Module
//!
//! This module centralizes all user-facing output for the headsync tool.
//! It provides consistent formatting, colors, and symbols for terminal
//! output.
//!
//! ## Design Goals
//!
//! - **Deterministic**: file lists are always sorted for CI and diffing
//! - **Scriptable**: quiet mode prints bare relative paths on stdout
//! - **Progressive**: more detail with `-v`, silence with `-q`

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{ApplyOutcome, CheckOutcome};

/// Symbols used in output
pub mod symbols {
  /// Success/valid header
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing or mismatched header
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the result of a check run.
///
/// Violations are already sorted by relative path; quiet mode prints the
/// bare paths only, for scripting.
pub fn print_check_result(outcome: &CheckOutcome) {
  if outcome.is_clean() {
    if !is_quiet() {
      println!(
        "{} License header check passed for {} {}.",
        symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        outcome.checked,
        if outcome.checked == 1 { "file" } else { "files" }
      );
    }
    return;
  }

  if is_quiet() {
    for path in &outcome.violations {
      println!("{}", path);
    }
    return;
  }

  let count = outcome.violations.len();
  println!(
    "{} {} {} missing or mismatched license headers:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    if count == 1 { "file has" } else { "files have" }
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for path in outcome.violations.iter().take(limit) {
    println!("  {}", path);
  }

  if !show_all && count > limit {
    println!("  ... and {} more (use -v to see all)", count - limit);
  }

  print_blank_line();
  print_hint("Run 'headsync apply' to insert or update the headers.");
}

/// Print the result of an apply run.
pub fn print_apply_result(outcome: &ApplyOutcome) {
  if is_quiet() {
    for path in &outcome.updated {
      println!("{}", path);
    }
    return;
  }

  let count = outcome.updated_count();
  if count == 0 {
    println!(
      "{} All {} {} already have valid license headers.",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      outcome.inspected,
      if outcome.inspected == 1 { "file" } else { "files" }
    );
    return;
  }

  println!(
    "{} Updated license headers in {} {}:",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    count,
    if count == 1 { "file" } else { "files" }
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for path in outcome.updated.iter().take(limit) {
    println!("  {}", path);
  }

  if !show_all && count > limit {
    println!("  ... and {} more (use -v to see all)", count - limit);
  }
}

/// Print a hint line suggesting the next action.
pub fn print_hint(hint: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", hint.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}
