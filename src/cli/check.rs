//! # Check Command
//!
//! Read-only verification that every selected file carries a valid license
//! header. The process exits with code 1 when any violation exists, after
//! the complete, sorted list of offending relative paths has been printed.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::cli::{CommonArgs, build_processor};
use crate::diff::render_diff;
use crate::output::{print_blank_line, print_check_result};

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  #[command(flatten)]
  pub common: CommonArgs,

  /// Show a diff of what apply would change for each failing file
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of all checked files to the given path
  #[arg(long, value_name = "FILE")]
  pub report_json: Option<PathBuf>,
}

/// Run the check command with the given arguments.
pub fn run_check(args: CheckArgs) -> Result<()> {
  let processor = build_processor(&args.common)?;

  let outcome = processor.check()?;
  debug!("Checked {} files, {} violations", outcome.checked, outcome.violations.len());

  if args.show_diff && !outcome.is_clean() {
    for relative in &outcome.violations {
      let path = processor.project_root().join(relative);
      let content =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read file: {}", path.display()))?;
      let updated = processor.updated_content(&content);
      eprint!("{}", render_diff(relative, &content, &updated));
      eprintln!();
    }
    print_blank_line();
  }

  print_check_result(&outcome);

  if let Some(ref report_path) = args.report_json {
    outcome.write_json(report_path)?;
    debug!("Wrote JSON report to {}", report_path.display());
  }

  if !outcome.is_clean() {
    process::exit(1);
  }

  Ok(())
}
