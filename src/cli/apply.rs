//! # Apply Command
//!
//! In-place synchronization of license headers. Files whose header already
//! validates are left untouched; everything else gets its leading block
//! comment replaced (or a new one inserted) and its line endings normalized.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::cli::{CommonArgs, build_processor};
use crate::output::print_apply_result;

/// Arguments for the apply command
#[derive(Args, Debug, Default)]
pub struct ApplyArgs {
  #[command(flatten)]
  pub common: CommonArgs,
}

/// Run the apply command with the given arguments.
pub fn run_apply(args: ApplyArgs) -> Result<()> {
  let processor = build_processor(&args.common)?;

  let outcome = processor.apply()?;
  debug!("Inspected {} files, updated {}", outcome.inspected, outcome.updated_count());

  print_apply_result(&outcome);

  Ok(())
}
