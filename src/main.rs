//! # headsync
//!
//! A tool that keeps license headers in source files in sync with a template.

use anyhow::Result;
use headsync::cli::{Cli, run};

fn main() -> Result<()> {
  run(Cli::parse_args())
}
