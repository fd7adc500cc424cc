//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing with a subcommand per operation:
//! `check` (read-only verification) and `apply` (in-place synchronization).

mod apply;
mod check;

use std::path::PathBuf;

pub use apply::{ApplyArgs, run_apply};
use anyhow::{Context, Result};
pub use check::{CheckArgs, run_check};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};

use crate::config::{CliOverrides, Config, LineEnding, load_config, parse_variable};
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::processor::Processor;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Verify headers without modifying files (nonzero exit on violations)
  headsync check --header-file header.txt --var year=2024 --var author=Luis

  # Insert or update headers in place
  headsync apply --header-file header.txt --var year=2024 --var author=Luis

  # Restrict to Java and Kotlin sources under two roots
  headsync check --root src --root demos --include \"**/*.java\" --include \"**/*.kt\"

  # Preview what apply would change
  headsync check --show-diff

  # Machine-readable report for CI
  headsync check --report-json headers.json
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Verify that all matching files carry a valid license header
  Check(CheckArgs),
  /// Insert or update license headers in matching files
  Apply(ApplyArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Run the parsed command.
pub fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Command::Check(args) => run_check(args),
    Command::Apply(args) => run_apply(args),
  }
}

/// Arguments shared by both subcommands.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
  /// Project root directory (default: current directory)
  #[arg(long, value_name = "DIR")]
  pub project_root: Option<PathBuf>,

  /// Path to config file (default: .headsync.toml in the project root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Path to the header template, relative to the project root
  #[arg(long, short = 'f', value_name = "FILE")]
  pub header_file: Option<PathBuf>,

  /// Line-ending style for rewritten files
  #[arg(long, value_enum, value_name = "STYLE")]
  pub line_ending: Option<LineEnding>,

  /// Blank lines between the header and the file body
  #[arg(long, value_name = "N")]
  pub spacing: Option<usize>,

  /// Template variable (repeatable, format: KEY=VALUE)
  #[arg(long = "var", value_name = "KEY=VALUE")]
  pub variables: Vec<String>,

  /// Source root to scan under the project root (repeatable)
  #[arg(long = "root", value_name = "DIR")]
  pub source_roots: Vec<String>,

  /// Inclusion glob matched against project-relative paths (repeatable)
  #[arg(long = "include", value_name = "GLOB")]
  pub includes: Vec<String>,

  /// Exclusion glob; always wins over includes (repeatable)
  #[arg(long = "exclude", value_name = "GLOB")]
  pub excludes: Vec<String>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and bare result paths
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl CommonArgs {
  /// Initialize logging and color handling from the shared flags.
  fn init_output(&self) {
    init_tracing(self.quiet, self.verbose);

    if self.verbose > 0 {
      set_verbose();
    } else if self.quiet {
      set_quiet();
    }
    self.colors.apply();
  }

  /// Collect the CLI configuration overrides.
  fn overrides(&self) -> Result<CliOverrides> {
    let mut variables = Vec::with_capacity(self.variables.len());
    for declaration in &self.variables {
      variables.push(parse_variable(declaration)?);
    }

    Ok(CliOverrides {
      header_file: self.header_file.clone(),
      line_ending: self.line_ending,
      spacing_after_header: self.spacing,
      variables,
      source_roots: self.source_roots.clone(),
      includes: self.includes.clone(),
      excludes: self.excludes.clone(),
    })
  }

  /// Resolve the project root.
  fn resolve_project_root(&self) -> Result<PathBuf> {
    match &self.project_root {
      Some(root) => Ok(root.clone()),
      None => std::env::current_dir().context("Failed to determine current directory"),
    }
  }
}

/// Build a ready-to-run processor from the shared flags.
///
/// All configuration errors surface here, before any file is touched.
pub(crate) fn build_processor(common: &CommonArgs) -> Result<Processor> {
  common.init_output();

  let project_root = common.resolve_project_root()?;

  let mut config: Config = load_config(common.config.as_deref(), &project_root, common.no_config)?;
  config.merge_cli_overrides(common.overrides()?);

  Processor::new(project_root, config)
}
