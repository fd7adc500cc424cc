//! # Configuration Module
//!
//! This module provides configuration support for headsync. A run's
//! configuration is assembled once, from an optional `.headsync.toml` file
//! plus CLI overrides, and is immutable from then on; the selector,
//! comparator, and updater all receive it by reference rather than reading
//! any ambient state.
//!
//! The config file is discovered via `--config`, the `HEADSYNC_CONFIG`
//! environment variable, or `.headsync.toml` in the project root, in that
//! order. An explicit `--config` path that does not exist is a hard error;
//! a tool that rewrites files must not silently fall back to defaults when
//! the user named a config file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headsync.toml";

/// Environment variable for specifying the config file path.
pub const CONFIG_ENV_VAR: &str = "HEADSYNC_CONFIG";

/// The default header template file name, relative to the project root.
pub const DEFAULT_HEADER_FILENAME: &str = "header.txt";

/// Line-ending style applied to every rewritten file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
  /// Unix-style `\n`
  Lf,
  /// Windows-style `\r\n`
  Crlf,
}

/// Main configuration struct for headsync.
///
/// Field defaults match the documented option table: `header.txt` template,
/// LF output, one blank line after the header, a single `src` source root,
/// and empty include/exclude lists (empty includes means "match everything").
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Path to the header template, relative to the project root
  #[serde(default = "default_header_file", rename = "header-file")]
  pub header_file: PathBuf,

  /// Output line-ending normalization
  #[serde(default = "default_line_ending", rename = "line-ending")]
  pub line_ending: LineEnding,

  /// Blank lines between the header and the file body
  #[serde(default = "default_spacing", rename = "spacing-after-header")]
  pub spacing_after_header: usize,

  /// Template placeholder substitutions
  #[serde(default)]
  pub variables: BTreeMap<String, String>,

  /// Directories under the project root to scan
  #[serde(default = "default_source_roots", rename = "source-roots")]
  pub source_roots: Vec<String>,

  /// Inclusion globs matched against project-relative paths
  #[serde(default)]
  pub includes: Vec<String>,

  /// Exclusion globs; always win over includes
  #[serde(default)]
  pub excludes: Vec<String>,
}

fn default_header_file() -> PathBuf {
  PathBuf::from(DEFAULT_HEADER_FILENAME)
}

const fn default_line_ending() -> LineEnding {
  LineEnding::Lf
}

const fn default_spacing() -> usize {
  1
}

fn default_source_roots() -> Vec<String> {
  vec!["src".to_string()]
}

impl Default for Config {
  fn default() -> Self {
    Self {
      header_file: default_header_file(),
      line_ending: default_line_ending(),
      spacing_after_header: default_spacing(),
      variables: BTreeMap::new(),
      source_roots: default_source_roots(),
      includes: Vec::new(),
      excludes: Vec::new(),
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A variable declaration is invalid.
  #[error("Invalid variable '{input}': {message}")]
  InvalidVariable { input: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, is not valid TOML, or
  /// fails validation.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    Ok(config)
  }

  /// Validate the configuration.
  fn validate(&self) -> Result<(), ConfigError> {
    for name in self.variables.keys() {
      validate_variable_name(name)?;
    }

    Ok(())
  }

  /// Apply CLI overrides on top of the file-based configuration.
  ///
  /// Scalar flags replace the configured value; repeatable list flags
  /// replace the configured list entirely when given at least once, so a
  /// single `--include` on the command line is not silently unioned with
  /// includes from the file. CLI variables are merged into the configured
  /// map, overriding same-named keys.
  pub fn merge_cli_overrides(&mut self, overrides: CliOverrides) {
    if let Some(header_file) = overrides.header_file {
      self.header_file = header_file;
    }
    if let Some(line_ending) = overrides.line_ending {
      self.line_ending = line_ending;
    }
    if let Some(spacing) = overrides.spacing_after_header {
      self.spacing_after_header = spacing;
    }
    if !overrides.source_roots.is_empty() {
      self.source_roots = overrides.source_roots;
    }
    if !overrides.includes.is_empty() {
      self.includes = overrides.includes;
    }
    if !overrides.excludes.is_empty() {
      self.excludes = overrides.excludes;
    }
    for (key, value) in overrides.variables {
      self.variables.insert(key, value);
    }
  }
}

/// Configuration overrides collected from CLI flags.
#[derive(Debug, Default)]
pub struct CliOverrides {
  pub header_file: Option<PathBuf>,
  pub line_ending: Option<LineEnding>,
  pub spacing_after_header: Option<usize>,
  pub variables: Vec<(String, String)>,
  pub source_roots: Vec<String>,
  pub includes: Vec<String>,
  pub excludes: Vec<String>,
}

/// Validates a template variable name.
///
/// Names are restricted to the characters placeholders can actually contain
/// (`[A-Za-z0-9_.-]`). A name outside that set could never be substituted,
/// so it is rejected up front instead of silently never matching.
fn validate_variable_name(name: &str) -> Result<(), ConfigError> {
  if name.is_empty() {
    return Err(ConfigError::InvalidVariable {
      input: name.to_string(),
      message: "variable name cannot be empty".to_string(),
    });
  }

  if !name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')) {
    return Err(ConfigError::InvalidVariable {
      input: name.to_string(),
      message: "variable name may only contain letters, digits, '_', '.' and '-'".to_string(),
    });
  }

  Ok(())
}

/// Parses a `KEY=VALUE` variable declaration from the command line.
///
/// The value may itself contain `=`; only the first one splits. The key must
/// be a valid variable name.
pub fn parse_variable(input: &str) -> Result<(String, String), ConfigError> {
  match input.split_once('=') {
    Some((key, value)) => {
      let key = key.trim();
      validate_variable_name(key)?;
      Ok((key.to_string(), value.to_string()))
    }
    None => Err(ConfigError::InvalidVariable {
      input: input.to_string(),
      message: "expected KEY=VALUE".to_string(),
    }),
  }
}

/// Discover the configuration file path.
///
/// Order: `HEADSYNC_CONFIG`, then `.headsync.toml` in the project root.
/// Returns `None` when no config file exists; the run then proceeds on
/// defaults plus CLI flags. An explicit `--config` path is not discovery and
/// is handled by [`load_config`] directly.
pub fn discover_config_path(project_root: &Path) -> Option<PathBuf> {
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      debug!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    debug!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let project_config = project_root.join(DEFAULT_CONFIG_FILENAME);
  if project_config.exists() {
    debug!("Using project config: {}", project_config.display());
    return Some(project_config);
  }

  debug!("No config file found");
  None
}

/// Load configuration from the explicit or discovered path, or return the
/// defaults.
///
/// # Errors
///
/// An explicitly given path that does not exist or cannot be parsed is a
/// hard error; only discovered paths may legitimately be absent.
pub fn load_config(explicit_path: Option<&Path>, project_root: &Path, no_config: bool) -> Result<Config> {
  if no_config {
    debug!("Config file discovery disabled (--no-config)");
    return Ok(Config::default());
  }

  if let Some(path) = explicit_path {
    debug!("Using explicit config path: {}", path.display());
    return Config::load(path).with_context(|| format!("Failed to load config from {}", path.display()));
  }

  match discover_config_path(project_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(config)
    }
    None => Ok(Config::default()),
  }
}
