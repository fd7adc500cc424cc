//! # headsync
//!
//! A tool that keeps license headers in source files in sync with a single header template.
//!
//! `headsync` renders a template with user-declared variables, wraps it in a `/* ... */`
//! block comment, and either verifies (`check`) or rewrites (`apply`) the leading comment
//! of every selected file. Declared variables act as wildcards during comparison, so a
//! header that differs only in a year or author still validates.
//!
//! ## Features
//!
//! * Glob-based file selection over one or more source roots, with excludes winning over includes
//! * `${key}` and `{{key}}` placeholder substitution in a single, non-recursive pass
//! * Wildcard comparison: declared variables match any value in an existing header
//! * In-place header replacement with configurable blank-line spacing and line-ending normalization
//! * Read-only check mode with a nonzero exit code, optional diffs, and an optional JSON report
//! * TOML configuration with CLI overrides
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use headsync::config::Config;
//! use headsync::processor::Processor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.variables.insert("year".to_string(), "2025".to_string());
//!
//!     let processor = Processor::new(PathBuf::from("."), config)?;
//!     let outcome = processor.check()?;
//!
//!     if !outcome.is_clean() {
//!         println!("{} files have missing or mismatched headers", outcome.violations.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod diff;
pub mod header;
pub mod logging;
pub mod output;
pub mod pattern;
pub mod processor;
pub mod report;
pub mod selector;
pub mod template;
