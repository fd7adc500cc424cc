use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

// Helper to lay out a project: header template plus some source files.
fn setup_project() -> Result<TempDir, Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;

  fs::write(
    temp_dir.path().join("header.txt"),
    "Copyright ${year} ${author}\nAll rights reserved.",
  )?;

  let src_dir = temp_dir.path().join("src");
  fs::create_dir_all(&src_dir)?;
  fs::write(src_dir.join("main.rs"), "fn main() {\n    println!(\"hello\");\n}\n")?;
  fs::write(src_dir.join("lib.rs"), "pub fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n")?;

  Ok(temp_dir)
}

// Helper to build a command with colors disabled for stable assertions.
fn headsync(project: &Path, subcommand: &str) -> Result<Command, Box<dyn std::error::Error>> {
  let mut cmd = Command::cargo_bin("headsync")?;
  cmd.current_dir(project).arg(subcommand).arg("--colors=never");
  Ok(cmd)
}

#[test]
fn test_check_fails_on_missing_headers() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  let mut cmd = headsync(temp_dir.path(), "check")?;
  cmd.args(["--var", "year=2024", "--var", "author=Luis"]);

  cmd
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("src/lib.rs"))
    .stdout(predicate::str::contains("src/main.rs"));

  // Check mode never modifies files.
  let content = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(!content.contains("Copyright"));

  Ok(())
}

#[test]
fn test_apply_then_check_passes() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;
  let var_args = ["--var", "year=2024", "--var", "author=Luis"];

  let mut apply = headsync(temp_dir.path(), "apply")?;
  apply.args(var_args);
  apply.assert().success().stdout(predicate::str::contains("2 files"));

  let content = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(content.starts_with("/*\n * Copyright 2024 Luis\n * All rights reserved.\n */\n\n"));
  assert!(content.contains("fn main()"));

  let mut check = headsync(temp_dir.path(), "check")?;
  check.args(var_args);
  check
    .assert()
    .success()
    .stdout(predicate::str::contains("check passed for 2 files"));

  Ok(())
}

#[test]
fn test_apply_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;
  let var_args = ["--var", "year=2024", "--var", "author=Luis"];

  let mut first = headsync(temp_dir.path(), "apply")?;
  first.args(var_args);
  first.assert().success();

  let after_first = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;

  let mut second = headsync(temp_dir.path(), "apply")?;
  second.args(var_args);
  second
    .assert()
    .success()
    .stdout(predicate::str::contains("already have valid license headers"));

  let after_second = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert_eq!(after_first, after_second);

  Ok(())
}

#[test]
fn test_variable_only_difference_passes_check() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  fs::write(
    temp_dir.path().join("src/old.rs"),
    "/*\n * Copyright 1999 Somebody Else\n * All rights reserved.\n */\n\nfn old() {}\n",
  )?;
  // Only the file with the pre-existing header should remain.
  fs::remove_file(temp_dir.path().join("src/main.rs"))?;
  fs::remove_file(temp_dir.path().join("src/lib.rs"))?;

  let mut check = headsync(temp_dir.path(), "check")?;
  check.args(["--var", "year=2024", "--var", "author=Luis"]);
  check.assert().success();

  Ok(())
}

#[test]
fn test_quiet_check_prints_bare_paths() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  let mut cmd = headsync(temp_dir.path(), "check")?;
  cmd.args(["--quiet", "--var", "year=2024", "--var", "author=Luis"]);

  cmd.assert().failure().stdout("src/lib.rs\nsrc/main.rs\n");

  Ok(())
}

#[test]
fn test_exclude_wins_over_include() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;
  fs::create_dir_all(temp_dir.path().join("src/generated"))?;
  fs::write(temp_dir.path().join("src/generated/gen.rs"), "fn gen() {}\n")?;

  let mut apply = headsync(temp_dir.path(), "apply")?;
  apply.args([
    "--include",
    "**/*.rs",
    "--exclude",
    "*generated*",
    "--var",
    "year=2024",
    "--var",
    "author=Luis",
  ]);
  apply.assert().success();

  let generated = fs::read_to_string(temp_dir.path().join("src/generated/gen.rs"))?;
  assert_eq!(generated, "fn gen() {}\n");

  let included = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(included.contains("Copyright 2024 Luis"));

  Ok(())
}

#[test]
fn test_report_json_written() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  let mut cmd = headsync(temp_dir.path(), "check")?;
  cmd.args([
    "--report-json",
    "report.json",
    "--var",
    "year=2024",
    "--var",
    "author=Luis",
  ]);
  cmd.assert().failure();

  let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(temp_dir.path().join("report.json"))?)?;
  assert_eq!(report["checked"], 2);
  assert_eq!(report["files"][0]["path"], "src/lib.rs");
  assert_eq!(report["files"][0]["status"], "invalid");

  Ok(())
}

#[test]
fn test_config_file_drives_run() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;
  fs::write(
    temp_dir.path().join(".headsync.toml"),
    r#"
header-file = "header.txt"
spacing-after-header = 0

[variables]
year = "2024"
author = "Luis"
"#,
  )?;

  let mut apply = headsync(temp_dir.path(), "apply")?;
  apply.assert().success();

  let content = fs::read_to_string(temp_dir.path().join("src/lib.rs"))?;
  assert!(content.starts_with("/*\n * Copyright 2024 Luis\n * All rights reserved.\n */\npub fn add"));

  Ok(())
}

#[test]
fn test_config_discovered_via_env_var() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;
  let config_path = temp_dir.path().join("ci-config.toml");
  fs::write(
    &config_path,
    r#"
spacing-after-header = 0

[variables]
year = "2024"
author = "Luis"
"#,
  )?;

  let mut apply = headsync(temp_dir.path(), "apply")?;
  apply.env("HEADSYNC_CONFIG", &config_path);
  apply.assert().success();

  let content = fs::read_to_string(temp_dir.path().join("src/lib.rs"))?;
  assert!(content.starts_with("/*\n * Copyright 2024 Luis\n * All rights reserved.\n */\npub fn add"));

  Ok(())
}

#[test]
fn test_missing_explicit_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  let mut cmd = headsync(temp_dir.path(), "check")?;
  cmd.args(["--config", "no-such-file.toml"]);
  cmd
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load config"));

  // The run aborted before checking anything, so no violation list printed.
  let content = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(!content.contains("Copyright"));

  Ok(())
}

#[test]
fn test_cli_overrides_config_file() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;
  fs::write(
    temp_dir.path().join(".headsync.toml"),
    r#"
[variables]
year = "1999"
author = "Luis"
"#,
  )?;

  let mut apply = headsync(temp_dir.path(), "apply")?;
  apply.args(["--var", "year=2024"]);
  apply.assert().success();

  let content = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(content.contains("Copyright 2024 Luis"));

  Ok(())
}

#[test]
fn test_missing_template_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = tempdir()?;
  fs::create_dir_all(temp_dir.path().join("src"))?;
  fs::write(temp_dir.path().join("src/a.rs"), "fn a() {}\n")?;

  let mut cmd = headsync(temp_dir.path(), "check")?;
  cmd
    .assert()
    .failure()
    .stderr(predicate::str::contains("Header template not found"));

  Ok(())
}

#[test]
fn test_show_diff_previews_apply() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  let mut cmd = headsync(temp_dir.path(), "check")?;
  cmd.args(["--show-diff", "--var", "year=2024", "--var", "author=Luis"]);

  cmd
    .assert()
    .failure()
    .stderr(predicate::str::contains("+/*"))
    .stderr(predicate::str::contains("+ * Copyright 2024 Luis"));

  // Still read-only.
  let content = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(!content.contains("Copyright"));

  Ok(())
}

#[test]
fn test_crlf_line_ending_option() -> Result<(), Box<dyn std::error::Error>> {
  let temp_dir = setup_project()?;

  let mut apply = headsync(temp_dir.path(), "apply")?;
  apply.args(["--line-ending", "crlf", "--var", "year=2024", "--var", "author=Luis"]);
  apply.assert().success();

  let content = fs::read_to_string(temp_dir.path().join("src/main.rs"))?;
  assert!(content.starts_with("/*\r\n * Copyright 2024 Luis\r\n"));
  assert!(!content.contains("\r\r"));

  Ok(())
}
