// crates/rill-docs-cli/src/tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Tests for argument parsing, dispatch, and exit codes.
// Purpose: Pin the check/write lifecycle and the exit-code contract.
// Dependencies: rill-docs-cli, rill-docs-engine, rill-docs-registry,
// tempfile, clap
// ============================================================================

//! ## Overview
//! Drives the dispatcher with parsed arguments against temporary artifact
//! directories and asserts on rendered output and exit codes.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use rill_docs_registry::FunctionRegistry;
use rill_docs_registry::builtin_registry;

use crate::Cli;
use crate::Command;
use crate::EXIT_FAILURE;
use crate::EXIT_INTERNAL;
use crate::EXIT_SUCCESS;
use crate::execute;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses CLI arguments.
fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

/// Runs a parsed command and captures output and exit code.
fn run(args: &[&str], registry: &Arc<FunctionRegistry>) -> (u8, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = execute(cli(args), registry, &mut out, &mut err);
    (code, String::from_utf8_lossy(&out).to_string(), String::from_utf8_lossy(&err).to_string())
}

/// Path argument for a temporary artifact directory.
fn dir_arg(dir: &Path) -> String {
    dir.join("functions").display().to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn check_subcommand_parses_flags() {
    let parsed = cli(&["rill-docs", "check", "--dir", "out", "--strict"]);
    match parsed.command {
        Command::Check {
            dir,
            config,
            strict,
        } => {
            assert_eq!(dir.as_deref(), Some(Path::new("out")));
            assert!(config.is_none());
            assert!(strict);
        }
        Command::Write {
            ..
        } => panic!("expected check"),
    }
}

#[test]
fn check_before_write_fails_with_missing_artifacts() {
    let temp = tempfile::tempdir().unwrap();
    let registry = Arc::new(builtin_registry().unwrap());
    let dir = dir_arg(temp.path());

    let (code, out, _) = run(&["rill-docs", "check", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("missing on disk"));
    assert!(out.contains("consistency check failed"));
}

#[test]
fn write_then_check_succeeds() {
    let temp = tempfile::tempdir().unwrap();
    let registry = Arc::new(builtin_registry().unwrap());
    let dir = dir_arg(temp.path());

    let (code, out, _) = run(&["rill-docs", "write", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.contains("wrote"));

    let (code, out, _) = run(&["rill-docs", "check", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_SUCCESS);
    assert!(out.contains("all artifacts match"));
}

#[test]
fn hand_edited_artifact_fails_check_with_a_diff() {
    let temp = tempfile::tempdir().unwrap();
    let registry = Arc::new(builtin_registry().unwrap());
    let dir = dir_arg(temp.path());
    let (code, _, _) = run(&["rill-docs", "write", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_SUCCESS);

    let artifact = temp.path().join("functions").join("upcase.json");
    let mut text = fs::read_to_string(&artifact).unwrap();
    text = text.replace("Uppercases a string.", "Edited by hand.");
    fs::write(&artifact, text).unwrap();

    let (code, out, _) = run(&["rill-docs", "check", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("artifact upcase.json (`upcase`): mismatch"));
    assert!(out.contains("-"));
    assert!(out.contains("Edited by hand."));
}

#[test]
fn stale_artifact_fails_check() {
    let temp = tempfile::tempdir().unwrap();
    let registry = Arc::new(builtin_registry().unwrap());
    let dir = dir_arg(temp.path());
    let (code, _, _) = run(&["rill-docs", "write", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_SUCCESS);

    fs::write(temp.path().join("functions").join("old_fn.json"), "{}\n").unwrap();

    let (code, out, _) = run(&["rill-docs", "check", "--dir", &dir], &registry);
    assert_eq!(code, EXIT_FAILURE);
    assert!(out.contains("old_fn.json"));
    assert!(out.contains("stale"));
}

#[test]
fn missing_config_file_is_an_internal_error() {
    let registry = Arc::new(builtin_registry().unwrap());
    let (code, _, err) =
        run(&["rill-docs", "check", "--config", "/does/not/exist.toml"], &registry);
    assert_eq!(code, EXIT_INTERNAL);
    assert!(err.contains("error:"));
}

#[test]
fn config_file_controls_the_artifact_dir() {
    let temp = tempfile::tempdir().unwrap();
    let registry = Arc::new(builtin_registry().unwrap());
    let artifact_dir = temp.path().join("from-config");
    let config_path = temp.path().join("rill-docs.toml");
    fs::write(
        &config_path,
        format!("artifact_dir = {:?}\n", artifact_dir.display().to_string()),
    )
    .unwrap();

    let config_arg = config_path.display().to_string();
    let (code, _, _) = run(&["rill-docs", "write", "--config", &config_arg], &registry);
    assert_eq!(code, EXIT_SUCCESS);
    assert!(artifact_dir.join("upcase.json").exists());
}
