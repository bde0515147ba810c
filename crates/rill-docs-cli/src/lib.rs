// crates/rill-docs-cli/src/lib.rs
// ============================================================================
// Module: Rill Docs CLI Library
// Description: Command dispatch and report rendering for the rill-docs binary.
// Purpose: Keep CLI behavior testable behind the thin binary entry point.
// Dependencies: clap, rill-docs-engine, rill-docs-registry
// ============================================================================

//! ## Overview
//! The `rill-docs` binary has two modes. `check` runs the consistency gate:
//! it validates every registered function, regenerates artifacts, diffs them
//! against the checked-in set, and exits non-zero on any finding without
//! writing a byte. `write` is the explicit regeneration operation: it
//! validates, overwrites the full artifact set, and removes stale files.
//!
//! Exit codes: 0 success, 1 validation or consistency failure, 2 internal
//! error (for example, a malformed registry entry).

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use rill_docs_engine::CheckReport;
use rill_docs_engine::ConsistencyStatus;
use rill_docs_engine::EngineConfig;
use rill_docs_engine::ValidationReport;
use rill_docs_engine::WriteReport;
use rill_docs_engine::check;
use rill_docs_engine::write_artifacts;
use rill_docs_registry::FunctionRegistry;
use rill_docs_registry::builtin_registry;

// ============================================================================
// SECTION: Exit Codes
// ============================================================================

/// Everything matched or was written.
pub const EXIT_SUCCESS: u8 = 0;

/// Validation or consistency findings.
pub const EXIT_FAILURE: u8 = 1;

/// Internal error, including malformed registry entries.
pub const EXIT_INTERNAL: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// CLI arguments for the documentation engine.
#[derive(Debug, Parser)]
#[command(name = "rill-docs", about = "Validate and synchronize Rill function documentation.")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check artifacts against the registry; never writes.
    Check {
        /// Artifact directory override.
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Path to rill-docs.toml.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Treat functions without examples as failures.
        #[arg(long)]
        strict: bool,
    },
    /// Regenerate and overwrite all artifacts unconditionally.
    Write {
        /// Artifact directory override.
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Path to rill-docs.toml.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Parses arguments and executes against the built-in registry.
#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let registry = match builtin_registry() {
        Ok(registry) => Arc::new(registry),
        Err(err) => {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "error: {err}");
            return ExitCode::from(EXIT_INTERNAL);
        }
    };
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    ExitCode::from(execute(cli, &registry, &mut stdout, &mut stderr))
}

/// Executes a parsed command against a registry snapshot.
///
/// Reports go to `out`; internal errors go to `err`. The returned code
/// follows the exit-code contract above.
pub fn execute(
    cli: Cli,
    registry: &Arc<FunctionRegistry>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    match cli.command {
        Command::Check {
            dir,
            config,
            strict,
        } => {
            let config = match load_config(config.as_deref(), dir, strict) {
                Ok(config) => config,
                Err(message) => return internal_error(err, &message),
            };
            match check(registry, &config) {
                Ok(report) => render_check(out, &report, config.strict_no_examples),
                Err(error) => internal_error(err, &error.to_string()),
            }
        }
        Command::Write {
            dir,
            config,
        } => {
            let config = match load_config(config.as_deref(), dir, false) {
                Ok(config) => config,
                Err(message) => return internal_error(err, &message),
            };
            match write_artifacts(registry, &config) {
                Ok(report) => render_write(out, &report, &config),
                Err(error) => internal_error(err, &error.to_string()),
            }
        }
    }
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Loads the engine config and applies CLI overrides.
fn load_config(
    path: Option<&std::path::Path>,
    dir: Option<PathBuf>,
    strict: bool,
) -> Result<EngineConfig, String> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path).map_err(|err| err.to_string())?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = dir {
        config.artifact_dir = dir;
    }
    if strict {
        config.strict_no_examples = true;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

// ============================================================================
// SECTION: Report Rendering
// ============================================================================

/// Writes an internal error and returns the internal exit code.
fn internal_error(err: &mut impl Write, message: &str) -> u8 {
    let _ = writeln!(err, "error: {message}");
    EXIT_INTERNAL
}

/// Writes validation findings for one function.
fn render_validation(out: &mut impl Write, report: &ValidationReport) {
    for field in &report.missing_fields {
        let _ = writeln!(out, "function `{}`: missing field: {field}", report.identifier);
    }
    for failure in &report.example_failures {
        let title = failure.title.as_deref().unwrap_or("untitled");
        let _ = writeln!(
            out,
            "function `{}`: example {} (`{title}`) {}: expected {}, actual {}",
            report.identifier,
            failure.example_index,
            failure.reason.as_str(),
            failure.expected,
            failure.actual
        );
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "function `{}`: warning: {}", report.identifier, warning.as_str());
    }
}

/// Writes a check report and returns the exit code.
fn render_check(out: &mut impl Write, report: &CheckReport, strict: bool) -> u8 {
    for validation in &report.validation {
        render_validation(out, validation);
    }
    for outcome in &report.artifacts {
        match &outcome.status {
            ConsistencyStatus::Match => {}
            ConsistencyStatus::Mismatch {
                diff,
            } => {
                let _ = writeln!(
                    out,
                    "artifact {} (`{}`): {}",
                    outcome.file_name,
                    outcome.identifier,
                    outcome.status.as_str()
                );
                let _ = write!(out, "{diff}");
            }
            ConsistencyStatus::MissingOnDisk | ConsistencyStatus::MissingInRegistry => {
                let _ = writeln!(
                    out,
                    "artifact {} (`{}`): {}",
                    outcome.file_name,
                    outcome.identifier,
                    outcome.status.as_str()
                );
            }
        }
    }
    if report.is_clean(strict) {
        let _ = writeln!(out, "checked {} functions: all artifacts match", report.validation.len());
        EXIT_SUCCESS
    } else {
        let _ = writeln!(out, "consistency check failed");
        EXIT_FAILURE
    }
}

/// Writes a write report and returns the exit code.
fn render_write(out: &mut impl Write, report: &WriteReport, config: &EngineConfig) -> u8 {
    for validation in &report.validation {
        render_validation(out, validation);
    }
    if !report.is_clean(config.strict_no_examples) {
        let _ = writeln!(out, "write refused: validation failed");
        return EXIT_FAILURE;
    }
    for removed in &report.removed {
        let _ = writeln!(out, "removed stale artifact {removed}");
    }
    let _ = writeln!(
        out,
        "wrote {} artifacts to {}",
        report.written.len(),
        config.artifact_dir.display()
    );
    EXIT_SUCCESS
}
