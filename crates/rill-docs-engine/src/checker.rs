// crates/rill-docs-engine/src/checker.rs
// ============================================================================
// Module: Consistency Checker
// Description: Drift detection between fresh and checked-in artifacts.
// Purpose: Gate CI on byte-identical artifacts; regenerate on explicit write.
// Dependencies: rill-docs-registry, similar, thiserror, std,
// crate::{config, generator, pool, validator}
// ============================================================================

//! ## Overview
//! The checker regenerates every artifact from the current registry and
//! compares it byte-for-byte against the checked-in file. Any mismatch,
//! missing file, or stale file is a hard failure, reported with a unified
//! diff. Checking never writes; regeneration is a distinct, explicit
//! operation that also removes stale artifacts so the on-disk set stays
//! exactly equal to the registry's contents.
//!
//! Artifact files are the only shared resource: the check reads them, the
//! write replaces them atomically, and concurrent writers are serialized by
//! the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use rill_docs_registry::FunctionRegistry;
use similar::ChangeTag;
use similar::TextDiff;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::generator::GenerateError;
use crate::generator::artifact_file_name;
use crate::generator::generate;
use crate::pool;
use crate::validator::ValidationReport;
use crate::validator::ValidatorError;
use crate::validator::validate_entry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while checking or writing artifacts.
#[derive(Debug, Error)]
pub enum CheckError {
    /// IO failure against the artifact directory.
    #[error("artifact io error: {0}")]
    Io(String),
    /// Validation infrastructure failed.
    #[error(transparent)]
    Validator(#[from] ValidatorError),
    /// Artifact generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// Two identifiers sanitize to the same artifact file name.
    #[error("artifact file name collision: `{first}` and `{second}` both map to {file_name}")]
    FileNameCollision {
        /// First identifier.
        first: String,
        /// Second identifier.
        second: String,
        /// The colliding file name.
        file_name: String,
    },
    /// Internal engine failure.
    #[error("internal engine error: {0}")]
    Internal(String),
}

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Per-identifier consistency result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyStatus {
    /// Fresh and checked-in artifacts are byte-identical.
    Match,
    /// The checked-in artifact differs from the fresh one.
    Mismatch {
        /// Unified diff from checked-in to fresh content.
        diff: String,
    },
    /// No checked-in artifact exists for the registered function.
    MissingOnDisk,
    /// A checked-in artifact has no registered function.
    MissingInRegistry,
}

impl ConsistencyStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Mismatch {
                ..
            } => "mismatch",
            Self::MissingOnDisk => "missing on disk",
            Self::MissingInRegistry => "stale (no registered function)",
        }
    }

    /// Returns true for the matching status.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Consistency result for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyOutcome {
    /// Function identifier (the file stem for stale artifacts).
    pub identifier: String,
    /// Artifact file name.
    pub file_name: String,
    /// Comparison result.
    pub status: ConsistencyStatus,
}

/// Aggregated consistency-check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Validation reports in registration order.
    pub validation: Vec<ValidationReport>,
    /// Artifact outcomes: registry entries in registration order, then stale
    /// files in name order.
    pub artifacts: Vec<ConsistencyOutcome>,
}

impl CheckReport {
    /// Returns true when validation passed and every artifact matches.
    #[must_use]
    pub fn is_clean(&self, strict: bool) -> bool {
        self.validation.iter().all(|report| report.is_clean(strict))
            && self.artifacts.iter().all(|outcome| outcome.status.is_match())
    }
}

/// Result of an explicit artifact regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Validation reports in registration order.
    pub validation: Vec<ValidationReport>,
    /// File names written, in registration order. Empty when validation
    /// failed and the write was refused.
    pub written: Vec<String>,
    /// Stale file names removed, in name order.
    pub removed: Vec<String>,
}

impl WriteReport {
    /// Returns true when validation passed and the artifacts were written.
    #[must_use]
    pub fn is_clean(&self, strict: bool) -> bool {
        self.validation.iter().all(|report| report.is_clean(strict))
    }
}

// ============================================================================
// SECTION: Check Mode
// ============================================================================

/// Runs the consistency check without touching the artifact directory.
///
/// # Errors
///
/// Returns [`CheckError`] for infrastructure failures; drift and validation
/// findings are reported through the returned [`CheckReport`].
pub fn check(
    registry: &Arc<FunctionRegistry>,
    config: &EngineConfig,
) -> Result<CheckReport, CheckError> {
    let expected = expected_file_names(registry)?;
    let (validation, fresh) = validate_and_generate(registry, config)?;

    let mut on_disk = list_artifact_files(&config.artifact_dir)?;
    let mut artifacts = Vec::with_capacity(expected.len());
    for (entry, bytes) in registry.all().iter().zip(&fresh) {
        let file_name = artifact_file_name(entry.identifier());
        let status = match on_disk.remove(&file_name) {
            None => ConsistencyStatus::MissingOnDisk,
            Some(path) => {
                let existing =
                    fs::read(&path).map_err(|err| CheckError::Io(format!("{}: {err}", path.display())))?;
                if existing == *bytes {
                    ConsistencyStatus::Match
                } else {
                    ConsistencyStatus::Mismatch {
                        diff: render_unified_diff(&existing, bytes),
                    }
                }
            }
        };
        artifacts.push(ConsistencyOutcome {
            identifier: entry.identifier().to_string(),
            file_name,
            status,
        });
    }
    for file_name in on_disk.into_keys() {
        let identifier = file_name.trim_end_matches(".json").to_string();
        artifacts.push(ConsistencyOutcome {
            identifier,
            file_name,
            status: ConsistencyStatus::MissingInRegistry,
        });
    }

    Ok(CheckReport {
        validation,
        artifacts,
    })
}

// ============================================================================
// SECTION: Write Mode
// ============================================================================

/// Validates, regenerates, and overwrites the full artifact set.
///
/// Stale artifacts are removed so the on-disk set equals the registry's
/// contents. When validation fails the write is refused and the report
/// carries the findings.
///
/// # Errors
///
/// Returns [`CheckError`] for infrastructure failures.
pub fn write_artifacts(
    registry: &Arc<FunctionRegistry>,
    config: &EngineConfig,
) -> Result<WriteReport, CheckError> {
    let expected = expected_file_names(registry)?;
    let (validation, fresh) = validate_and_generate(registry, config)?;
    if !validation.iter().all(|report| report.is_clean(config.strict_no_examples)) {
        return Ok(WriteReport {
            validation,
            written: Vec::new(),
            removed: Vec::new(),
        });
    }

    fs::create_dir_all(&config.artifact_dir).map_err(|err| {
        CheckError::Io(format!("{}: {err}", config.artifact_dir.display()))
    })?;

    let mut written = Vec::with_capacity(fresh.len());
    for (entry, bytes) in registry.all().iter().zip(&fresh) {
        let file_name = artifact_file_name(entry.identifier());
        write_artifact_atomic(&config.artifact_dir, &file_name, bytes)?;
        written.push(file_name);
    }

    let mut removed = Vec::new();
    for (file_name, path) in list_artifact_files(&config.artifact_dir)? {
        if !expected.contains_key(&file_name) {
            fs::remove_file(&path)
                .map_err(|err| CheckError::Io(format!("{}: {err}", path.display())))?;
            removed.push(file_name);
        }
    }

    Ok(WriteReport {
        validation,
        written,
        removed,
    })
}

// ============================================================================
// SECTION: Shared Steps
// ============================================================================

/// Maps every identifier to its artifact file name, rejecting collisions.
fn expected_file_names(
    registry: &Arc<FunctionRegistry>,
) -> Result<BTreeMap<String, String>, CheckError> {
    let mut names: BTreeMap<String, String> = BTreeMap::new();
    for entry in registry.all() {
        let file_name = artifact_file_name(entry.identifier());
        if let Some(first) = names.get(&file_name) {
            return Err(CheckError::FileNameCollision {
                first: first.clone(),
                second: entry.identifier().to_string(),
                file_name,
            });
        }
        names.insert(file_name, entry.identifier().to_string());
    }
    Ok(names)
}

/// Validates and generates across functions on the worker pool.
///
/// Results come back in registration order. Registered records passed the
/// completeness check, so generation failures here are internal errors.
fn validate_and_generate(
    registry: &Arc<FunctionRegistry>,
    config: &EngineConfig,
) -> Result<(Vec<ValidationReport>, Vec<Vec<u8>>), CheckError> {
    let entries = registry.all();
    let results = pool::run_indexed(entries.len(), |index| {
        let Some(entry) = entries.get(index) else {
            return Err(CheckError::Internal(format!("missing registry entry {index}")));
        };
        let report = validate_entry(registry, entry, config)?;
        let bytes = generate(entry.doc())?;
        Ok((report, bytes))
    })
    .map_err(|err| CheckError::Internal(err.to_string()))?;

    let mut validation = Vec::with_capacity(results.len());
    let mut fresh = Vec::with_capacity(results.len());
    for result in results {
        let (report, bytes) = result?;
        validation.push(report);
        fresh.push(bytes);
    }
    Ok((validation, fresh))
}

/// Lists checked-in artifact files by name.
///
/// A missing directory is an empty set: every registered function then
/// reports `MissingOnDisk`.
fn list_artifact_files(dir: &Path) -> Result<BTreeMap<String, PathBuf>, CheckError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => return Err(CheckError::Io(format!("{}: {err}", dir.display()))),
    };
    let mut files = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|err| CheckError::Io(format!("{}: {err}", dir.display())))?;
        let path = entry.path();
        if path.extension().is_none_or(|extension| extension != "json") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        files.insert(file_name.to_string(), path.clone());
    }
    Ok(files)
}

// ============================================================================
// SECTION: Diff Rendering
// ============================================================================

/// Renders a unified diff from checked-in to fresh artifact content.
fn render_unified_diff(existing: &[u8], fresh: &[u8]) -> String {
    let existing_text = String::from_utf8_lossy(existing);
    let fresh_text = String::from_utf8_lossy(fresh);
    let diff = TextDiff::from_lines(existing_text.as_ref(), fresh_text.as_ref());
    let mut out = String::new();
    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        let _ = writeln!(out, "{}", hunk.header());
        for change in hunk.iter_changes() {
            let prefix = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            let _ = write!(out, "{prefix}{change}");
        }
    }
    out
}

// ============================================================================
// SECTION: Atomic Writes
// ============================================================================

/// Attempts made to allocate a unique temporary file.
const TEMP_ATTEMPTS: usize = 16;

/// Counter distinguishing temporary files within the process.
static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes artifact bytes via a temporary sibling and rename.
fn write_artifact_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<(), CheckError> {
    let path = dir.join(file_name);
    let (temp_path, mut file) = create_temp_file(dir, file_name)?;
    if let Err(err) = file.write_all(bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(CheckError::Io(err.to_string()));
    }
    if let Err(err) = file.sync_all() {
        let _ = fs::remove_file(&temp_path);
        return Err(CheckError::Io(err.to_string()));
    }
    persist_temp_file(&temp_path, &path)
}

/// Creates a unique temporary file alongside the destination.
fn create_temp_file(dir: &Path, file_name: &str) -> Result<(PathBuf, fs::File), CheckError> {
    for _ in 0 .. TEMP_ATTEMPTS {
        let attempt = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_name = format!(".{file_name}.tmp.{}.{attempt}", std::process::id());
        let temp_path = dir.join(temp_name);
        match OpenOptions::new().write(true).create_new(true).open(&temp_path) {
            Ok(file) => return Ok((temp_path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(CheckError::Io(err.to_string())),
        }
    }
    Err(CheckError::Io(String::from("failed to allocate temporary artifact file")))
}

/// Moves the temporary file into place.
///
/// On platforms without atomic replace, falls back to remove-and-rename.
fn persist_temp_file(temp_path: &Path, path: &Path) -> Result<(), CheckError> {
    match fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            if path.exists() {
                fs::remove_file(path).map_err(|err| CheckError::Io(err.to_string()))?;
                fs::rename(temp_path, path).map_err(|err| CheckError::Io(err.to_string()))?;
                return Ok(());
            }
            let _ = fs::remove_file(temp_path);
            Err(CheckError::Io(err.to_string()))
        }
    }
}
