// crates/rill-docs-engine/src/generator.rs
// ============================================================================
// Module: Doc Generator
// Description: Deterministic serialization of FunctionDoc artifacts.
// Purpose: Produce byte-stable artifacts for diff-based consistency checks.
// Dependencies: rill-docs-model, serde_jcs, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Artifacts are rendered by first serializing through canonical JSON (RFC
//! 8785 key ordering) and then re-rendering the canonical value as pretty
//! JSON with a trailing newline. Identical `FunctionDoc` values therefore
//! always produce byte-identical output, which is the precondition for the
//! diff-based consistency check.
//!
//! Generation refuses incomplete records: it only runs on validated input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use rill_docs_model::FunctionDoc;
use rill_docs_model::missing_fields;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while generating or parsing artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The record did not pass the completeness check.
    #[error("cannot generate artifact for `{identifier}`: missing {}", join_fields(.missing_fields))]
    Incomplete {
        /// Identifier of the offending function.
        identifier: String,
        /// Dotted paths of the empty required fields.
        missing_fields: BTreeSet<String>,
    },
    /// Serialization failed.
    #[error("artifact serialization error: {0}")]
    Serialization(String),
    /// Artifact bytes did not parse back into a record.
    #[error("malformed artifact: {0}")]
    Malformed(String),
}

/// Joins field paths for error messages.
fn join_fields(fields: &BTreeSet<String>) -> String {
    let mut joined = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            joined.push_str(", ");
        }
        joined.push_str(field);
    }
    joined
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Serializes a validated record into canonical artifact bytes.
///
/// # Errors
///
/// Returns [`GenerateError::Incomplete`] for records failing the completeness
/// check and [`GenerateError::Serialization`] when rendering fails.
pub fn generate(doc: &FunctionDoc) -> Result<Vec<u8>, GenerateError> {
    let missing = missing_fields(doc);
    if !missing.is_empty() {
        return Err(GenerateError::Incomplete {
            identifier: doc.identifier.clone(),
            missing_fields: missing,
        });
    }
    let canonical =
        serde_jcs::to_vec(doc).map_err(|err| GenerateError::Serialization(err.to_string()))?;
    let canonical_value: serde_json::Value = serde_json::from_slice(&canonical)
        .map_err(|err| GenerateError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&canonical_value)
        .map_err(|err| GenerateError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parses artifact bytes back into a record.
///
/// # Errors
///
/// Returns [`GenerateError::Malformed`] when the bytes are not a valid
/// artifact.
pub fn parse_artifact(bytes: &[u8]) -> Result<FunctionDoc, GenerateError> {
    serde_json::from_slice(bytes).map_err(|err| GenerateError::Malformed(err.to_string()))
}

// ============================================================================
// SECTION: File Naming
// ============================================================================

/// Returns the sanitized artifact file name for an identifier.
///
/// Lowercased ASCII alphanumerics and underscores pass through; every other
/// character maps to `-`. The mapping is stable, so artifact sets diff
/// cleanly across runs.
#[must_use]
pub fn artifact_file_name(identifier: &str) -> String {
    let mut name = String::with_capacity(identifier.len() + 5);
    for ch in identifier.chars() {
        let lowered = ch.to_ascii_lowercase();
        if lowered.is_ascii_alphanumeric() || lowered == '_' {
            name.push(lowered);
        } else {
            name.push('-');
        }
    }
    name.push_str(".json");
    name
}

// ============================================================================
// SECTION: Tests
// ============================================================================
