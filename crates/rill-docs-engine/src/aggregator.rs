// crates/rill-docs-engine/src/aggregator.rs
// ============================================================================
// Module: Doc Aggregator
// Description: Merged read-only view over artifact sets from repositories.
// Purpose: Feed the website a unified collection, failing fast on bad input.
// Dependencies: rill-docs-model, thiserror, std, crate::generator
// ============================================================================

//! ## Overview
//! At website build or server start, the aggregator reads every checked-in
//! artifact from the configured repositories into one collection keyed by
//! `(repository, identifier)`. The view is read-only and rebuilt fresh per
//! invocation; nothing is cached across processes. A missing directory or a
//! malformed artifact is fatal with the offending path identified, so a bad
//! artifact can never render as a blank page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use rill_docs_model::FunctionDoc;
use rill_docs_model::missing_fields;
use thiserror::Error;

use crate::generator::artifact_file_name;
use crate::generator::parse_artifact;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while aggregating artifact directories.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// IO failure against a source directory or artifact file.
    #[error("artifact io error: {0}")]
    Io(String),
    /// An artifact failed to parse or is incomplete.
    #[error("malformed artifact {path}: {message}")]
    Malformed {
        /// Path of the offending artifact.
        path: String,
        /// What was wrong with it.
        message: String,
    },
    /// Two artifacts document the same identifier within one repository.
    #[error("duplicate documentation for `{identifier}` in repository `{repository}`")]
    Duplicate {
        /// Repository label.
        repository: String,
        /// Duplicated identifier.
        identifier: String,
    },
}

// ============================================================================
// SECTION: Sources
// ============================================================================

/// One repository's checked-in artifact directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSource {
    /// Repository label used in the aggregated key.
    pub repository: String,
    /// Directory holding the repository's artifacts.
    pub dir: PathBuf,
}

// ============================================================================
// SECTION: Aggregated View
// ============================================================================

/// Read-only merged documentation collection.
///
/// # Invariants
/// - Keys are `(repository, identifier)` pairs; iteration order is the key
///   order and therefore deterministic.
#[derive(Debug, Default)]
pub struct AggregatedDocs {
    /// Parsed records keyed by repository and identifier.
    docs: BTreeMap<(String, String), FunctionDoc>,
}

impl AggregatedDocs {
    /// Returns the record for a repository and identifier.
    #[must_use]
    pub fn get(&self, repository: &str, identifier: &str) -> Option<&FunctionDoc> {
        self.docs.get(&(repository.to_string(), identifier.to_string()))
    }

    /// Returns the number of aggregated records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true when no records were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Iterates records in deterministic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &FunctionDoc)> {
        self.docs.iter()
    }
}

// ============================================================================
// SECTION: Aggregation
// ============================================================================

/// Builds the unified collection from one or more repositories.
///
/// # Errors
///
/// Returns [`AggregateError`] on the first missing directory, unreadable
/// file, malformed or incomplete artifact, or duplicate identifier.
pub fn aggregate(sources: &[DocSource]) -> Result<AggregatedDocs, AggregateError> {
    let mut docs = BTreeMap::new();
    for source in sources {
        for path in artifact_paths(&source.dir)? {
            let doc = read_artifact(&path)?;
            let key = (source.repository.clone(), doc.identifier.clone());
            if docs.contains_key(&key) {
                return Err(AggregateError::Duplicate {
                    repository: key.0,
                    identifier: key.1,
                });
            }
            docs.insert(key, doc);
        }
    }
    Ok(AggregatedDocs {
        docs,
    })
}

/// Lists a source directory's artifact paths in name order.
fn artifact_paths(dir: &Path) -> Result<Vec<PathBuf>, AggregateError> {
    let entries =
        fs::read_dir(dir).map_err(|err| AggregateError::Io(format!("{}: {err}", dir.display())))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|err| AggregateError::Io(format!("{}: {err}", dir.display())))?;
        let path = entry.path();
        if path.extension().is_some_and(|extension| extension == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Reads and validates one artifact file.
fn read_artifact(path: &Path) -> Result<FunctionDoc, AggregateError> {
    let bytes =
        fs::read(path).map_err(|err| AggregateError::Io(format!("{}: {err}", path.display())))?;
    let doc = parse_artifact(&bytes).map_err(|err| AggregateError::Malformed {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let missing = missing_fields(&doc);
    if !missing.is_empty() {
        return Err(AggregateError::Malformed {
            path: path.display().to_string(),
            message: format!("missing required fields: {}", join(&missing)),
        });
    }
    let expected_name = artifact_file_name(&doc.identifier);
    let actual_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    if actual_name != expected_name {
        return Err(AggregateError::Malformed {
            path: path.display().to_string(),
            message: format!("file name does not match identifier `{}`", doc.identifier),
        });
    }
    Ok(doc)
}

/// Joins field paths for error messages.
fn join(fields: &std::collections::BTreeSet<String>) -> String {
    let mut joined = String::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            joined.push_str(", ");
        }
        joined.push_str(field);
    }
    joined
}
