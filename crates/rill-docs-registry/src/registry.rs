// crates/rill-docs-registry/src/registry.rs
// ============================================================================
// Module: Function Registry
// Description: Authoritative ordered collection of documented functions.
// Purpose: Enforce the metadata capability contract at registration time.
// Dependencies: rill-docs-model, thiserror, crate::evaluator
// ============================================================================

//! ## Overview
//! The registry is explicit, constructed state: it is built once at process
//! start and passed by reference (or snapshot) to every component that needs
//! it. Entries are kept in registration order, which fixes the order of
//! generated artifact sets. Registration fails fast on duplicate identifiers
//! and on metadata that does not satisfy the completeness predicate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use rill_docs_model::FunctionDoc;
use rill_docs_model::missing_fields;
use serde_json::Value;
use thiserror::Error;

use crate::evaluator::Arguments;
use crate::evaluator::EvalFailure;

// ============================================================================
// SECTION: Capability Contract
// ============================================================================

/// Capability contract every documented function must satisfy.
///
/// Implementations supply their complete metadata record and the real
/// evaluator the engine runs documented examples against. The contract is
/// checked structurally at registration time, not by ad hoc runtime probing.
pub trait DocumentedFunction: Send + Sync {
    /// Returns the complete documentation record for the function.
    fn doc(&self) -> FunctionDoc;

    /// Evaluates the function against bound arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EvalFailure`] for every evaluation-time failure named in the
    /// function's `internal_failure_reasons`.
    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure>;
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while registering documented functions.
///
/// Registration-time errors are fatal to process startup: a function that
/// cannot be documented completely is not allowed into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A second function was registered under an existing identifier.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),
    /// A function's metadata left required fields empty.
    #[error("incomplete metadata for `{identifier}`: missing {}", format_fields(.missing_fields))]
    IncompleteMetadata {
        /// Identifier of the offending function.
        identifier: String,
        /// Dotted paths of the empty required fields.
        missing_fields: BTreeSet<String>,
    },
}

/// Joins field paths for the incomplete-metadata message.
fn format_fields(fields: &BTreeSet<String>) -> String {
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
// SECTION: Registry Entry
// ============================================================================

/// One registered function with its cached documentation record.
///
/// # Invariants
/// - `doc` is the record returned by the function at registration time; it is
///   constructed once and never mutated afterwards.
/// - `doc` passed the completeness predicate.
pub struct FunctionEntry {
    /// Documentation record cached at registration time.
    doc: FunctionDoc,
    /// The function implementation behind the capability contract.
    function: Box<dyn DocumentedFunction>,
}

impl FunctionEntry {
    /// Returns the function identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.doc.identifier
    }

    /// Returns the cached documentation record.
    #[must_use]
    pub const fn doc(&self) -> &FunctionDoc {
        &self.doc
    }

    /// Evaluates the function against bound arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EvalFailure`] for evaluation-time failures.
    pub fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        self.function.evaluate(args)
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry").field("identifier", &self.doc.identifier).finish()
    }
}

// ============================================================================
// SECTION: Function Registry
// ============================================================================

/// Explicit, ordered collection of all documented functions.
///
/// # Invariants
/// - Identifiers are unique.
/// - [`FunctionRegistry::all`] yields entries in registration order.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    /// Entries in registration order.
    entries: Vec<FunctionEntry>,
    /// Identifier lookup into `entries`.
    index: BTreeMap<String, usize>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// Registers a documented function.
    ///
    /// The documentation record is constructed here, once, and cached for the
    /// life of the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIdentifier`] when the identifier is
    /// already present, and [`RegistryError::IncompleteMetadata`] when the
    /// record leaves required fields empty.
    pub fn register(&mut self, function: Box<dyn DocumentedFunction>) -> Result<(), RegistryError> {
        let doc = function.doc();
        let identifier = doc.identifier.clone();
        if self.index.contains_key(&identifier) {
            return Err(RegistryError::DuplicateIdentifier(identifier));
        }
        let missing = missing_fields(&doc);
        if !missing.is_empty() {
            return Err(RegistryError::IncompleteMetadata {
                identifier,
                missing_fields: missing,
            });
        }
        self.index.insert(identifier, self.entries.len());
        self.entries.push(FunctionEntry {
            doc,
            function,
        });
        Ok(())
    }

    /// Returns all entries in registration order.
    #[must_use]
    pub fn all(&self) -> &[FunctionEntry] {
        &self.entries
    }

    /// Returns the entry registered under the identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&FunctionEntry> {
        self.index.get(identifier).and_then(|position| self.entries.get(*position))
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no functions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
