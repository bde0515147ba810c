// crates/rill-docs-registry/src/lib.rs
// ============================================================================
// Module: Rill Docs Registry Library
// Description: Function registry and built-in documented Rill functions.
// Purpose: Provide the authoritative, ordered set of documented functions.
// Dependencies: rill-docs-model, serde_json, thiserror, base64, indoc
// ============================================================================

//! ## Overview
//! `rill-docs-registry` holds the explicit, ordered collection of every
//! documented Rill function. Each entry pairs an immutable
//! [`rill_docs_model::FunctionDoc`] with the function's real evaluator, so the
//! engine can execute documented examples against actual behavior.
//!
//! Registration is the enforcement point for the metadata capability
//! contract: incomplete or duplicate entries are rejected before any
//! validation or generation runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builtins;
pub mod evaluator;
pub mod registry;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builtins::builtin_functions;
pub use builtins::builtin_registry;
pub use evaluator::Arguments;
pub use evaluator::EvalFailure;
pub use evaluator::require_array;
pub use evaluator::require_integer;
pub use evaluator::require_object;
pub use evaluator::require_str;
pub use registry::DocumentedFunction;
pub use registry::FunctionEntry;
pub use registry::FunctionRegistry;
pub use registry::RegistryError;
