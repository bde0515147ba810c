// crates/rill-docs-registry/src/builtins/mod.rs
// ============================================================================
// Module: Built-In Functions
// Description: Documented Rill standard library functions.
// Purpose: Provide the function set the documentation engine is run against.
// Dependencies: crate::registry, submodules per category
// ============================================================================

//! ## Overview
//! Every built-in Rill function lives here, grouped by category. Each one
//! implements [`DocumentedFunction`]: its metadata record and its real
//! evaluator sit side by side, so documented examples are executed against
//! actual behavior rather than a transcription of it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod array;
pub mod codec;
pub mod coerce;
pub mod enumerate;
pub mod parse;
pub mod string;
pub mod type_check;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::registry::DocumentedFunction;
use crate::registry::FunctionRegistry;
use crate::registry::RegistryError;

// ============================================================================
// SECTION: Built-In Set
// ============================================================================

/// Returns all built-in functions.
///
/// The order is intentional: it is the registration order and therefore the
/// order of the generated artifact set. Append new functions at the end of
/// their category block.
#[must_use]
pub fn builtin_functions() -> Vec<Box<dyn DocumentedFunction>> {
    vec![
        Box::new(string::Upcase),
        Box::new(string::Downcase),
        Box::new(string::Snakecase),
        Box::new(array::Join),
        Box::new(enumerate::Keys),
        Box::new(enumerate::Values),
        Box::new(enumerate::Length),
        Box::new(parse::ParseJson),
        Box::new(parse::ParseInt),
        Box::new(codec::EncodeBase64),
        Box::new(codec::DecodeBase64),
        Box::new(coerce::Boolean),
        Box::new(type_check::IsInteger),
        Box::new(type_check::IsString),
    ]
}

/// Builds a registry holding every built-in function.
///
/// # Errors
///
/// Returns [`RegistryError`] when a built-in record is incomplete or a
/// duplicate identifier slips in; either is a defect in this module.
pub fn builtin_registry() -> Result<FunctionRegistry, RegistryError> {
    let mut registry = FunctionRegistry::new();
    for function in builtin_functions() {
        registry.register(function)?;
    }
    Ok(registry)
}
