// crates/rill-docs-model/src/completeness.rs
// ============================================================================
// Module: Completeness Predicate
// Description: Pure required-field checks for FunctionDoc records.
// Purpose: Gate registration and generation on fully populated metadata.
// Dependencies: crate::doc, std
// ============================================================================

//! ## Overview
//! The completeness predicate reports every required field a [`FunctionDoc`]
//! leaves empty, as dotted field paths in a deterministic order. It is pure:
//! callers (the registry at registration time, the generator before
//! serialization) decide how to react.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::doc::FunctionDoc;

// ============================================================================
// SECTION: Predicate
// ============================================================================

/// Returns the dotted paths of every required field the record leaves empty.
///
/// Duplicate parameter names and duplicate failure reasons are reported under
/// the offending entry's path: a duplicated field is not properly populated.
#[must_use]
pub fn missing_fields(doc: &FunctionDoc) -> BTreeSet<String> {
    let mut missing = BTreeSet::new();

    if doc.identifier.trim().is_empty() {
        missing.insert(String::from("identifier"));
    }
    if doc.summary.trim().is_empty() {
        missing.insert(String::from("summary"));
    }
    if doc.description.trim().is_empty() {
        missing.insert(String::from("description"));
    }
    if doc.returns.description.trim().is_empty() {
        missing.insert(String::from("return.description"));
    }

    let mut seen_names = BTreeSet::new();
    for (index, parameter) in doc.parameters.iter().enumerate() {
        if parameter.name.trim().is_empty() || !seen_names.insert(parameter.name.as_str()) {
            missing.insert(format!("parameters[{index}].name"));
        }
        if parameter.description.trim().is_empty() {
            missing.insert(format!("parameters[{index}].description"));
        }
        for (variant_index, variant) in parameter.enum_variants.iter().enumerate() {
            if variant.value.trim().is_empty() {
                missing.insert(format!("parameters[{index}].enum_variants[{variant_index}].value"));
            }
            if variant.description.trim().is_empty() {
                missing.insert(format!(
                    "parameters[{index}].enum_variants[{variant_index}].description"
                ));
            }
        }
    }

    let mut seen_reasons = BTreeSet::new();
    for (index, reason) in doc.internal_failure_reasons.iter().enumerate() {
        if reason.trim().is_empty() || !seen_reasons.insert(reason.as_str()) {
            missing.insert(format!("internal_failure_reasons[{index}]"));
        }
    }

    for (index, example) in doc.examples.iter().enumerate() {
        if example.source.trim().is_empty() {
            missing.insert(format!("examples[{index}].source"));
        }
    }

    missing
}

/// Returns true when every required field is populated.
#[must_use]
pub fn is_complete(doc: &FunctionDoc) -> bool {
    missing_fields(doc).is_empty()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
