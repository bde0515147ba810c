// crates/rill-docs-model/src/completeness/tests.rs
// ============================================================================
// Module: Completeness Predicate Unit Tests
// Description: Tests for required-field detection on FunctionDoc records.
// Purpose: Ensure incomplete metadata is caught with precise field paths.
// Dependencies: rill-docs-model, serde_json
// ============================================================================

//! ## Overview
//! Exercises the completeness predicate across required scalar fields,
//! parameter entries, duplicate detection, and example sources.

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

use serde_json::json;

use super::is_complete;
use super::missing_fields;
use crate::doc::Category;
use crate::doc::ExampleDoc;
use crate::doc::ExpectedOutcome;
use crate::doc::FunctionDoc;
use crate::doc::ParameterDoc;
use crate::doc::ReturnDoc;
use crate::typespec::TypeSpec;

/// Builds a complete record the tests then selectively break.
fn complete_doc() -> FunctionDoc {
    FunctionDoc::new(
        "keys",
        Category::Enumerate,
        "Returns the keys of an object.",
        "Returns the keys from the object passed into the function.",
        ReturnDoc::new(TypeSpec::array_of(TypeSpec::String), "An array of all the keys."),
    )
    .with_parameters(vec![ParameterDoc::required(
        "value",
        TypeSpec::Object,
        "The object to extract keys from.",
    )])
    .with_examples(vec![ExampleDoc::new(
        "Get keys from the object",
        r#"keys({"key1": "val1"})"#,
        ExpectedOutcome::Success(json!(["key1"])),
    )])
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn complete_record_passes() {
    let doc = complete_doc();
    assert!(is_complete(&doc));
    assert!(missing_fields(&doc).is_empty());
}

#[test]
fn empty_scalars_are_reported_by_path() {
    let mut doc = complete_doc();
    doc.identifier = String::new();
    doc.summary = "   ".to_string();
    doc.description = String::new();
    doc.returns.description = String::new();

    let missing = missing_fields(&doc);
    assert!(missing.contains("identifier"));
    assert!(missing.contains("summary"));
    assert!(missing.contains("description"));
    assert!(missing.contains("return.description"));
    assert!(!is_complete(&doc));
}

#[test]
fn parameter_fields_are_reported_by_index() {
    let mut doc = complete_doc();
    doc.parameters.push(ParameterDoc::required("", TypeSpec::Any, ""));

    let missing = missing_fields(&doc);
    assert!(missing.contains("parameters[1].name"));
    assert!(missing.contains("parameters[1].description"));
}

#[test]
fn duplicate_parameter_names_are_reported() {
    let mut doc = complete_doc();
    doc.parameters.push(ParameterDoc::optional("value", TypeSpec::Any, "A duplicate."));

    let missing = missing_fields(&doc);
    assert!(missing.contains("parameters[1].name"));
}

#[test]
fn duplicate_failure_reasons_are_reported() {
    let mut doc = complete_doc().with_internal_failure_reasons(&[
        "`value` is not an object.",
        "`value` is not an object.",
    ]);
    let missing = missing_fields(&doc);
    assert!(missing.contains("internal_failure_reasons[1]"));

    doc = complete_doc().with_internal_failure_reasons(&["`value` is not an object."]);
    assert!(is_complete(&doc));
}

#[test]
fn empty_example_source_is_reported() {
    let mut doc = complete_doc();
    doc.examples[0].source = String::new();

    let missing = missing_fields(&doc);
    assert!(missing.contains("examples[0].source"));
}

#[test]
fn zero_examples_is_still_complete() {
    let mut doc = complete_doc();
    doc.examples.clear();
    assert!(is_complete(&doc));
}
