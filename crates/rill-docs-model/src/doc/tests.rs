// crates/rill-docs-model/src/doc/tests.rs
// ============================================================================
// Module: Documentation Record Unit Tests
// Description: Tests for the FunctionDoc serde shape.
// Purpose: Keep the artifact-visible representation stable.
// Dependencies: rill-docs-model, serde_json
// ============================================================================

//! ## Overview
//! Exercises the serialized shape of [`FunctionDoc`] components, including the
//! legacy `usage` alias and the present-but-null default edge case.

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

use serde_json::Value;
use serde_json::json;

use super::Category;
use super::DeclaredFailure;
use super::ExampleDoc;
use super::ExpectedOutcome;
use super::FailureKind;
use super::FunctionDoc;
use super::ParameterDoc;
use super::ReturnDoc;
use crate::typespec::TypeSpec;

/// Builds a small but fully populated record for serde tests.
fn sample_doc() -> FunctionDoc {
    FunctionDoc::new(
        "upcase",
        Category::String,
        "Uppercases a string.",
        "Returns the `value` string with every character uppercased.",
        ReturnDoc::new(TypeSpec::String, "The uppercased string."),
    )
    .with_parameters(vec![ParameterDoc::required(
        "value",
        TypeSpec::String,
        "The string to uppercase.",
    )])
    .with_examples(vec![ExampleDoc::new(
        "Upcase a string",
        r#"upcase("abc")"#,
        ExpectedOutcome::Success(json!("ABC")),
    )])
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn expected_outcome_is_externally_tagged() {
    let success = serde_json::to_value(ExpectedOutcome::Success(json!("ABC"))).unwrap();
    assert_eq!(success, json!({"success": "ABC"}));

    let failure = serde_json::to_value(ExpectedOutcome::Failure(DeclaredFailure {
        kind: FailureKind::InvalidInput,
        message: "input is not valid JSON".to_string(),
    }))
    .unwrap();
    assert_eq!(
        failure,
        json!({"failure": {"kind": "invalid_input", "message": "input is not valid JSON"}})
    );
}

#[test]
fn null_success_value_survives_round_trip() {
    let outcome = ExpectedOutcome::Success(Value::Null);
    let rendered = serde_json::to_string(&outcome).unwrap();
    let restored: ExpectedOutcome = serde_json::from_str(&rendered).unwrap();
    assert_eq!(outcome, restored);
}

#[test]
fn doc_round_trips_through_json() {
    let doc = sample_doc();
    let rendered = serde_json::to_string(&doc).unwrap();
    let restored: FunctionDoc = serde_json::from_str(&rendered).unwrap();
    assert_eq!(doc, restored);
}

#[test]
fn legacy_usage_key_is_accepted_for_description() {
    let payload = json!({
        "identifier": "upcase",
        "summary": "Uppercases a string.",
        "usage": "Returns the `value` string with every character uppercased.",
        "category": "string",
        "return": {"type": "string", "description": "The uppercased string."}
    });
    let doc: FunctionDoc = serde_json::from_value(payload).unwrap();
    assert_eq!(doc.description, "Returns the `value` string with every character uppercased.");
}

#[test]
fn unknown_keys_are_rejected() {
    let payload = json!({
        "identifier": "upcase",
        "summary": "Uppercases a string.",
        "description": "Returns the string uppercased.",
        "category": "string",
        "return": {"type": "string", "description": "The uppercased string."},
        "usage_notes": "not a field"
    });
    assert!(serde_json::from_value::<FunctionDoc>(payload).is_err());
}

#[test]
fn null_parameter_default_survives_round_trip() {
    let parameter = ParameterDoc::optional("separator", TypeSpec::String, "The join separator.")
        .with_default(Value::Null);
    let rendered = serde_json::to_string(&parameter).unwrap();
    let restored: ParameterDoc = serde_json::from_str(&rendered).unwrap();
    assert_eq!(restored.default, Some(Value::Null));
    assert_eq!(serde_json::to_string(&restored).unwrap(), rendered);
}

#[test]
fn fallibility_follows_failure_reasons() {
    let mut doc = sample_doc();
    assert!(!doc.is_fallible());
    doc = doc.with_internal_failure_reasons(&["`value` is not a string."]);
    assert!(doc.is_fallible());
}

#[test]
fn category_labels_are_stable() {
    for category in Category::ALL {
        let rendered = serde_json::to_value(category).unwrap();
        assert_eq!(rendered, json!(category.as_str()));
    }
}
