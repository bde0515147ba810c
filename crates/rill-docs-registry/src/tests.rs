// crates/rill-docs-registry/src/tests.rs
// ============================================================================
// Module: Registry Unit Tests
// Description: Tests for registration enforcement and built-in evaluators.
// Purpose: Ensure the registry fails fast and built-ins behave as documented.
// Dependencies: rill-docs-registry, rill-docs-model, serde_json
// ============================================================================

//! ## Overview
//! Exercises registration-time enforcement (duplicate identifiers, incomplete
//! metadata, registration order) and spot-checks built-in evaluators directly.

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

use std::collections::BTreeMap;

use rill_docs_model::Category;
use rill_docs_model::FunctionDoc;
use rill_docs_model::ReturnDoc;
use rill_docs_model::TypeSpec;
use serde_json::Value;
use serde_json::json;

use crate::builtins::builtin_registry;
use crate::evaluator::Arguments;
use crate::evaluator::EvalFailure;
use crate::registry::DocumentedFunction;
use crate::registry::FunctionRegistry;
use crate::registry::RegistryError;

// ============================================================================
// SECTION: Test Doubles
// ============================================================================

/// Minimal function whose record is complete.
struct Stub {
    /// Identifier the stub registers under.
    identifier: &'static str,
}

impl DocumentedFunction for Stub {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            self.identifier,
            Category::Type,
            "A stub.",
            "A stub used by registry tests.",
            ReturnDoc::new(TypeSpec::Null, "Always null."),
        )
    }

    fn evaluate(&self, _args: &Arguments) -> Result<Value, EvalFailure> {
        Ok(Value::Null)
    }
}

/// Function whose record leaves required fields empty.
struct IncompleteStub;

impl DocumentedFunction for IncompleteStub {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "incomplete",
            Category::Type,
            "",
            "",
            ReturnDoc::new(TypeSpec::Null, "Always null."),
        )
    }

    fn evaluate(&self, _args: &Arguments) -> Result<Value, EvalFailure> {
        Ok(Value::Null)
    }
}

/// Binds a single `value` argument.
fn value_args(value: Value) -> Arguments {
    let mut values = BTreeMap::new();
    values.insert("value".to_string(), value);
    Arguments::new(values)
}

// ============================================================================
// SECTION: Registration Tests
// ============================================================================

#[test]
fn duplicate_identifier_is_rejected_before_validation() {
    let mut registry = FunctionRegistry::new();
    registry
        .register(Box::new(Stub {
            identifier: "twice",
        }))
        .unwrap();
    let err = registry
        .register(Box::new(Stub {
            identifier: "twice",
        }))
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateIdentifier("twice".to_string()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn incomplete_metadata_is_rejected_with_field_paths() {
    let mut registry = FunctionRegistry::new();
    let err = registry.register(Box::new(IncompleteStub)).unwrap_err();
    match err {
        RegistryError::IncompleteMetadata {
            identifier,
            missing_fields,
        } => {
            assert_eq!(identifier, "incomplete");
            assert!(missing_fields.contains("summary"));
            assert!(missing_fields.contains("description"));
        }
        RegistryError::DuplicateIdentifier(_) => panic!("expected incomplete metadata"),
    }
    assert!(registry.is_empty());
}

#[test]
fn entries_keep_registration_order() {
    let mut registry = FunctionRegistry::new();
    for identifier in ["zebra", "apple", "mango"] {
        registry
            .register(Box::new(Stub {
                identifier,
            }))
            .unwrap();
    }
    let order: Vec<&str> = registry.all().iter().map(crate::FunctionEntry::identifier).collect();
    assert_eq!(order, vec!["zebra", "apple", "mango"]);
    assert_eq!(registry.get("apple").map(crate::FunctionEntry::identifier), Some("apple"));
}

#[test]
fn builtin_registry_registers_every_builtin() {
    let registry = builtin_registry().unwrap();
    assert_eq!(registry.len(), 14);
    assert!(registry.get("upcase").is_some());
    assert!(registry.get("parse_json").is_some());
}

// ============================================================================
// SECTION: Evaluator Tests
// ============================================================================

#[test]
fn upcase_uppercases_and_rejects_non_strings() {
    let registry = builtin_registry().unwrap();
    let upcase = registry.get("upcase").unwrap();
    assert_eq!(upcase.evaluate(&value_args(json!("abc"))).unwrap(), json!("ABC"));
    let failure = upcase.evaluate(&value_args(json!(1))).unwrap_err();
    assert_eq!(failure, EvalFailure::invalid_type("`value` is not a string."));
}

#[test]
fn parse_json_reports_invalid_input() {
    let registry = builtin_registry().unwrap();
    let parse_json = registry.get("parse_json").unwrap();
    assert_eq!(
        parse_json.evaluate(&value_args(json!(r#"{"x": 1}"#))).unwrap(),
        json!({"x": 1})
    );
    let failure = parse_json.evaluate(&value_args(json!(r#"{"x""#))).unwrap_err();
    assert_eq!(failure, EvalFailure::invalid_input("input is not valid JSON"));
}

#[test]
fn join_applies_separator_default() {
    let registry = builtin_registry().unwrap();
    let join = registry.get("join").unwrap();
    assert_eq!(
        join.evaluate(&value_args(json!(["a", "b"]))).unwrap(),
        json!("a,b")
    );
    let mut values = BTreeMap::new();
    values.insert("value".to_string(), json!(["a", "b"]));
    values.insert("separator".to_string(), json!(" and "));
    assert_eq!(join.evaluate(&Arguments::new(values)).unwrap(), json!("a and b"));
}

#[test]
fn base64_round_trips_between_charsets() {
    let registry = builtin_registry().unwrap();
    let encode = registry.get("encode_base64").unwrap();
    let decode = registry.get("decode_base64").unwrap();
    let encoded = encode.evaluate(&value_args(json!("hello rill"))).unwrap();
    assert_eq!(encoded, json!("aGVsbG8gcmlsbA=="));
    assert_eq!(decode.evaluate(&value_args(encoded)).unwrap(), json!("hello rill"));
}

#[test]
fn length_measures_arrays_objects_and_strings() {
    let registry = builtin_registry().unwrap();
    let length = registry.get("length").unwrap();
    assert_eq!(length.evaluate(&value_args(json!([1, 2, 3]))).unwrap(), json!(3));
    assert_eq!(length.evaluate(&value_args(json!({"a": 1}))).unwrap(), json!(1));
    assert_eq!(length.evaluate(&value_args(json!("rill"))).unwrap(), json!(4));
    assert!(length.evaluate(&value_args(json!(true))).is_err());
}

#[test]
fn every_builtin_doc_is_complete() {
    let registry = builtin_registry().unwrap();
    for entry in registry.all() {
        assert!(
            rill_docs_model::is_complete(entry.doc()),
            "incomplete builtin: {}",
            entry.identifier()
        );
    }
}
