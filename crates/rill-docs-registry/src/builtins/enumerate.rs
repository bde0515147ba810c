// crates/rill-docs-registry/src/builtins/enumerate.rs
// ============================================================================
// Module: Enumerate Functions
// Description: Built-in collection enumeration functions.
// Purpose: Document and evaluate keys, values, and length.
// Dependencies: rill-docs-model, serde_json, indoc, crate::evaluator
// ============================================================================

//! ## Overview
//! Enumerate category built-ins, operating over objects, arrays, and strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indoc::indoc;
use rill_docs_model::Category;
use rill_docs_model::ExampleDoc;
use rill_docs_model::ExpectedOutcome;
use rill_docs_model::FunctionDoc;
use rill_docs_model::ParameterDoc;
use rill_docs_model::ReturnDoc;
use rill_docs_model::TypeSpec;
use serde_json::Value;
use serde_json::json;

use crate::evaluator::Arguments;
use crate::evaluator::EvalFailure;
use crate::evaluator::require_object;
use crate::registry::DocumentedFunction;

// ============================================================================
// SECTION: Keys
// ============================================================================

/// The `keys` function.
#[derive(Debug, Clone, Copy)]
pub struct Keys;

impl DocumentedFunction for Keys {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "keys",
            Category::Enumerate,
            "Returns the keys of an object.",
            "Returns the keys from the object passed into the function.",
            ReturnDoc::new(TypeSpec::array_of(TypeSpec::String), "An array of all the keys.")
                .with_rules(&["Keys are returned in the object's stable key order."]),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::Object,
            "The object to extract keys from.",
        )])
        .with_internal_failure_reasons(&["`value` is not an object."])
        .with_examples(vec![ExampleDoc::new(
            "Get keys from the object",
            indoc! {r#"
                keys({
                    "key1": "val1",
                    "key2": "val2"
                })
            "#},
            ExpectedOutcome::Success(json!(["key1", "key2"])),
        )])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let object = require_object(value, "value")?;
        Ok(Value::Array(object.keys().map(|key| Value::String(key.clone())).collect()))
    }
}

// ============================================================================
// SECTION: Values
// ============================================================================

/// The `values` function.
#[derive(Debug, Clone, Copy)]
pub struct Values;

impl DocumentedFunction for Values {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "values",
            Category::Enumerate,
            "Returns the values of an object.",
            "Returns the values from the object passed into the function.",
            ReturnDoc::new(TypeSpec::Array(None), "An array of all the values.")
                .with_rules(&["Values are returned in the object's stable key order."]),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::Object,
            "The object to extract values from.",
        )])
        .with_internal_failure_reasons(&["`value` is not an object."])
        .with_examples(vec![ExampleDoc::new(
            "Get values from a complex object",
            r#"values({"key1": "val1", "key2": [1, 2, 3]})"#,
            ExpectedOutcome::Success(json!(["val1", [1, 2, 3]])),
        )])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let object = require_object(value, "value")?;
        Ok(Value::Array(object.values().cloned().collect()))
    }
}

// ============================================================================
// SECTION: Length
// ============================================================================

/// The `length` function.
#[derive(Debug, Clone, Copy)]
pub struct Length;

impl DocumentedFunction for Length {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "length",
            Category::Enumerate,
            "Returns the length of a collection or string.",
            "Returns the number of elements of an array, the number of keys of an object, or \
             the number of UTF-8 bytes of a string.",
            ReturnDoc::new(TypeSpec::Integer, "The length of the input.").with_rules(&[
                "Arrays report their element count.",
                "Objects report their key count.",
                "Strings report their UTF-8 byte count.",
            ]),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::union(vec![TypeSpec::Array(None), TypeSpec::Object, TypeSpec::String]),
            "The array, object, or string to measure.",
        )])
        .with_internal_failure_reasons(&["`value` is not an array, object, or string."])
        .with_examples(vec![
            ExampleDoc::new(
                "Length of an array",
                r#"length([1, 2, 3])"#,
                ExpectedOutcome::Success(json!(3)),
            ),
            ExampleDoc::new(
                "Length of a string",
                r#"length("rill")"#,
                ExpectedOutcome::Success(json!(4)),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let count = match value {
            Value::Array(elements) => elements.len(),
            Value::Object(entries) => entries.len(),
            Value::String(text) => text.len(),
            _ => {
                return Err(EvalFailure::invalid_type(
                    "`value` is not an array, object, or string.",
                ));
            }
        };
        Ok(Value::from(u64::try_from(count).unwrap_or(u64::MAX)))
    }
}
