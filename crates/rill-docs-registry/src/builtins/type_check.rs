// crates/rill-docs-registry/src/builtins/type_check.rs
// ============================================================================
// Module: Type Predicate Functions
// Description: Built-in runtime type predicates.
// Purpose: Document and evaluate is_integer and is_string.
// Dependencies: rill-docs-model, serde_json, crate::evaluator
// ============================================================================

//! ## Overview
//! Type category built-ins. Predicates are infallible: they answer `true` or
//! `false` for any input.

// ============================================================================
// SECTION: Imports
// ============================================================================

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
use crate::registry::DocumentedFunction;

// ============================================================================
// SECTION: Is Integer
// ============================================================================

/// The `is_integer` function.
#[derive(Debug, Clone, Copy)]
pub struct IsInteger;

impl DocumentedFunction for IsInteger {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "is_integer",
            Category::Type,
            "Checks whether a value is an integer.",
            "Check if the `value`'s type is an integer.",
            ReturnDoc::new(TypeSpec::Boolean, "Whether `value` is an integer.").with_rules(&[
                "Returns `true` if `value` is an integer.",
                "Returns `false` if `value` is anything else.",
            ]),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::Any,
            "The value to check.",
        )])
        .with_examples(vec![
            ExampleDoc::new("Valid integer", "is_integer(1)", ExpectedOutcome::Success(json!(true))),
            ExampleDoc::new(
                "Non-matching type",
                r#"is_integer("a string")"#,
                ExpectedOutcome::Success(json!(false)),
            ),
            ExampleDoc::new("Null", "is_integer(null)", ExpectedOutcome::Success(json!(false))),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        Ok(Value::Bool(value.is_i64() || value.is_u64()))
    }
}

// ============================================================================
// SECTION: Is String
// ============================================================================

/// The `is_string` function.
#[derive(Debug, Clone, Copy)]
pub struct IsString;

impl DocumentedFunction for IsString {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "is_string",
            Category::Type,
            "Checks whether a value is a string.",
            "Check if the `value`'s type is a string.",
            ReturnDoc::new(TypeSpec::Boolean, "Whether `value` is a string.").with_rules(&[
                "Returns `true` if `value` is a string.",
                "Returns `false` if `value` is anything else.",
            ]),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::Any,
            "The value to check.",
        )])
        .with_examples(vec![
            ExampleDoc::new(
                "Valid string",
                r#"is_string("a string")"#,
                ExpectedOutcome::Success(json!(true)),
            ),
            ExampleDoc::new(
                "Non-matching type",
                "is_string(3)",
                ExpectedOutcome::Success(json!(false)),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        Ok(Value::Bool(value.is_string()))
    }
}
