// crates/rill-docs-registry/src/builtins/parse.rs
// ============================================================================
// Module: Parse Functions
// Description: Built-in structured-data parsing functions.
// Purpose: Document and evaluate parse_json and parse_int.
// Dependencies: rill-docs-model, serde_json, crate::evaluator
// ============================================================================

//! ## Overview
//! Parse category built-ins. These are the canonical fallible functions: the
//! input string decides at evaluation time whether they succeed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rill_docs_model::Category;
use rill_docs_model::DeclaredFailure;
use rill_docs_model::ExampleDoc;
use rill_docs_model::ExpectedOutcome;
use rill_docs_model::FailureKind;
use rill_docs_model::FunctionDoc;
use rill_docs_model::ParameterDoc;
use rill_docs_model::ReturnDoc;
use rill_docs_model::TypeSpec;
use serde_json::Value;
use serde_json::json;

use crate::evaluator::Arguments;
use crate::evaluator::EvalFailure;
use crate::evaluator::require_integer;
use crate::evaluator::require_str;
use crate::registry::DocumentedFunction;

// ============================================================================
// SECTION: Parse JSON
// ============================================================================

/// The `parse_json` function.
#[derive(Debug, Clone, Copy)]
pub struct ParseJson;

impl DocumentedFunction for ParseJson {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "parse_json",
            Category::Parse,
            "Parses a JSON string into a value.",
            "Parses the `value` string as JSON and returns the resulting value.",
            ReturnDoc::new(TypeSpec::Any, "The parsed value."),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::String,
            "The string representation of the JSON to parse.",
        )])
        .with_internal_failure_reasons(&["`value` is not a string.", "input is not valid JSON"])
        .with_notices(&[
            "All parsed values are returned as-is; coerce types explicitly where needed.",
        ])
        .with_examples(vec![
            ExampleDoc::new(
                "Parse a JSON object",
                r#"parse_json("{\"planet\": \"venus\"}")"#,
                ExpectedOutcome::Success(json!({"planet": "venus"})),
            ),
            ExampleDoc::new(
                "Malformed JSON fails",
                r#"parse_json("{\"planet\"")"#,
                ExpectedOutcome::Failure(DeclaredFailure {
                    kind: FailureKind::InvalidInput,
                    message: "input is not valid JSON".to_string(),
                }),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        serde_json::from_str(text)
            .map_err(|_| EvalFailure::invalid_input("input is not valid JSON"))
    }
}

// ============================================================================
// SECTION: Parse Integer
// ============================================================================

/// Default radix applied when `parse_int` is called without a base.
const DEFAULT_BASE: i64 = 10;

/// The `parse_int` function.
#[derive(Debug, Clone, Copy)]
pub struct ParseInt;

impl DocumentedFunction for ParseInt {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "parse_int",
            Category::Parse,
            "Parses a string into an integer.",
            "Parses the `value` string as an integer in the given `base`.",
            ReturnDoc::new(TypeSpec::Integer, "The parsed integer."),
        )
        .with_parameters(vec![
            ParameterDoc::required("value", TypeSpec::String, "The string to parse."),
            ParameterDoc::optional("base", TypeSpec::Integer, "The radix to parse in, from 2 to 36.")
                .with_default(json!(DEFAULT_BASE)),
        ])
        .with_internal_failure_reasons(&[
            "`value` is not a string.",
            "`value` is not a valid integer.",
            "`base` is not between 2 and 36.",
        ])
        .with_examples(vec![
            ExampleDoc::new(
                "Parse a decimal integer",
                r#"parse_int("42")"#,
                ExpectedOutcome::Success(json!(42)),
            ),
            ExampleDoc::new(
                "Parse a hexadecimal integer",
                r#"parse_int("ff", base: 16)"#,
                ExpectedOutcome::Success(json!(255)),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        let base = match args.optional("base") {
            Some(base) => require_integer(base, "base")?,
            None => DEFAULT_BASE,
        };
        let radix = u32::try_from(base)
            .ok()
            .filter(|radix| (2 ..= 36).contains(radix))
            .ok_or_else(|| EvalFailure::invalid_argument("`base` is not between 2 and 36."))?;
        i64::from_str_radix(text.trim(), radix)
            .map(Value::from)
            .map_err(|_| EvalFailure::invalid_input("`value` is not a valid integer."))
    }
}
