// crates/rill-docs-registry/src/builtins/string.rs
// ============================================================================
// Module: String Functions
// Description: Built-in string manipulation functions.
// Purpose: Document and evaluate upcase, downcase, and snakecase.
// Dependencies: rill-docs-model, serde_json, crate::evaluator
// ============================================================================

//! ## Overview
//! String category built-ins. All three accept a single string `value` and
//! fail with `invalid_type` when handed anything else.

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
use crate::evaluator::require_str;
use crate::registry::DocumentedFunction;

// ============================================================================
// SECTION: Upcase
// ============================================================================

/// The `upcase` function.
#[derive(Debug, Clone, Copy)]
pub struct Upcase;

impl DocumentedFunction for Upcase {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "upcase",
            Category::String,
            "Uppercases a string.",
            "Returns the `value` string with every character converted to uppercase.",
            ReturnDoc::new(TypeSpec::String, "The uppercased string."),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::String,
            "The string to convert to uppercase.",
        )])
        .with_internal_failure_reasons(&["`value` is not a string."])
        .with_examples(vec![ExampleDoc::new(
            "Upcase a string",
            r#"upcase("hello rill")"#,
            ExpectedOutcome::Success(json!("HELLO RILL")),
        )])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        Ok(Value::String(text.to_uppercase()))
    }
}

// ============================================================================
// SECTION: Downcase
// ============================================================================

/// The `downcase` function.
#[derive(Debug, Clone, Copy)]
pub struct Downcase;

impl DocumentedFunction for Downcase {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "downcase",
            Category::String,
            "Lowercases a string.",
            "Returns the `value` string with every character converted to lowercase.",
            ReturnDoc::new(TypeSpec::String, "The lowercased string."),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::String,
            "The string to convert to lowercase.",
        )])
        .with_internal_failure_reasons(&["`value` is not a string."])
        .with_examples(vec![ExampleDoc::new(
            "Downcase a string",
            r#"downcase("HELLO Rill")"#,
            ExpectedOutcome::Success(json!("hello rill")),
        )])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        Ok(Value::String(text.to_lowercase()))
    }
}

// ============================================================================
// SECTION: Snakecase
// ============================================================================

/// The `snakecase` function.
#[derive(Debug, Clone, Copy)]
pub struct Snakecase;

impl DocumentedFunction for Snakecase {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "snakecase",
            Category::String,
            "Converts a string to snake_case.",
            "Takes the `value` string and turns it into snake_case. Word boundaries are \
             detected from separators and from lowercase-to-uppercase transitions.",
            ReturnDoc::new(TypeSpec::String, "The snake_cased string."),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::String,
            "The string to convert to snake_case.",
        )])
        .with_internal_failure_reasons(&["`value` is not a string."])
        .with_examples(vec![
            ExampleDoc::new(
                "snake_case a kebab-case string",
                r#"snakecase("input-string")"#,
                ExpectedOutcome::Success(json!("input_string")),
            ),
            ExampleDoc::new(
                "snake_case a camelCase string",
                r#"snakecase("camelCase")"#,
                ExpectedOutcome::Success(json!("camel_case")),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        Ok(Value::String(to_snake_case(text)))
    }
}

/// Converts text to snake_case.
///
/// Separators (`-`, `_`, whitespace) and lowercase-or-digit to uppercase
/// transitions start a new word; consecutive uppercase runs stay one word.
fn to_snake_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev_lower_or_digit = false;
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() {
            pending_separator = !out.is_empty();
            prev_lower_or_digit = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower_or_digit {
            pending_separator = !out.is_empty();
        }
        if pending_separator {
            out.push('_');
            pending_separator = false;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
    }
    out
}
