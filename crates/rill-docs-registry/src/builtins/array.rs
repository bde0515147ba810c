// crates/rill-docs-registry/src/builtins/array.rs
// ============================================================================
// Module: Array Functions
// Description: Built-in array manipulation functions.
// Purpose: Document and evaluate join.
// Dependencies: rill-docs-model, serde_json, crate::evaluator
// ============================================================================

//! ## Overview
//! Array category built-ins.

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
use crate::evaluator::require_array;
use crate::evaluator::require_str;
use crate::registry::DocumentedFunction;

// ============================================================================
// SECTION: Join
// ============================================================================

/// Default separator applied when `join` is called without one.
const DEFAULT_SEPARATOR: &str = ",";

/// The `join` function.
#[derive(Debug, Clone, Copy)]
pub struct Join;

impl DocumentedFunction for Join {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "join",
            Category::Array,
            "Joins an array of strings into a single string.",
            "Concatenates every element of the `value` array into one string, placing the \
             `separator` between consecutive elements.",
            ReturnDoc::new(TypeSpec::String, "The joined string.")
                .with_rules(&["Joining an empty array returns an empty string."]),
        )
        .with_parameters(vec![
            ParameterDoc::required(
                "value",
                TypeSpec::array_of(TypeSpec::String),
                "The array of strings to join.",
            ),
            ParameterDoc::optional("separator", TypeSpec::String, "The string placed between elements.")
                .with_default(json!(DEFAULT_SEPARATOR)),
        ])
        .with_internal_failure_reasons(&[
            "`value` is not an array.",
            "`value` contains a non-string element.",
            "`separator` is not a string.",
        ])
        .with_examples(vec![
            ExampleDoc::new(
                "Join with the default separator",
                r#"join(["apple", "pear"])"#,
                ExpectedOutcome::Success(json!("apple,pear")),
            ),
            ExampleDoc::new(
                "Join with an explicit separator",
                r#"join(["apple", "pear"], separator: " and ")"#,
                ExpectedOutcome::Success(json!("apple and pear")),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let elements = require_array(value, "value")?;
        let separator = match args.optional("separator") {
            Some(separator) => require_str(separator, "separator")?,
            None => DEFAULT_SEPARATOR,
        };
        let mut joined = String::new();
        for (index, element) in elements.iter().enumerate() {
            let text = element.as_str().ok_or_else(|| {
                EvalFailure::invalid_type("`value` contains a non-string element.")
            })?;
            if index > 0 {
                joined.push_str(separator);
            }
            joined.push_str(text);
        }
        Ok(Value::String(joined))
    }
}
