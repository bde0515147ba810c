// crates/rill-docs-registry/src/builtins/coerce.rs
// ============================================================================
// Module: Coerce Functions
// Description: Built-in type coercion functions.
// Purpose: Document and evaluate bool.
// Dependencies: rill-docs-model, serde_json, crate::evaluator
// ============================================================================

//! ## Overview
//! Coerce category built-ins. Coercions return the value unchanged when it
//! already has the target type and fail otherwise, which lets downstream
//! expressions rely on the checked type.

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
use crate::registry::DocumentedFunction;

// ============================================================================
// SECTION: Boolean
// ============================================================================

/// The `bool` function.
#[derive(Debug, Clone, Copy)]
pub struct Boolean;

impl DocumentedFunction for Boolean {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "bool",
            Category::Coerce,
            "Asserts that a value is a Boolean.",
            "Returns `value` if it is a Boolean, otherwise fails. This guarantees the result \
             is a Boolean and can be handed to any function that expects one.",
            ReturnDoc::new(TypeSpec::Boolean, "The unchanged Boolean value.").with_rules(&[
                "Returns `value` when it is a Boolean.",
                "Fails when `value` is any other type.",
            ]),
        )
        .with_parameters(vec![ParameterDoc::required(
            "value",
            TypeSpec::Any,
            "The value to check.",
        )])
        .with_internal_failure_reasons(&["`value` is not a Boolean."])
        .with_examples(vec![
            ExampleDoc::new(
                "Pass a Boolean through",
                "bool(true)",
                ExpectedOutcome::Success(json!(true)),
            ),
            ExampleDoc::new(
                "A string is rejected",
                r#"bool("true")"#,
                ExpectedOutcome::Failure(DeclaredFailure {
                    kind: FailureKind::InvalidType,
                    message: "`value` is not a Boolean.".to_string(),
                }),
            ),
        ])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        match value {
            Value::Bool(flag) => Ok(Value::Bool(*flag)),
            _ => Err(EvalFailure::invalid_type("`value` is not a Boolean.")),
        }
    }
}
