// crates/rill-docs-engine/src/executor/tests.rs
// ============================================================================
// Module: Example Executor Unit Tests
// Description: Tests for example execution, binding, and timeouts.
// Purpose: Ensure outcomes, arity failures, and budgets behave as specified.
// Dependencies: rill-docs-engine, rill-docs-registry, rill-docs-model,
// serde_json
// ============================================================================

//! ## Overview
//! Exercises the executor against the built-in registry: success values,
//! structured failures, argument binding defects, composition, parse
//! failures, and the per-example timeout.

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

use std::sync::Arc;
use std::time::Duration;

use rill_docs_model::Category;
use rill_docs_model::ExampleDoc;
use rill_docs_model::ExpectedOutcome;
use rill_docs_model::FunctionDoc;
use rill_docs_model::ReturnDoc;
use rill_docs_model::TypeSpec;
use rill_docs_registry::Arguments;
use rill_docs_registry::DocumentedFunction;
use rill_docs_registry::EvalFailure;
use rill_docs_registry::FunctionRegistry;
use rill_docs_registry::builtin_registry;
use serde_json::Value;
use serde_json::json;

use super::ExampleExecution;
use super::ExampleOutcome;
use super::execute_example;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Generous budget for examples expected to complete.
const BUDGET: Duration = Duration::from_secs(5);

/// Wraps a source string in an example document.
fn example(source: &str) -> ExampleDoc {
    ExampleDoc::new("test", source, ExpectedOutcome::Success(Value::Null))
}

/// Executes a source string against the built-in registry.
fn run(source: &str) -> ExampleExecution {
    let registry = Arc::new(builtin_registry().unwrap());
    execute_example(&registry, &example(source), BUDGET).unwrap()
}

/// Unwraps a completed outcome.
fn completed(execution: ExampleExecution) -> ExampleOutcome {
    match execution {
        ExampleExecution::Completed(outcome) => outcome,
        other => panic!("expected completion, got {other:?}"),
    }
}

/// Function that sleeps past any test budget.
struct Sleeper;

impl DocumentedFunction for Sleeper {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "sleeper",
            Category::Type,
            "Sleeps.",
            "Sleeps long enough to exceed any example budget.",
            ReturnDoc::new(TypeSpec::Null, "Never returned in tests."),
        )
    }

    fn evaluate(&self, _args: &Arguments) -> Result<Value, EvalFailure> {
        std::thread::sleep(Duration::from_secs(30));
        Ok(Value::Null)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn evaluates_success_values() {
    let outcome = completed(run(r#"upcase("abc")"#));
    assert_eq!(outcome, ExampleOutcome::Success(json!("ABC")));
}

#[test]
fn captures_structured_failures() {
    let outcome = completed(run(r#"bool("true")"#));
    assert_eq!(
        outcome,
        ExampleOutcome::Failure(EvalFailure::invalid_type("`value` is not a Boolean."))
    );
}

#[test]
fn parse_failures_are_reported_not_raised() {
    let execution = run(r#"upcase("abc""#);
    assert!(matches!(execution, ExampleExecution::DidNotParse { .. }));
}

#[test]
fn unknown_functions_fail_evaluation() {
    let outcome = completed(run(r#"not_registered("abc")"#));
    assert_eq!(
        outcome,
        ExampleOutcome::Failure(EvalFailure::invalid_argument("unknown function: not_registered"))
    );
}

#[test]
fn named_arguments_and_defaults_bind() {
    let outcome = completed(run(r#"parse_int("ff", base: 16)"#));
    assert_eq!(outcome, ExampleOutcome::Success(json!(255)));

    let defaulted = completed(run(r#"parse_int("42")"#));
    assert_eq!(defaulted, ExampleOutcome::Success(json!(42)));
}

#[test]
fn nested_calls_compose() {
    let outcome = completed(run(r#"decode_base64(encode_base64("round trip"))"#));
    assert_eq!(outcome, ExampleOutcome::Success(json!("round trip")));
}

#[test]
fn binding_defects_fail_with_invalid_argument() {
    let too_many = completed(run(r#"upcase("a", "b")"#));
    assert_eq!(
        too_many,
        ExampleOutcome::Failure(EvalFailure::invalid_argument("too many arguments for `upcase`"))
    );

    let unknown = completed(run(r#"upcase("a", wrong: 1)"#));
    assert_eq!(
        unknown,
        ExampleOutcome::Failure(EvalFailure::invalid_argument(
            "unknown argument `wrong` for `upcase`"
        ))
    );

    let doubled = completed(run(r#"upcase("a", value: "b")"#));
    assert_eq!(
        doubled,
        ExampleOutcome::Failure(EvalFailure::invalid_argument("`value` bound more than once"))
    );

    let missing = completed(run("upcase()"));
    assert_eq!(
        missing,
        ExampleOutcome::Failure(EvalFailure::invalid_argument("missing required argument: value"))
    );
}

#[test]
fn enumerated_parameters_reject_unknown_values() {
    let outcome = completed(run(r#"encode_base64("abc", charset: "hex")"#));
    assert_eq!(
        outcome,
        ExampleOutcome::Failure(EvalFailure::invalid_argument("invalid value for `charset`: hex"))
    );
}

#[test]
fn evaluation_exceeding_budget_times_out() {
    let mut registry = FunctionRegistry::new();
    registry.register(Box::new(Sleeper)).unwrap();
    let registry = Arc::new(registry);
    let execution =
        execute_example(&registry, &example("sleeper()"), Duration::from_millis(50)).unwrap();
    assert_eq!(
        execution,
        ExampleExecution::TimedOut {
            budget_ms: 50,
        }
    );
}
