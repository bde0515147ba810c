// crates/rill-docs-engine/src/executor.rs
// ============================================================================
// Module: Example Executor
// Description: Runs documented examples against real function evaluators.
// Purpose: Capture success values or structured failures within a budget.
// Dependencies: rill-docs-model, rill-docs-registry, thiserror, std,
// crate::source
// ============================================================================

//! ## Overview
//! The executor parses an example's source, binds call-site arguments against
//! the function's declared parameters, and invokes the real evaluator.
//! Nested calls resolve against the same read-only registry snapshot, which
//! is how documented examples compose functions.
//!
//! Every example evaluates in a fresh, isolated context: arguments are bound
//! per invocation and evaluators are pure, so no state crosses examples.
//! Evaluation runs on a dedicated worker bounded by the per-example budget;
//! a worker that exceeds it is abandoned and the example reports a timeout
//! instead of hanging the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rill_docs_model::ExampleDoc;
use rill_docs_model::FunctionDoc;
use rill_docs_registry::Arguments;
use rill_docs_registry::EvalFailure;
use rill_docs_registry::FunctionRegistry;
use serde_json::Value;
use thiserror::Error;

use crate::source::CallExpr;
use crate::source::Expr;
use crate::source::parse_example_source;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of evaluating an example that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum ExampleOutcome {
    /// Evaluation produced a value.
    Success(Value),
    /// Evaluation failed with a structured failure.
    Failure(EvalFailure),
}

/// Result of attempting to execute an example.
#[derive(Debug, Clone, PartialEq)]
pub enum ExampleExecution {
    /// The example parsed and evaluated within the budget.
    Completed(ExampleOutcome),
    /// The example source did not parse.
    DidNotParse {
        /// Parser diagnostic for the example.
        message: String,
    },
    /// Evaluation exceeded the per-example budget.
    TimedOut {
        /// The budget that was exceeded, in milliseconds.
        budget_ms: u64,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Internal executor failures that are not attributable to an example.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The evaluation worker could not be spawned.
    #[error("failed to spawn example worker: {0}")]
    Spawn(String),
    /// The evaluation worker terminated without reporting a result.
    #[error("example worker terminated without a result")]
    WorkerLost,
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Executes one documented example within the given budget.
///
/// The worker holds its own registry snapshot reference, so a timed-out
/// evaluation is abandoned without blocking the caller.
///
/// # Errors
///
/// Returns [`ExecutorError`] for infrastructure failures; example-level
/// problems are reported through [`ExampleExecution`].
pub fn execute_example(
    registry: &Arc<FunctionRegistry>,
    example: &ExampleDoc,
    budget: Duration,
) -> Result<ExampleExecution, ExecutorError> {
    let call = match parse_example_source(&example.source) {
        Ok(call) => call,
        Err(err) => {
            return Ok(ExampleExecution::DidNotParse {
                message: err.to_string(),
            });
        }
    };

    let worker_registry = Arc::clone(registry);
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name(String::from("rill-docs-example"))
        .spawn(move || {
            let outcome = evaluate_call(&worker_registry, &call);
            let _ = sender.send(outcome);
        })
        .map_err(|err| ExecutorError::Spawn(err.to_string()))?;

    match receiver.recv_timeout(budget) {
        Ok(Ok(value)) => Ok(ExampleExecution::Completed(ExampleOutcome::Success(value))),
        Ok(Err(failure)) => Ok(ExampleExecution::Completed(ExampleOutcome::Failure(failure))),
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(ExampleExecution::TimedOut {
            budget_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(ExecutorError::WorkerLost),
    }
}

// ============================================================================
// SECTION: Call Evaluation
// ============================================================================

/// Evaluates a call expression against the registry snapshot.
fn evaluate_call(registry: &FunctionRegistry, call: &CallExpr) -> Result<Value, EvalFailure> {
    let Some(entry) = registry.get(&call.identifier) else {
        return Err(EvalFailure::invalid_argument(format!(
            "unknown function: {}",
            call.identifier
        )));
    };
    let args = bind_arguments(registry, entry.doc(), call)?;
    entry.evaluate(&args)
}

/// Resolves an argument expression to a value.
fn resolve_expr(registry: &FunctionRegistry, expr: &Expr) -> Result<Value, EvalFailure> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Call(call) => evaluate_call(registry, call),
    }
}

/// Binds call-site arguments against the declared parameters.
///
/// Positional arguments follow declared parameter order, named arguments bind
/// by name, and declared defaults fill the gaps. Arity problems, unknown or
/// doubly bound names, and values outside a parameter's enumerated set all
/// surface as `invalid_argument` failures.
fn bind_arguments(
    registry: &FunctionRegistry,
    doc: &FunctionDoc,
    call: &CallExpr,
) -> Result<Arguments, EvalFailure> {
    let mut bound: BTreeMap<String, Value> = BTreeMap::new();

    if call.positional.len() > doc.parameters.len() {
        return Err(EvalFailure::invalid_argument(format!(
            "too many arguments for `{}`",
            doc.identifier
        )));
    }
    for (parameter, expr) in doc.parameters.iter().zip(&call.positional) {
        let value = resolve_expr(registry, expr)?;
        check_enum_variants(doc, &parameter.name, &value)?;
        bound.insert(parameter.name.clone(), value);
    }

    for (name, expr) in &call.named {
        if !doc.parameters.iter().any(|parameter| parameter.name == *name) {
            return Err(EvalFailure::invalid_argument(format!(
                "unknown argument `{name}` for `{}`",
                doc.identifier
            )));
        }
        let value = resolve_expr(registry, expr)?;
        check_enum_variants(doc, name, &value)?;
        if bound.insert(name.clone(), value).is_some() {
            return Err(EvalFailure::invalid_argument(format!("`{name}` bound more than once")));
        }
    }

    for parameter in &doc.parameters {
        if bound.contains_key(&parameter.name) {
            continue;
        }
        if parameter.required {
            return Err(EvalFailure::invalid_argument(format!(
                "missing required argument: {}",
                parameter.name
            )));
        }
        if let Some(default) = &parameter.default {
            bound.insert(parameter.name.clone(), default.clone());
        }
    }

    Ok(Arguments::new(bound))
}

/// Rejects string values outside a parameter's enumerated set.
fn check_enum_variants(doc: &FunctionDoc, name: &str, value: &Value) -> Result<(), EvalFailure> {
    let Some(parameter) = doc.parameters.iter().find(|parameter| parameter.name == name) else {
        return Ok(());
    };
    if parameter.enum_variants.is_empty() {
        return Ok(());
    }
    let Some(text) = value.as_str() else {
        return Ok(());
    };
    if parameter.enum_variants.iter().any(|variant| variant.value == text) {
        return Ok(());
    }
    Err(EvalFailure::invalid_argument(format!("invalid value for `{name}`: {text}")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
