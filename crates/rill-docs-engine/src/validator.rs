// crates/rill-docs-engine/src/validator.rs
// ============================================================================
// Module: Validator
// Description: Per-function validation of metadata and documented examples.
// Purpose: Produce the full report of every defect in one pass.
// Dependencies: rill-docs-model, rill-docs-registry, thiserror, std,
// crate::{config, executor, pool}
// ============================================================================

//! ## Overview
//! The validator produces one [`ValidationReport`] per function: the
//! completeness check's missing fields plus, per example, the comparison of
//! actual against declared outcomes. Reports are pure values; defects are
//! collected, never thrown, so one run reports every offending function and
//! example at once. The caller decides pass/fail and exit behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use rill_docs_model::ExpectedOutcome;
use rill_docs_model::missing_fields;
use rill_docs_registry::FunctionEntry;
use rill_docs_registry::FunctionRegistry;
use serde_json::Value;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::config::FailureMatch;
use crate::executor::ExampleExecution;
use crate::executor::ExampleOutcome;
use crate::executor::ExecutorError;
use crate::executor::execute_example;
use crate::pool;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Why an example failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The example source did not parse.
    DidNotParse,
    /// Evaluation exceeded the per-example budget.
    TimedOut,
    /// The actual outcome did not match the declared outcome.
    Mismatch,
}

impl FailureReason {
    /// Returns a stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DidNotParse => "did not parse",
            Self::TimedOut => "timed out",
            Self::Mismatch => "mismatch",
        }
    }
}

/// One failed example with both sides serialized for human inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFailure {
    /// Index of the example in documentation order.
    pub example_index: usize,
    /// Example title when one was declared.
    pub title: Option<String>,
    /// Declared outcome, rendered.
    pub expected: String,
    /// Actual outcome, rendered.
    pub actual: String,
    /// Failure classification.
    pub reason: FailureReason,
}

/// Warning-level findings that do not fail validation by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The function documents no examples at all.
    NoExamples,
}

impl ValidationWarning {
    /// Returns a stable label for the warning.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoExamples => "no examples",
        }
    }
}

/// Ephemeral validation result for one function in one run.
///
/// # Invariants
/// - Never persisted; it exists for the duration of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Identifier of the validated function.
    pub identifier: String,
    /// Required fields the metadata leaves empty.
    pub missing_fields: BTreeSet<String>,
    /// Failed examples in documentation order.
    pub example_failures: Vec<ExampleFailure>,
    /// Warning-level findings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Returns true when the report carries no findings that fail validation.
    ///
    /// Warnings only count in strict mode.
    #[must_use]
    pub fn is_clean(&self, strict: bool) -> bool {
        self.missing_fields.is_empty()
            && self.example_failures.is_empty()
            && (!strict || self.warnings.is_empty())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Internal validation failures not attributable to a function's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// Example execution infrastructure failed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    /// The worker pool lost a result.
    #[error("validation worker pool failed: {0}")]
    Pool(String),
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates one registry entry.
///
/// The entry must belong to the given registry snapshot; nested example calls
/// resolve against it.
///
/// # Errors
///
/// Returns [`ValidatorError`] for infrastructure failures only; metadata and
/// example defects are reported through the returned [`ValidationReport`].
pub fn validate_entry(
    registry: &Arc<FunctionRegistry>,
    entry: &FunctionEntry,
    config: &EngineConfig,
) -> Result<ValidationReport, ValidatorError> {
    let doc = entry.doc();
    let mut report = ValidationReport {
        identifier: doc.identifier.clone(),
        missing_fields: missing_fields(doc),
        example_failures: Vec::new(),
        warnings: Vec::new(),
    };

    if doc.examples.is_empty() {
        report.warnings.push(ValidationWarning::NoExamples);
    }

    let budget = Duration::from_millis(config.example_timeout_ms);
    for (example_index, example) in doc.examples.iter().enumerate() {
        let execution = execute_example(registry, example, budget)?;
        if let Some((reason, actual)) = classify(&example.expected, &execution, config.failure_match)
        {
            report.example_failures.push(ExampleFailure {
                example_index,
                title: example.title.clone(),
                expected: render_expected(&example.expected),
                actual,
                reason,
            });
        }
    }

    Ok(report)
}

/// Validates every registry entry in parallel, in registration order.
///
/// # Errors
///
/// Returns [`ValidatorError`] for infrastructure failures.
pub fn validate_all(
    registry: &Arc<FunctionRegistry>,
    config: &EngineConfig,
) -> Result<Vec<ValidationReport>, ValidatorError> {
    let entries = registry.all();
    let results = pool::run_indexed(entries.len(), |index| {
        entries.get(index).map_or_else(
            || Err(ValidatorError::Pool(format!("missing registry entry {index}"))),
            |entry| validate_entry(registry, entry, config),
        )
    })
    .map_err(|err| ValidatorError::Pool(err.to_string()))?;
    results.into_iter().collect()
}

// ============================================================================
// SECTION: Outcome Comparison
// ============================================================================

/// Compares an execution against the declared outcome.
///
/// Returns `None` when the example passed, otherwise the failure reason and
/// the rendered actual outcome.
fn classify(
    expected: &ExpectedOutcome,
    execution: &ExampleExecution,
    failure_match: FailureMatch,
) -> Option<(FailureReason, String)> {
    match execution {
        ExampleExecution::DidNotParse {
            message,
        } => Some((FailureReason::DidNotParse, message.clone())),
        ExampleExecution::TimedOut {
            budget_ms,
        } => Some((FailureReason::TimedOut, format!("timed out after {budget_ms} ms"))),
        ExampleExecution::Completed(outcome) => {
            if outcome_matches(expected, outcome, failure_match) {
                None
            } else {
                Some((FailureReason::Mismatch, render_outcome(outcome)))
            }
        }
    }
}

/// Returns true when the actual outcome satisfies the declared outcome.
fn outcome_matches(
    expected: &ExpectedOutcome,
    actual: &ExampleOutcome,
    failure_match: FailureMatch,
) -> bool {
    match (expected, actual) {
        (ExpectedOutcome::Success(declared), ExampleOutcome::Success(value)) => declared == value,
        (ExpectedOutcome::Failure(declared), ExampleOutcome::Failure(failure)) => {
            declared.kind == failure.kind
                && match failure_match {
                    FailureMatch::KindOnly => true,
                    FailureMatch::KindAndMessage => declared.message == failure.message,
                }
        }
        _ => false,
    }
}

/// Renders a declared outcome for the report.
fn render_expected(expected: &ExpectedOutcome) -> String {
    match expected {
        ExpectedOutcome::Success(value) => render_value(value),
        ExpectedOutcome::Failure(failure) => format!("{}: {}", failure.kind, failure.message),
    }
}

/// Renders an actual outcome for the report.
fn render_outcome(outcome: &ExampleOutcome) -> String {
    match outcome {
        ExampleOutcome::Success(value) => render_value(value),
        ExampleOutcome::Failure(failure) => failure.to_string(),
    }
}

/// Renders a value compactly.
fn render_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("<unserializable>"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
