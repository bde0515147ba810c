// crates/rill-docs-registry/src/evaluator.rs
// ============================================================================
// Module: Evaluator Contract
// Description: Argument access and failure shape for function evaluators.
// Purpose: Give evaluators a uniform, typed view of bound example arguments.
// Dependencies: rill-docs-model, serde_json, std
// ============================================================================

//! ## Overview
//! Evaluators receive their arguments already bound by name: positional
//! call-site arguments are resolved against declared parameter order and
//! defaults are applied before the evaluator runs. The helpers here extract
//! typed values and produce the structured [`EvalFailure`] shape the
//! validator compares against declared failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use rill_docs_model::FailureKind;
use serde_json::Value;

// ============================================================================
// SECTION: Evaluation Failure
// ============================================================================

/// Structured evaluation-time failure produced by an evaluator.
///
/// # Invariants
/// - `kind` is drawn from the fixed [`FailureKind`] taxonomy shared with
///   declared example failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable failure message.
    pub message: String,
}

impl EvalFailure {
    /// Creates a wrong-runtime-type failure.
    #[must_use]
    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidType,
            message: message.into(),
        }
    }

    /// Creates a bad-argument failure.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidArgument,
            message: message.into(),
        }
    }

    /// Creates an uninterpretable-input failure.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidInput,
            message: message.into(),
        }
    }
}

impl fmt::Display for EvalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

// ============================================================================
// SECTION: Bound Arguments
// ============================================================================

/// Arguments bound for one evaluator invocation.
///
/// # Invariants
/// - Keys are declared parameter names; the binder rejects unknown names
///   before the evaluator runs.
/// - Each invocation receives a fresh instance; evaluations never share
///   argument state.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    /// Bound values keyed by parameter name.
    values: BTreeMap<String, Value>,
}

impl Arguments {
    /// Creates bound arguments from resolved name/value pairs.
    #[must_use]
    pub const fn new(values: BTreeMap<String, Value>) -> Self {
        Self {
            values,
        }
    }

    /// Returns a required argument.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_argument` failure when the argument is absent. The
    /// binder enforces required parameters, so this surfaces only for
    /// evaluators invoked outside the executor.
    pub fn required(&self, name: &str) -> Result<&Value, EvalFailure> {
        self.values
            .get(name)
            .ok_or_else(|| EvalFailure::invalid_argument(format!("missing required argument: {name}")))
    }

    /// Returns an optional argument when bound.
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

// ============================================================================
// SECTION: Typed Accessors
// ============================================================================

/// Extracts a string argument value.
///
/// # Errors
///
/// Returns an `invalid_type` failure naming the parameter otherwise.
pub fn require_str<'a>(value: &'a Value, name: &str) -> Result<&'a str, EvalFailure> {
    value
        .as_str()
        .ok_or_else(|| EvalFailure::invalid_type(format!("`{name}` is not a string.")))
}

/// Extracts an integer argument value.
///
/// # Errors
///
/// Returns an `invalid_type` failure naming the parameter otherwise.
pub fn require_integer(value: &Value, name: &str) -> Result<i64, EvalFailure> {
    value
        .as_i64()
        .ok_or_else(|| EvalFailure::invalid_type(format!("`{name}` is not an integer.")))
}

/// Extracts an object argument value.
///
/// # Errors
///
/// Returns an `invalid_type` failure naming the parameter otherwise.
pub fn require_object<'a>(
    value: &'a Value,
    name: &str,
) -> Result<&'a serde_json::Map<String, Value>, EvalFailure> {
    value
        .as_object()
        .ok_or_else(|| EvalFailure::invalid_type(format!("`{name}` is not an object.")))
}

/// Extracts an array argument value.
///
/// # Errors
///
/// Returns an `invalid_type` failure naming the parameter otherwise.
pub fn require_array<'a>(value: &'a Value, name: &str) -> Result<&'a [Value], EvalFailure> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| EvalFailure::invalid_type(format!("`{name}` is not an array.")))
}
