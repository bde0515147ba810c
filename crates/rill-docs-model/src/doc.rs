// crates/rill-docs-model/src/doc.rs
// ============================================================================
// Module: Function Documentation Record
// Description: Canonical description of one documented Rill function.
// Purpose: Provide the immutable metadata shape serialized into artifacts.
// Dependencies: serde, serde_json, crate::typespec
// ============================================================================

//! ## Overview
//! This module defines [`FunctionDoc`] and its component records. A
//! `FunctionDoc` is constructed once per registry entry at registration time
//! and is immutable thereafter; it is never partially populated because
//! registration fails fast on missing required fields.
//!
//! The serialized shape of these types is the artifact format checked into
//! source control, so field names and representations here are stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::typespec::TypeSpec;

// ============================================================================
// SECTION: Category
// ============================================================================

/// Fixed classification set used for grouping documented functions.
///
/// # Invariants
/// - The set is closed: artifacts carrying an unknown category fail to parse.
/// - Serialized labels are stable snake_case strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Array construction and manipulation.
    Array,
    /// Encoding and decoding between representations.
    Codec,
    /// Coercion into a specific runtime type.
    Coerce,
    /// Enumeration over collection contents.
    Enumerate,
    /// Numeric helpers.
    Number,
    /// Object construction and manipulation.
    Object,
    /// Parsing structured data out of strings.
    Parse,
    /// String manipulation.
    String,
    /// Runtime type predicates.
    Type,
}

impl Category {
    /// All categories, in stable label order.
    pub const ALL: &'static [Self] = &[
        Self::Array,
        Self::Codec,
        Self::Coerce,
        Self::Enumerate,
        Self::Number,
        Self::Object,
        Self::Parse,
        Self::String,
        Self::Type,
    ];

    /// Returns the stable label for the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Codec => "codec",
            Self::Coerce => "coerce",
            Self::Enumerate => "enumerate",
            Self::Number => "number",
            Self::Object => "object",
            Self::Parse => "parse",
            Self::String => "string",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Failure Taxonomy
// ============================================================================

/// Evaluation-time failure kinds shared by declared and actual failures.
///
/// # Invariants
/// - Serialized labels are stable snake_case strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A value had the wrong runtime type.
    InvalidType,
    /// An argument was missing, unknown, or outside its accepted values.
    InvalidArgument,
    /// Input content could not be interpreted (for example, malformed JSON).
    InvalidInput,
}

impl FailureKind {
    /// Returns the stable label for the failure kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure an example declares as its expected outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclaredFailure {
    /// Expected failure kind.
    pub kind: FailureKind,
    /// Expected failure message.
    pub message: String,
}

// ============================================================================
// SECTION: Expected Outcome
// ============================================================================

/// Declared outcome of an example: exactly one of success or failure.
///
/// # Invariants
/// - The externally tagged representation (`{"success": ...}` or
///   `{"failure": {...}}`) guarantees exactly one branch is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedOutcome {
    /// The example evaluates to this value.
    Success(Value),
    /// The example fails with this kind and message.
    Failure(DeclaredFailure),
}

// ============================================================================
// SECTION: Component Records
// ============================================================================

/// One accepted value of an enumerated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumVariantDoc {
    /// Accepted parameter value.
    pub value: String,
    /// What selecting this value does.
    pub description: String,
}

/// One declared parameter of a documented function.
///
/// # Invariants
/// - Position within [`FunctionDoc::parameters`] defines call-site positional
///   order.
/// - `default` is only meaningful when `required` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDoc {
    /// Parameter name, unique within the function.
    pub name: String,
    /// Accepted type for the parameter value.
    #[serde(rename = "type")]
    pub spec: TypeSpec,
    /// Whether the parameter must be supplied at the call site.
    pub required: bool,
    /// Default applied when an optional parameter is omitted.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present_default"
    )]
    pub default: Option<Value>,
    /// What the parameter means.
    pub description: String,
    /// Enumerated accepted values, when the parameter is closed over a set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_variants: Vec<EnumVariantDoc>,
}

impl ParameterDoc {
    /// Builds a required parameter.
    #[must_use]
    pub fn required(name: &str, spec: TypeSpec, description: &str) -> Self {
        Self {
            name: name.to_string(),
            spec,
            required: true,
            default: None,
            description: description.to_string(),
            enum_variants: Vec::new(),
        }
    }

    /// Builds an optional parameter.
    #[must_use]
    pub fn optional(name: &str, spec: TypeSpec, description: &str) -> Self {
        Self {
            name: name.to_string(),
            spec,
            required: false,
            default: None,
            description: description.to_string(),
            enum_variants: Vec::new(),
        }
    }

    /// Attaches a default value applied when the parameter is omitted.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Attaches the enumerated accepted values for the parameter.
    #[must_use]
    pub fn with_enum_variants(mut self, variants: Vec<EnumVariantDoc>) -> Self {
        self.enum_variants = variants;
        self
    }
}

/// Treats a present `default` key as a declared default, including `null`.
///
/// A plain `Option<Value>` would fold `"default": null` into absence and break
/// the artifact round-trip guarantee.
fn deserialize_present_default<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Description of the value a function produces on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReturnDoc {
    /// Type of the returned value.
    #[serde(rename = "type")]
    pub spec: TypeSpec,
    /// What the returned value represents.
    pub description: String,
    /// Bullet statements about the returned value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

impl ReturnDoc {
    /// Builds a return description without rules.
    #[must_use]
    pub fn new(spec: TypeSpec, description: &str) -> Self {
        Self {
            spec,
            description: description.to_string(),
            rules: Vec::new(),
        }
    }

    /// Attaches bullet statements about the returned value.
    #[must_use]
    pub fn with_rules(mut self, rules: &[&str]) -> Self {
        self.rules = rules.iter().map(|rule| (*rule).to_string()).collect();
        self
    }
}

/// One executable proof of behavior.
///
/// # Invariants
/// - `source` must be valid Rill example-call syntax; the executor reports a
///   parse failure as a validation failure attributed to this example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExampleDoc {
    /// Short display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Expression text evaluated against the real function.
    pub source: String,
    /// Declared outcome the evaluation must produce.
    pub expected: ExpectedOutcome,
    /// Additional prose shown with the example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExampleDoc {
    /// Builds an example from a title, source text, and expected outcome.
    #[must_use]
    pub fn new(title: &str, source: &str, expected: ExpectedOutcome) -> Self {
        Self {
            title: Some(title.to_string()),
            source: source.to_string(),
            expected,
            notes: None,
        }
    }

    /// Attaches additional prose shown with the example.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

// ============================================================================
// SECTION: Function Documentation
// ============================================================================

/// Canonical description of one documented function.
///
/// # Invariants
/// - `identifier` is unique within a registry.
/// - `parameters` order defines call-site positional order.
/// - A non-empty `internal_failure_reasons` means the evaluation contract is
///   fallible.
/// - Instances held by a registry passed the completeness predicate at
///   registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDoc {
    /// Unique function name, stable across versions.
    pub identifier: String,
    /// One-line description.
    pub summary: String,
    /// Full prose description. Supersedes the legacy `usage` field; artifacts
    /// written by older engines are accepted via the alias.
    #[serde(alias = "usage")]
    pub description: String,
    /// Classification used for grouping.
    pub category: Category,
    /// Declared parameters in positional order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDoc>,
    /// Description of the success value.
    #[serde(rename = "return")]
    pub returns: ReturnDoc,
    /// Distinct evaluation-time failure conditions, in documentation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_failure_reasons: Vec<String>,
    /// Advisory notes rendered alongside the description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
    /// Executable examples in documentation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleDoc>,
}

impl FunctionDoc {
    /// Builds a documentation record with the required scalar fields.
    ///
    /// Parameters, failure reasons, notices, and examples start empty and are
    /// attached with the builder methods below.
    #[must_use]
    pub fn new(
        identifier: &str,
        category: Category,
        summary: &str,
        description: &str,
        returns: ReturnDoc,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            summary: summary.to_string(),
            description: description.to_string(),
            category,
            parameters: Vec::new(),
            returns,
            internal_failure_reasons: Vec::new(),
            notices: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Attaches the declared parameters in positional order.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterDoc>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attaches the evaluation-time failure conditions.
    #[must_use]
    pub fn with_internal_failure_reasons(mut self, reasons: &[&str]) -> Self {
        self.internal_failure_reasons = reasons.iter().map(|r| (*r).to_string()).collect();
        self
    }

    /// Attaches advisory notes.
    #[must_use]
    pub fn with_notices(mut self, notices: &[&str]) -> Self {
        self.notices = notices.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Attaches the executable examples in documentation order.
    #[must_use]
    pub fn with_examples(mut self, examples: Vec<ExampleDoc>) -> Self {
        self.examples = examples;
        self
    }

    /// Returns true when the evaluation contract is fallible.
    #[must_use]
    pub fn is_fallible(&self) -> bool {
        !self.internal_failure_reasons.is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
