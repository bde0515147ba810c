// crates/rill-docs-model/src/typespec.rs
// ============================================================================
// Module: Type Specification Grammar
// Description: Textual type grammar for parameter and return declarations.
// Purpose: Provide a stable, human-diffable type rendering for artifacts.
// Dependencies: serde, thiserror, std::fmt, std::str
// ============================================================================

//! ## Overview
//! Type specifications cover the primitives of the Rill value model, the
//! `array` and `object` wrappers, and unions. They serialize as their textual
//! rendering (`string`, `array<integer>`, `string | null`) so artifacts stay
//! readable in diffs, and parse back losslessly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as DeError;
use thiserror::Error;

// ============================================================================
// SECTION: Type Specification
// ============================================================================

/// Declared type of a parameter or return value.
///
/// # Invariants
/// - `Union` holds at least two members and no nested unions; the parser
///   flattens `a | b | c` into a single union.
/// - `Display` and `FromStr` round-trip: `parse(render(spec)) == spec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// Any value.
    Any,
    /// UTF-8 string.
    String,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean.
    Boolean,
    /// The null value.
    Null,
    /// Compiled regular expression literal.
    Regex,
    /// Array with an optional element type (`array` or `array<T>`).
    Array(Option<Box<TypeSpec>>),
    /// Object with string keys.
    Object,
    /// Union of two or more member types.
    Union(Vec<TypeSpec>),
}

impl TypeSpec {
    /// Builds an `array<element>` wrapper.
    #[must_use]
    pub fn array_of(element: Self) -> Self {
        Self::Array(Some(Box::new(element)))
    }

    /// Builds a union from members, flattening nested unions.
    ///
    /// A union of one member collapses to that member; an empty union
    /// collapses to [`TypeSpec::Any`].
    #[must_use]
    pub fn union(members: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Any,
            1 => flat.swap_remove(0),
            _ => Self::Union(flat),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Null => f.write_str("null"),
            Self::Regex => f.write_str("regex"),
            Self::Array(None) => f.write_str("array"),
            Self::Array(Some(element)) => write!(f, "array<{element}>"),
            Self::Object => f.write_str("object"),
            Self::Union(members) => {
                for (index, member) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// SECTION: Parse Errors
// ============================================================================

/// Errors raised while parsing a type specification rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeSpecParseError {
    /// The rendering was empty or contained an empty union member.
    #[error("type specification is empty")]
    Empty,
    /// A name was not part of the type grammar.
    #[error("unknown type name: {0}")]
    UnknownType(String),
    /// Angle brackets did not balance.
    #[error("unbalanced angle brackets in: {0}")]
    UnbalancedAngle(String),
}

// ============================================================================
// SECTION: Parser
// ============================================================================

impl FromStr for TypeSpec {
    type Err = TypeSpecParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TypeSpecParseError::Empty);
        }
        let members = split_union(trimmed)?;
        if members.len() == 1 {
            return parse_atom(members[0]);
        }
        let mut parsed = Vec::with_capacity(members.len());
        for member in members {
            parsed.push(parse_atom(member)?);
        }
        Ok(TypeSpec::union(parsed))
    }
}

/// Splits a rendering on `|` at angle-bracket depth zero.
fn split_union(text: &str) -> Result<Vec<&str>, TypeSpecParseError> {
    let mut members = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0_usize;
    for (offset, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeSpecParseError::UnbalancedAngle(text.to_string()))?;
            }
            '|' if depth == 0 => {
                members.push(text[start .. offset].trim());
                start = offset + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypeSpecParseError::UnbalancedAngle(text.to_string()));
    }
    members.push(text[start ..].trim());
    if members.iter().any(|member| member.is_empty()) {
        return Err(TypeSpecParseError::Empty);
    }
    Ok(members)
}

/// Parses a single non-union member.
fn parse_atom(text: &str) -> Result<TypeSpec, TypeSpecParseError> {
    match text {
        "any" => Ok(TypeSpec::Any),
        "string" => Ok(TypeSpec::String),
        "integer" => Ok(TypeSpec::Integer),
        "float" => Ok(TypeSpec::Float),
        "boolean" => Ok(TypeSpec::Boolean),
        "null" => Ok(TypeSpec::Null),
        "regex" => Ok(TypeSpec::Regex),
        "array" => Ok(TypeSpec::Array(None)),
        "object" => Ok(TypeSpec::Object),
        other => {
            let element = other
                .strip_prefix("array<")
                .and_then(|rest| rest.strip_suffix('>'))
                .ok_or_else(|| TypeSpecParseError::UnknownType(other.to_string()))?;
            element.parse().map(TypeSpec::array_of)
        }
    }
}

// ============================================================================
// SECTION: Serde Support
// ============================================================================

impl Serialize for TypeSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(DeError::custom)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
