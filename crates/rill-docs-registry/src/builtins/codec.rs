// crates/rill-docs-registry/src/builtins/codec.rs
// ============================================================================
// Module: Codec Functions
// Description: Built-in encoding and decoding functions.
// Purpose: Document and evaluate encode_base64 and decode_base64.
// Dependencies: rill-docs-model, serde_json, base64, crate::evaluator
// ============================================================================

//! ## Overview
//! Codec category built-ins. Both functions accept an optional `charset`
//! parameter closed over the standard and URL-safe Base64 alphabets.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use base64::engine::general_purpose::URL_SAFE;
use rill_docs_model::Category;
use rill_docs_model::EnumVariantDoc;
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
// SECTION: Charset Parameter
// ============================================================================

/// Default alphabet applied when no `charset` is supplied.
const DEFAULT_CHARSET: &str = "standard";

/// Builds the shared `charset` parameter declaration.
fn charset_parameter() -> ParameterDoc {
    ParameterDoc::optional("charset", TypeSpec::String, "The Base64 alphabet to use.")
        .with_default(json!(DEFAULT_CHARSET))
        .with_enum_variants(vec![
            EnumVariantDoc {
                value: "standard".to_string(),
                description: "The standard Base64 alphabet with `+` and `/`.".to_string(),
            },
            EnumVariantDoc {
                value: "url_safe".to_string(),
                description: "The URL-safe alphabet with `-` and `_`.".to_string(),
            },
        ])
}

/// Resolves the bound `charset` argument to an engine.
fn charset_engine(args: &Arguments) -> Result<&'static base64::engine::GeneralPurpose, EvalFailure> {
    let charset = match args.optional("charset") {
        Some(charset) => require_str(charset, "charset")?,
        None => DEFAULT_CHARSET,
    };
    match charset {
        "standard" => Ok(&STANDARD),
        "url_safe" => Ok(&URL_SAFE),
        other => Err(EvalFailure::invalid_argument(format!("unknown charset: {other}"))),
    }
}

// ============================================================================
// SECTION: Encode Base64
// ============================================================================

/// The `encode_base64` function.
#[derive(Debug, Clone, Copy)]
pub struct EncodeBase64;

impl DocumentedFunction for EncodeBase64 {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "encode_base64",
            Category::Codec,
            "Encodes a string to Base64.",
            "Encodes the UTF-8 bytes of the `value` string into Base64 using the selected \
             `charset` alphabet.",
            ReturnDoc::new(TypeSpec::String, "The Base64 encoding of `value`."),
        )
        .with_parameters(vec![
            ParameterDoc::required("value", TypeSpec::String, "The string to encode."),
            charset_parameter(),
        ])
        .with_internal_failure_reasons(&["`value` is not a string."])
        .with_examples(vec![ExampleDoc::new(
            "Encode to Base64",
            r#"encode_base64("hello rill")"#,
            ExpectedOutcome::Success(json!("aGVsbG8gcmlsbA==")),
        )])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        let engine = charset_engine(args)?;
        Ok(Value::String(engine.encode(text.as_bytes())))
    }
}

// ============================================================================
// SECTION: Decode Base64
// ============================================================================

/// The `decode_base64` function.
#[derive(Debug, Clone, Copy)]
pub struct DecodeBase64;

impl DocumentedFunction for DecodeBase64 {
    fn doc(&self) -> FunctionDoc {
        FunctionDoc::new(
            "decode_base64",
            Category::Codec,
            "Decodes a Base64 string.",
            "Decodes the `value` string from Base64 using the selected `charset` alphabet and \
             returns the decoded text.",
            ReturnDoc::new(TypeSpec::String, "The decoded string."),
        )
        .with_parameters(vec![
            ParameterDoc::required("value", TypeSpec::String, "The Base64 string to decode."),
            charset_parameter(),
        ])
        .with_internal_failure_reasons(&[
            "`value` is not a string.",
            "`value` is not valid Base64.",
            "`value` does not decode to a UTF-8 string.",
        ])
        .with_examples(vec![ExampleDoc::new(
            "Decode from Base64",
            r#"decode_base64("aGVsbG8gcmlsbA==")"#,
            ExpectedOutcome::Success(json!("hello rill")),
        )])
    }

    fn evaluate(&self, args: &Arguments) -> Result<Value, EvalFailure> {
        let value = args.required("value")?;
        let text = require_str(value, "value")?;
        let engine = charset_engine(args)?;
        let bytes = engine
            .decode(text)
            .map_err(|_| EvalFailure::invalid_input("`value` is not valid Base64."))?;
        String::from_utf8(bytes)
            .map(Value::String)
            .map_err(|_| EvalFailure::invalid_input("`value` does not decode to a UTF-8 string."))
    }
}
