// crates/rill-docs-engine/tests/proptest_generator.rs
// ============================================================================
// Module: Doc Generator Property-Based Tests
// Description: Property tests for artifact determinism and round-trips.
// Purpose: Detect serialization drift across arbitrary documentation records.
// ============================================================================

//! Property-based tests for generator invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use rill_docs_engine::generate;
use rill_docs_engine::parse_artifact;
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

/// Strategy over non-empty printable text.
fn text_strategy() -> impl Strategy<Value = String> {
    "[ -~]{1,40}".prop_filter("non-blank", |text| !text.trim().is_empty())
}

/// Strategy over identifiers.
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,20}"
}

/// Strategy over categories.
fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Strategy over simple literal values.
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|number| Value::Number(number.into())),
        "[ -~]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy over type specifications.
fn spec_strategy() -> impl Strategy<Value = TypeSpec> {
    prop_oneof![
        Just(TypeSpec::Any),
        Just(TypeSpec::String),
        Just(TypeSpec::Integer),
        Just(TypeSpec::Object),
        Just(TypeSpec::array_of(TypeSpec::String)),
        Just(TypeSpec::Union(vec![TypeSpec::String, TypeSpec::Null])),
    ]
}

/// Strategy over complete documentation records.
fn doc_strategy() -> impl Strategy<Value = FunctionDoc> {
    (
        identifier_strategy(),
        category_strategy(),
        text_strategy(),
        text_strategy(),
        spec_strategy(),
        prop::collection::vec((value_strategy(), any::<bool>()), 0 .. 3),
        prop::option::of(value_strategy()),
    )
        .prop_map(|(identifier, category, summary, description, spec, examples, default)| {
            let mut parameters = vec![ParameterDoc::required(
                "value",
                spec.clone(),
                "The primary input.",
            )];
            if default.is_some() {
                let mut optional =
                    ParameterDoc::optional("extra", TypeSpec::Any, "An optional input.");
                if let Some(default) = default {
                    optional = optional.with_default(default);
                }
                parameters.push(optional);
            }
            let examples = examples
                .into_iter()
                .enumerate()
                .map(|(index, (value, fails))| {
                    let expected = if fails {
                        ExpectedOutcome::Failure(DeclaredFailure {
                            kind: FailureKind::InvalidInput,
                            message: "bad input".to_string(),
                        })
                    } else {
                        ExpectedOutcome::Success(value)
                    };
                    ExampleDoc::new(&format!("example {index}"), "fn_under_test(1)", expected)
                })
                .collect();
            FunctionDoc::new(
                &identifier,
                category,
                &summary,
                &description,
                ReturnDoc::new(spec, "The produced value."),
            )
            .with_parameters(parameters)
            .with_examples(examples)
        })
}

proptest! {
    #[test]
    fn generation_is_deterministic(doc in doc_strategy()) {
        prop_assert_eq!(generate(&doc).unwrap(), generate(&doc).unwrap());
    }

    #[test]
    fn generated_artifacts_round_trip(doc in doc_strategy()) {
        let bytes = generate(&doc).unwrap();
        let restored = parse_artifact(&bytes).unwrap();
        prop_assert_eq!(&restored, &doc);
        prop_assert_eq!(generate(&restored).unwrap(), bytes);
    }
}
