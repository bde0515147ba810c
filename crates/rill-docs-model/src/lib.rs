// crates/rill-docs-model/src/lib.rs
// ============================================================================
// Module: Rill Docs Model Library
// Description: Canonical metadata schema for documented Rill functions.
// Purpose: Single source of truth for the FunctionDoc shape and its checks.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `rill-docs-model` defines the canonical structured shape every documented
//! Rill function must supply: the [`FunctionDoc`] record, the
//! [`TypeSpec`] grammar used for parameter and return types, and the pure
//! completeness predicate used at registration time and by the CI gate.
//!
//! The model is pure data plus pure validation. It performs no IO and holds
//! no state; ownership of `FunctionDoc` instances belongs to the registry.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod completeness;
pub mod doc;
pub mod typespec;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use completeness::is_complete;
pub use completeness::missing_fields;
pub use doc::Category;
pub use doc::DeclaredFailure;
pub use doc::EnumVariantDoc;
pub use doc::ExampleDoc;
pub use doc::ExpectedOutcome;
pub use doc::FailureKind;
pub use doc::FunctionDoc;
pub use doc::ParameterDoc;
pub use doc::ReturnDoc;
pub use typespec::TypeSpec;
pub use typespec::TypeSpecParseError;
