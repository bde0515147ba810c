// crates/rill-docs-cli/src/main.rs
// ============================================================================
// Module: Rill Docs CLI Entry Point
// Description: Binary entry point for the rill-docs command.
// Purpose: Hand control to the testable dispatcher in the library crate.
// Dependencies: rill-docs-cli
// ============================================================================

//! ## Overview
//! Thin binary wrapper: argument parsing, registry construction, and command
//! dispatch live in `rill_docs_cli` so they stay testable.

use std::process::ExitCode;

/// CLI entry point.
fn main() -> ExitCode {
    rill_docs_cli::run()
}
