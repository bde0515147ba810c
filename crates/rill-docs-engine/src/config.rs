// crates/rill-docs-engine/src/config.rs
// ============================================================================
// Module: Engine Configuration
// Description: Canonical config model for rill-docs.toml.
// Purpose: Single source of truth for engine settings and their validation.
// Dependencies: serde, thiserror, toml, std
// ============================================================================

//! ## Overview
//! The engine is configured from `rill-docs.toml`. Deserialization is strict
//! (unknown keys are rejected) and validation fails closed: an invalid config
//! never produces a partially configured engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default artifact directory relative to the repository root.
const DEFAULT_ARTIFACT_DIR: &str = "docs/generated/functions";

/// Default repository label recorded for aggregation.
const DEFAULT_REPOSITORY: &str = "rill";

/// Default per-example execution budget in milliseconds.
const DEFAULT_EXAMPLE_TIMEOUT_MS: u64 = 5_000;

/// Default artifact directory.
fn default_artifact_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_DIR)
}

/// Default repository label.
fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

/// Default per-example budget.
const fn default_example_timeout_ms() -> u64 {
    DEFAULT_EXAMPLE_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO failure while reading the config file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML syntax or shape error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A field value failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Failure Matching Mode
// ============================================================================

/// How declared failures are compared against actual failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMatch {
    /// Compare only the failure kind.
    KindOnly,
    /// Compare kind and message.
    #[default]
    KindAndMessage,
}

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

/// Engine configuration loaded from `rill-docs.toml`.
///
/// # Invariants
/// - Validated instances have a non-empty repository label, a non-empty
///   artifact directory, and a positive example budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Directory holding the checked-in artifact set.
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,
    /// Repository label used by the aggregator key.
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Per-example execution budget in milliseconds.
    #[serde(default = "default_example_timeout_ms")]
    pub example_timeout_ms: u64,
    /// Whether functions without examples fail validation.
    #[serde(default)]
    pub strict_no_examples: bool,
    /// How declared failures are compared against actual failures.
    #[serde(default)]
    pub failure_match: FailureMatch,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            repository: default_repository(),
            example_timeout_ms: default_example_timeout_ms(),
            strict_no_examples: false,
            failure_match: FailureMatch::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on syntax errors, unknown keys, or invalid
    /// field values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.artifact_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(String::from("artifact_dir must not be empty")));
        }
        if self.repository.trim().is_empty() {
            return Err(ConfigError::Invalid(String::from("repository must not be empty")));
        }
        if self.example_timeout_ms == 0 {
            return Err(ConfigError::Invalid(String::from("example_timeout_ms must be positive")));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
