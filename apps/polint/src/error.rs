//! Error types.
//! One enum per failure family, `thiserror` only.

use crate::guardrails::ValidationVerdict;
use std::path::PathBuf;

/// Fatal structural problem in a single descriptor. Blocks code generation.
#[derive(Debug, thiserror::Error)]
pub enum GuardrailError {
    #[error("page object {descriptor}: elements \"{first}\" and \"{second}\": {verdict}")]
    Conflict {
        descriptor: String,
        verdict: ValidationVerdict,
        first: String,
        second: String,
    },

    #[error(
        "page object {descriptor}: selector \"{selector}\" of the element \"{element}\" hardcodes text, use a parameter instead"
    )]
    HardcodedText {
        descriptor: String,
        element: String,
        selector: String,
    },
}

/// Run-level lint failures.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// `throwOnError` escalation; carries the newline-joined error summary.
    #[error("linting failures:\n{0}")]
    Failures(String),

    #[error("error creating linting report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error serializing linting report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures while collecting page object fact files.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    #[error("invalid input pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("cannot read fact file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fact file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
