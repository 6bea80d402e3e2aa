//! polint core library.
//!
//! Two validation layers for page object descriptors:
//! - guardrails: fatal structural checks over one descriptor's element graph,
//!   run while the descriptor compiles;
//! - lint: configurable findings over compiled descriptors, per page object
//!   and across page object pairs, reported to console and as SARIF.
//!
//! Guardrails are a library entry point for descriptor compilers: call
//! `guardrails::validate_elements` with the descriptor's element graph
//! (built in code, or deserialized from its JSON form) before emitting code
//! and fact files. The `polint` binary only consumes fact files, so it runs
//! the lint layer alone.
//!
//! High-level modules:
//! - `selector`: Locator model and selector equivalence predicates.
//! - `guardrails`: Element graph validation verdicts.
//! - `models`: Linting facts, findings and summaries.
//! - `rules`: Rule catalog with local and global rules.
//! - `session`: Per-run linting state.
//! - `lint`: Orchestrator driving the lint phases.
//! - `config`: Linting configuration and discovery.
//! - `facts`: Fact file discovery and parallel loading.
//! - `source`: Source line lookup for findings.
//! - `sarif`: SARIF 2.1.0 conversion.
//! - `output`: Human/JSON/SARIF printers.
//! - `cli`: CLI argument parsing (binary uses this).
pub mod cli;
pub mod config;
pub mod error;
pub mod facts;
pub mod guardrails;
pub mod lint;
pub mod models;
pub mod output;
pub mod rules;
pub mod sarif;
pub mod selector;
pub mod session;
pub mod source;

pub use config::LintingConfig;
pub use error::{ConfigError, FactError, GuardrailError, LintError};
pub use lint::{LintOutcome, Linter};
pub use session::LintingSession;
