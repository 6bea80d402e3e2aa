//! Shared data models: linting facts, findings and run summaries.

pub mod page_object;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a finding. Only `Error` can fail a run.
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A single lint violation.
pub struct Finding {
    /// Stable identifier, `ULR01`..`ULR08`.
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub code: u32,
    pub severity: Severity,
    pub message: String,
    pub fix_suggestion: String,
    /// 1-based, best effort.
    pub source_line: usize,
    /// Descriptor the finding is reported against.
    pub page_object: String,
    /// Other descriptor of the pair, for cross-descriptor rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_page_object: Option<String>,
}

impl Finding {
    /// Message with rule, descriptor, severity and fix, as printed to console.
    pub fn full_message(&self) -> String {
        format!(
            "lint rule {} failure in page object {}: {} {}: {}; {}",
            self.rule_id,
            self.page_object,
            self.severity,
            self.code,
            self.message,
            self.fix_suggestion
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub page_objects: usize,
}

impl Summary {
    pub fn of(findings: &[Finding], page_objects: usize) -> Self {
        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        Summary {
            errors,
            warnings: findings.len() - errors,
            page_objects,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
/// Findings of a run with their summary.
pub struct LintResult {
    pub findings: Vec<Finding>,
    pub summary: Summary,
}
