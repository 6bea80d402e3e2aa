//! Per-run linting state.

use crate::models::page_object::PageObjectLintingModel;
use crate::models::{Finding, Severity, Summary};

/// Registered page objects and findings of one compilation run.
///
/// Both lists are append-only and keep insertion order; the global pass and
/// report consumers rely on it. A session is owned by the caller and passed
/// to each phase, so independent runs never share state.
#[derive(Debug, Default)]
pub struct LintingSession {
    models: Vec<PageObjectLintingModel>,
    findings: Vec<Finding>,
}

impl LintingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn models(&self) -> &[PageObjectLintingModel] {
        &self.models
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub(crate) fn register(&mut self, model: PageObjectLintingModel) {
        self.models.push(model);
    }

    pub(crate) fn extend(&mut self, findings: Vec<Finding>) {
        self.findings.extend(findings);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.findings, self.models.len())
    }

    /// Consume the session, keeping only the findings.
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
