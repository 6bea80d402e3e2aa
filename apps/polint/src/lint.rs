//! Lint orchestrator.
//!
//! One `LintingSession` per compilation run, driven through three ordered
//! phases:
//! - configure: `Linter::new` resolves the rule table once;
//! - `lint`: local rules per compiled page object, in compilation order;
//! - `finish`: global rules over every unordered pair of registered page
//!   objects, then console reporting and the `throwOnError` decision.
//!
//! `write_report` emits the SARIF report afterwards. Findings are appended in
//! rule catalog order within each page object (or pair), pairs in `(i, j)`
//! order, so a run is exactly reproducible.

use crate::config::LintingConfig;
use crate::error::LintError;
use crate::models::page_object::PageObjectLintingModel;
use crate::models::{Finding, LintResult};
use crate::rules::RuleSet;
use crate::sarif;
use crate::session::LintingSession;
use crate::source::{FileSourceLines, SourceLines};
use std::fs;
use std::path::{Path, PathBuf};

/// Lint engine configured for one compiler invocation.
pub struct Linter {
    config: LintingConfig,
    rules: RuleSet,
    lines: Box<dyn SourceLines>,
}

/// Result of `Linter::run`.
#[derive(Debug)]
pub struct LintOutcome {
    pub result: LintResult,
    /// Where the SARIF report was written, if it was.
    pub report_path: Option<PathBuf>,
}

impl Linter {
    pub fn new(config: LintingConfig) -> Self {
        let rules = RuleSet::resolve(&config);
        Self {
            config,
            rules,
            lines: Box::new(FileSourceLines::new(".")),
        }
    }

    /// Replace the source line lookup used for finding locations.
    pub fn with_source_lines(mut self, lines: impl SourceLines + 'static) -> Self {
        self.lines = Box::new(lines);
        self
    }

    pub fn config(&self) -> &LintingConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Open a fresh session for a compilation run.
    pub fn start(&self) -> LintingSession {
        LintingSession::new()
    }

    /// Run local rules on a compiled page object and register it.
    pub fn lint(&self, session: &mut LintingSession, model: PageObjectLintingModel) {
        if self.config.disable {
            return;
        }
        let mut found: Vec<Finding> = Vec::new();
        for rule in &self.rules.local {
            rule.check_local(&model, self.lines.as_ref(), &mut found);
        }
        tracing::debug!(page_object = %model.source_path, findings = found.len(), "local rules done");
        session.extend(found);
        session.register(model);
    }

    /// Run global rules across all registered page objects and aggregate.
    ///
    /// With `throwOnError`, any error-severity finding fails the run with the
    /// newline-joined error messages.
    pub fn finish(&self, session: &mut LintingSession) -> Result<(), LintError> {
        if self.config.disable {
            return Ok(());
        }
        let mut found: Vec<Finding> = Vec::new();
        {
            let models = session.models();
            for (i, first) in models.iter().enumerate() {
                for second in &models[i + 1..] {
                    for rule in &self.rules.global {
                        rule.check_global(first, second, self.lines.as_ref(), &mut found);
                    }
                }
            }
        }
        tracing::debug!(
            page_objects = session.models().len(),
            findings = found.len(),
            "global rules done"
        );
        session.extend(found);

        let errors = self.report_to_console(session);
        if self.config.throw_on_error && !errors.is_empty() {
            return Err(LintError::Failures(errors));
        }
        Ok(())
    }

    /// Log warnings and errors when console printing is on; returns the
    /// joined error messages either way.
    fn report_to_console(&self, session: &LintingSession) -> String {
        let errors = join_messages(session.errors());
        if !self.config.print_to_console {
            return errors;
        }
        let warnings = join_messages(session.warnings());
        if !warnings.is_empty() {
            tracing::warn!("\n{}", warnings);
        }
        if !errors.is_empty() {
            tracing::error!("\n{}", errors);
        }
        errors
    }

    /// Location of the report for a given compiler root (current dir when absent).
    pub fn report_path(&self, compiler_root: Option<&Path>) -> PathBuf {
        compiler_root
            .unwrap_or_else(|| Path::new("."))
            .join(&self.config.report_output_path)
    }

    /// Write the SARIF report when enabled. Returns the written path.
    pub fn write_report(
        &self,
        session: &LintingSession,
        compiler_root: Option<&Path>,
    ) -> Result<Option<PathBuf>, LintError> {
        if self.config.disable || !self.config.write_report {
            return Ok(None);
        }
        let path = self.report_path(compiler_root);
        let log = sarif::to_sarif(&self.rules, session.findings(), compiler_root);
        let text = serde_json::to_string_pretty(&log)?;
        tracing::info!("Write results of linting to {}", path.display());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LintError::ReportWrite {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, text).map_err(|source| LintError::ReportWrite {
            path: path.clone(),
            source,
        })?;
        Ok(Some(path))
    }

    /// Lint a whole batch: start, per-page-object pass, finish, report.
    pub fn run(
        &self,
        models: impl IntoIterator<Item = PageObjectLintingModel>,
        compiler_root: Option<&Path>,
    ) -> Result<LintOutcome, LintError> {
        let mut session = self.start();
        for model in models {
            self.lint(&mut session, model);
        }
        self.finish(&mut session)?;
        let report_path = self.write_report(&session, compiler_root)?;
        let summary = session.summary();
        Ok(LintOutcome {
            result: LintResult {
                findings: session.into_findings(),
                summary,
            },
            report_path,
        })
    }
}

/// Process exit code for a lint run. Error findings alone never fail a run;
/// only the `throwOnError` escalation does (1). Report failures are
/// environment errors (2).
pub fn exit_code(result: &Result<LintOutcome, LintError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(LintError::Failures(_)) => 1,
        Err(LintError::ReportWrite { .. } | LintError::ReportSerialize(_)) => 2,
    }
}

fn join_messages<'a>(findings: impl Iterator<Item = &'a Finding>) -> String {
    findings
        .map(Finding::full_message)
        .collect::<Vec<_>>()
        .join("\n")
}
