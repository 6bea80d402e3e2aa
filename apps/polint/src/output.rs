//! Output rendering for lint results and the rule catalog.
//!
//! Supports `human` (default), `json` and `sarif`. The JSON form holds the
//! findings and a top-level summary; SARIF is the same report the engine
//! writes to disk.

use crate::models::{LintResult, Severity};
use crate::rules::{RuleId, RuleSet};
use crate::sarif;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output == "human" && std::env::var_os("NO_COLOR").is_none()
}

/// Print lint results in the requested format.
///
/// In `human` mode, `list_findings = false` prints only the summary, for runs
/// where the engine already logged every finding.
pub fn print_lint(
    res: &LintResult,
    rules: &RuleSet,
    root: Option<&Path>,
    output: &str,
    list_findings: bool,
) {
    match output {
        "json" => println!("{}", render_json(&compose_lint_json(res))),
        "sarif" => println!(
            "{}",
            render_json(&sarif::to_sarif(rules, &res.findings, root))
        ),
        _ => {
            for line in compose_human_lines(res, use_colors(output), list_findings) {
                println!("{}", line);
            }
        }
    }
}

/// Human output lines (pure): two lines per listed finding, then the summary.
pub fn compose_human_lines(res: &LintResult, color: bool, list_findings: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for f in res.findings.iter().filter(|_| list_findings) {
        let (icon, sev) = match f.severity {
            Severity::Error => ("✖", "⟦error⟧"),
            Severity::Warning => ("▲", "⟦warn⟧"),
        };
        let location = format!("{}:{}", f.page_object, f.source_line);
        if color {
            let (icon, sev) = match f.severity {
                Severity::Error => (icon.red().to_string(), sev.red().bold().to_string()),
                Severity::Warning => (icon.yellow().to_string(), sev.yellow().bold().to_string()),
            };
            lines.push(format!(
                "{} {} {} ❲{} {}❳ {}",
                icon,
                sev,
                location.bold(),
                f.rule_id,
                f.code,
                f.message
            ));
            lines.push(format!("    {} {}", "fix:".bright_black(), f.fix_suggestion));
        } else {
            lines.push(format!(
                "{} {} {} ❲{} {}❳ {}",
                icon, sev, location, f.rule_id, f.code, f.message
            ));
            lines.push(format!("    fix: {}", f.fix_suggestion));
        }
    }
    let summary = format!(
        "— Summary — errors={} warnings={} page_objects={}",
        res.summary.errors, res.summary.warnings, res.summary.page_objects
    );
    if color {
        lines.push(summary.bold().to_string());
    } else {
        lines.push(summary);
    }
    lines
}

/// Print the rule catalog with the effective configuration.
pub fn print_rules(rules: &RuleSet, output: &str) {
    match output {
        "json" => println!("{}", render_json(&compose_rules_json(rules))),
        _ => {
            let color = use_colors(output);
            for id in RuleId::ALL {
                let meta = id.meta();
                let state = match rules.iter().find(|r| r.rule == id) {
                    Some(r) => r.severity.to_string(),
                    None => "disabled".to_string(),
                };
                let head = format!("{} {} {}", meta.id, meta.code, meta.name);
                if color {
                    println!("{} [{}] {}", head.bold(), state.cyan(), meta.description);
                } else {
                    println!("{} [{}] {}", head, state, meta.description);
                }
            }
        }
    }
}

/// `error:` prefix for stderr diagnostics, colored unless NO_COLOR is set.
pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// `note:` prefix for stderr diagnostics.
pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

fn render_json(value: &JsonVal) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    json!({
        "findings": res.findings,
        "summary": res.summary,
    })
}

/// Compose the rule catalog JSON (pure).
pub fn compose_rules_json(rules: &RuleSet) -> JsonVal {
    let items: Vec<_> = RuleId::ALL
        .iter()
        .map(|id| {
            let meta = id.meta();
            let active = rules.iter().find(|r| r.rule == *id);
            json!({
                "id": meta.id,
                "name": meta.name,
                "code": meta.code,
                "global": id.is_global(),
                "configKey": meta.config_key,
                "enabled": active.is_some(),
                "severity": active.map(|r| r.severity),
                "description": meta.description,
            })
        })
        .collect();
    json!({ "rules": items })
}
