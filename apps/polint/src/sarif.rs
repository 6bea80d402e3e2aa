//! SARIF 2.1.0 conversion of lint findings.

use crate::models::{Finding, Severity};
use crate::rules::{RuleId, RuleSet};
use serde_json::{json, Value};
use std::path::Path;

const SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "polint";

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

/// Descriptor path as a SARIF uri: relative to `root` when possible, `/` separated.
fn artifact_uri(page_object: &str, root: Option<&Path>) -> String {
    let path = Path::new(page_object);
    let relative = match root {
        Some(root) if path.is_absolute() => pathdiff::diff_paths(path, root),
        _ => None,
    };
    relative
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| page_object.to_string())
        .replace('\\', "/")
}

/// Driver rule metadata for every catalog rule, with its configured level.
fn build_rules(rules: &RuleSet) -> Vec<Value> {
    RuleId::ALL
        .iter()
        .map(|id| {
            let meta = id.meta();
            let configured = rules.iter().find(|r| r.rule == *id);
            let mut rule = json!({
                "id": meta.id,
                "name": meta.name,
                "shortDescription": { "text": meta.description },
                "fullDescription": { "text": meta.description },
                "defaultConfiguration": {
                    "enabled": configured.is_some(),
                    "level": level(configured.map(|r| r.severity).unwrap_or(Severity::Warning))
                },
                "properties": { "code": meta.code }
            });
            if configured.is_none() {
                rule["defaultConfiguration"]["level"] = json!("none");
            }
            rule
        })
        .collect()
}

fn build_results(findings: &[Finding], root: Option<&Path>) -> Vec<Value> {
    findings
        .iter()
        .map(|f| {
            let rule_index = RuleId::ALL
                .iter()
                .position(|id| id.meta().id == f.rule_id)
                .unwrap_or_default();
            let mut result = json!({
                "ruleId": f.rule_id,
                "ruleIndex": rule_index,
                "level": level(f.severity),
                "message": { "text": f.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": artifact_uri(&f.page_object, root),
                            "uriBaseId": "%SRCROOT%"
                        },
                        "region": { "startLine": f.source_line.max(1) }
                    }
                }],
                "fixes": [{
                    "description": { "text": f.fix_suggestion }
                }],
                "properties": { "code": f.code }
            });
            if let Some(related) = f.related_page_object.as_ref() {
                result["relatedLocations"] = json!([{
                    "id": 0,
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": artifact_uri(related, root),
                            "uriBaseId": "%SRCROOT%"
                        }
                    }
                }]);
            }
            result
        })
        .collect()
}

/// Build the SARIF log for a run.
pub fn to_sarif(rules: &RuleSet, findings: &[Finding], root: Option<&Path>) -> Value {
    json!({
        "$schema": SCHEMA,
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": TOOL_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": build_rules(rules)
                }
            },
            "results": build_results(findings, root)
        }]
    })
}
