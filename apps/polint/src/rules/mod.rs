//! Rule catalog.
//!
//! The catalog is a fixed, ordered table. Configuration resolves it once into
//! a `RuleSet`: the enabled rules in catalog order, each with its effective
//! severity, exclusions and message overrides. Local rules run once per
//! descriptor, global rules once per unordered descriptor pair.

pub mod global;
pub mod local;

use crate::config::{LintingConfig, Violation};
use crate::models::page_object::PageObjectLintingModel;
use crate::models::{Finding, Severity};
use crate::source::SourceLines;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Local,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    DuplicateSelector,
    RequiredRootDescription,
    RequiredAuthor,
    RequiredMethodDescription,
    SingleShadowBoundary,
    UniqueRootSelector,
    RootSelectorImpliesType,
    ElementsWithDifferentTypes,
}

/// Static metadata of a catalog entry.
#[derive(Debug)]
pub struct RuleMeta {
    pub id: &'static str,
    pub name: &'static str,
    pub code: u32,
    pub scope: RuleScope,
    /// Override key in the configuration object.
    pub config_key: &'static str,
    pub description: &'static str,
}

static CATALOG: [RuleMeta; 8] = [
    RuleMeta {
        id: "ULR01",
        name: "duplicate-selector-in-descriptor",
        code: 2001,
        scope: RuleScope::Local,
        config_key: "duplicateSelectors",
        description: "Two elements in the same page object and scope must not use the same selector",
    },
    RuleMeta {
        id: "ULR02",
        name: "required-root-description",
        code: 2002,
        scope: RuleScope::Local,
        config_key: "requiredRootDescription",
        description: "Page object root must have a description",
    },
    RuleMeta {
        id: "ULR03",
        name: "required-author",
        code: 2005,
        scope: RuleScope::Local,
        config_key: "requiredAuthor",
        description: "Root description must name an author",
    },
    RuleMeta {
        id: "ULR04",
        name: "required-method-description",
        code: 2003,
        scope: RuleScope::Local,
        config_key: "requiredMethodDescription",
        description: "Every declared method must have a description",
    },
    RuleMeta {
        id: "ULR05",
        name: "single-shadow-boundary",
        code: 2004,
        scope: RuleScope::Local,
        config_key: "requiredSingleShadowRoot",
        description: "Only the root element may declare a shadow boundary",
    },
    RuleMeta {
        id: "ULR06",
        name: "unique-root-selector",
        code: 3001,
        scope: RuleScope::Global,
        config_key: "duplicateRootSelectors",
        description: "Two page objects must not declare the same root selector",
    },
    RuleMeta {
        id: "ULR07",
        name: "root-selector-implies-type",
        code: 3002,
        scope: RuleScope::Global,
        config_key: "elementCantHaveRootSelector",
        description: "An element using another page object's root selector must have that page object's type",
    },
    RuleMeta {
        id: "ULR08",
        name: "elements-with-different-types",
        code: 3003,
        scope: RuleScope::Global,
        config_key: "duplicateCustomSelectors",
        description: "A custom component selector must map to the same type across page objects",
    },
];

impl RuleId {
    /// Catalog order. Findings are appended in this order.
    pub const ALL: [RuleId; 8] = [
        RuleId::DuplicateSelector,
        RuleId::RequiredRootDescription,
        RuleId::RequiredAuthor,
        RuleId::RequiredMethodDescription,
        RuleId::SingleShadowBoundary,
        RuleId::UniqueRootSelector,
        RuleId::RootSelectorImpliesType,
        RuleId::ElementsWithDifferentTypes,
    ];

    pub fn meta(self) -> &'static RuleMeta {
        &CATALOG[self as usize]
    }

    pub fn is_global(self) -> bool {
        self.meta().scope == RuleScope::Global
    }
}

/// A catalog rule with its configuration applied.
#[derive(Debug, Clone)]
pub struct ActiveRule {
    pub rule: RuleId,
    pub severity: Severity,
    pub exclude: Vec<String>,
    pub message: Option<String>,
    pub fix_suggestion: Option<String>,
}

impl ActiveRule {
    pub fn new(rule: RuleId) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            exclude: Vec::new(),
            message: None,
            fix_suggestion: None,
        }
    }

    pub fn meta(&self) -> &'static RuleMeta {
        self.rule.meta()
    }

    /// False when the page object is listed in the rule's exclusions.
    pub fn applies_to(&self, page_object: &PageObjectLintingModel) -> bool {
        !self.exclude.iter().any(|e| page_object.matches(e))
    }

    /// Build a finding, substituting configured texts for the defaults.
    pub(crate) fn finding(
        &self,
        page_object: &PageObjectLintingModel,
        related: Option<&PageObjectLintingModel>,
        message: String,
        fix_suggestion: String,
        source_line: usize,
    ) -> Finding {
        let meta = self.meta();
        Finding {
            rule_id: meta.id,
            rule_name: meta.name,
            code: meta.code,
            severity: self.severity,
            message: self.message.clone().unwrap_or(message),
            fix_suggestion: self.fix_suggestion.clone().unwrap_or(fix_suggestion),
            source_line,
            page_object: page_object.source_path.clone(),
            related_page_object: related.map(|r| r.source_path.clone()),
        }
    }

    pub fn check_local(
        &self,
        model: &PageObjectLintingModel,
        lines: &dyn SourceLines,
        out: &mut Vec<Finding>,
    ) {
        if self.applies_to(model) {
            local::check(self, model, lines, out);
        }
    }

    pub fn check_global(
        &self,
        first: &PageObjectLintingModel,
        second: &PageObjectLintingModel,
        lines: &dyn SourceLines,
        out: &mut Vec<Finding>,
    ) {
        if self.applies_to(first) && self.applies_to(second) {
            global::check(self, first, second, lines, out);
        }
    }
}

/// Enabled rules, split by scope, in catalog order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub local: Vec<ActiveRule>,
    pub global: Vec<ActiveRule>,
}

impl RuleSet {
    pub fn resolve(config: &LintingConfig) -> Self {
        let mut local = Vec::new();
        let mut global = Vec::new();
        for id in RuleId::ALL {
            let mut rule = ActiveRule::new(id);
            if let Some(ov) = config.rule_override(id) {
                match ov.violation {
                    Some(Violation::Disabled) => continue,
                    Some(Violation::Error) => rule.severity = Severity::Error,
                    Some(Violation::Warning) | None => {}
                }
                rule.exclude = ov.exclude.clone();
                rule.message = ov.message.clone();
                rule.fix_suggestion = ov.fix_suggestion.clone();
            }
            if id.is_global() {
                global.push(rule);
            } else {
                local.push(rule);
            }
        }
        RuleSet { local, global }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveRule> {
        self.local.iter().chain(self.global.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_rule_id() {
        for (i, id) in RuleId::ALL.iter().enumerate() {
            assert_eq!(id.meta().id, format!("ULR{:02}", i + 1));
        }
        let codes: Vec<u32> = RuleId::ALL.iter().map(|r| r.meta().code).collect();
        assert_eq!(codes, vec![2001, 2002, 2005, 2003, 2004, 3001, 3002, 3003]);
    }

    #[test]
    fn test_default_rule_set_enables_everything_as_warnings() {
        let set = RuleSet::resolve(&LintingConfig::default());
        assert_eq!(set.local.len(), 5);
        assert_eq!(set.global.len(), 3);
        assert!(set.iter().all(|r| r.severity == Severity::Warning));
        assert!(set.local.iter().all(|r| !r.rule.is_global()));
        assert!(set.global.iter().all(|r| r.rule.is_global()));
    }

    #[test]
    fn test_overrides_resolve_once() {
        let config: LintingConfig = serde_json::from_str(
            r#"{
              "requiredAuthor": {"violation": "disabled"},
              "duplicateRootSelectors": {"violation": "error", "exclude": ["legacy"]},
              "requiredMethodDescription": {"message": "describe it"}
            }"#,
        )
        .unwrap();
        let set = RuleSet::resolve(&config);
        let local: Vec<&str> = set.local.iter().map(|r| r.meta().id).collect();
        assert_eq!(local, vec!["ULR01", "ULR02", "ULR04", "ULR05"]);
        let root = &set.global[0];
        assert_eq!(root.rule, RuleId::UniqueRootSelector);
        assert_eq!(root.severity, Severity::Error);
        assert_eq!(root.exclude, vec!["legacy"]);
        assert_eq!(set.local[2].message.as_deref(), Some("describe it"));
    }
}
