//! Rules evaluated against a single page object.

use super::{ActiveRule, RuleId};
use crate::models::page_object::{PageObjectLintingModel, ROOT_ELEMENT_NAME};
use crate::models::Finding;
use crate::source::{name_fragment, SourceLines, FIRST_LINE};

pub(super) fn check(
    rule: &ActiveRule,
    model: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    match rule.rule {
        RuleId::DuplicateSelector => duplicate_selectors(rule, model, lines, out),
        RuleId::RequiredRootDescription => root_description(rule, model, out),
        RuleId::RequiredAuthor => author(rule, model, lines, out),
        RuleId::RequiredMethodDescription => method_descriptions(rule, model, lines, out),
        RuleId::SingleShadowBoundary => shadow_boundaries(rule, model, lines, out),
        RuleId::UniqueRootSelector
        | RuleId::RootSelectorImpliesType
        | RuleId::ElementsWithDifferentTypes => {}
    }
}

fn duplicate_selectors(
    rule: &ActiveRule,
    model: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    let elements = &model.elements;
    for (i, earlier) in elements.iter().enumerate() {
        for later in &elements[i + 1..] {
            if !earlier.is_same_locator(later) || !earlier.is_same_scope(later) {
                continue;
            }
            let message = format!(
                "duplicate selector \"{}\" for the elements \"{}\" and \"{}\"",
                later.selector_str(),
                later.name,
                earlier.name
            );
            let fix = format!(
                "remove duplicate elements: \"{}\" or \"{}\"",
                earlier.name, later.name
            );
            let line = lines.find_line(&model.source_path, &[&name_fragment(&later.name)]);
            out.push(rule.finding(model, None, message, fix, line));
        }
    }
}

fn root_description(rule: &ActiveRule, model: &PageObjectLintingModel, out: &mut Vec<Finding>) {
    let Some(root) = model.root.as_ref() else {
        return;
    };
    if !root.has_description {
        out.push(rule.finding(
            model,
            None,
            "root description is missing".to_string(),
            "add \"description\" property at the root".to_string(),
            FIRST_LINE,
        ));
    }
}

fn author(
    rule: &ActiveRule,
    model: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    let Some(root) = model.root.as_ref() else {
        return;
    };
    // without a description there is nowhere to put the author
    if root.has_description && !root.has_author {
        let line = lines.find_line(&model.source_path, &["\"description\""]);
        out.push(rule.finding(
            model,
            None,
            "property \"author\" is missing in the root description".to_string(),
            "add \"author\" property to the root description".to_string(),
            line,
        ));
    }
}

fn method_descriptions(
    rule: &ActiveRule,
    model: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    for method in model.methods.iter().filter(|m| !m.has_description) {
        let line = lines.find_line(&model.source_path, &[&name_fragment(&method.name)]);
        out.push(rule.finding(
            model,
            None,
            format!("method \"{}\" does not have description", method.name),
            format!(
                "add \"description\" property to the method \"{}\"",
                method.name
            ),
            line,
        ));
    }
}

fn shadow_boundaries(
    rule: &ActiveRule,
    model: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    for name in model
        .shadow_boundaries
        .iter()
        .filter(|n| n.as_str() != ROOT_ELEMENT_NAME)
    {
        let line = lines.find_line(&model.source_path, &[&name_fragment(name), "\"shadow\""]);
        out.push(rule.finding(
            model,
            None,
            format!(
                "only root shadow boundary is allowed, please create another page object for the element \"{}\"",
                name
            ),
            format!(
                "remove \"shadow\" under element \"{}\" and create separate page object for its content",
                name
            ),
            line,
        ));
    }
}
