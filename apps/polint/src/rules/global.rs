//! Rules evaluated across an unordered pair of page objects.
//!
//! The orchestrator calls these with `first` registered before `second`.
//! Each offending pair reports on its own; nothing is suppressed after the
//! first hit, so N page objects sharing one root selector yield N·(N-1)/2
//! findings.

use super::{ActiveRule, RuleId};
use crate::models::page_object::PageObjectLintingModel;
use crate::models::Finding;
use crate::selector::same_selector;
use crate::source::{name_fragment, quoted, SourceLines};

pub(super) fn check(
    rule: &ActiveRule,
    first: &PageObjectLintingModel,
    second: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    match rule.rule {
        RuleId::UniqueRootSelector => unique_root_selector(rule, first, second, lines, out),
        RuleId::RootSelectorImpliesType => {
            root_selector_implies_type(rule, first, second, lines, out);
            root_selector_implies_type(rule, second, first, lines, out);
        }
        RuleId::ElementsWithDifferentTypes => {
            elements_with_different_types(rule, first, second, lines, out)
        }
        RuleId::DuplicateSelector
        | RuleId::RequiredRootDescription
        | RuleId::RequiredAuthor
        | RuleId::RequiredMethodDescription
        | RuleId::SingleShadowBoundary => {}
    }
}

fn unique_root_selector(
    rule: &ActiveRule,
    first: &PageObjectLintingModel,
    second: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    let (Some(a), Some(b)) = (
        first.root.as_ref().and_then(|r| r.locator()),
        second.root.as_ref().and_then(|r| r.locator()),
    ) else {
        return;
    };
    if !same_selector(Some(a), Some(b)) {
        return;
    }
    let message = format!(
        "same root selector \"{}\" is used as a root selector in the page object {}",
        a, second.source_path
    );
    let fix = format!(
        "remove one of the page objects with same root selector: \"{}\" or \"{}\"",
        first.source_path, second.source_path
    );
    let line = lines.find_line(&first.source_path, &[&quoted(a.as_str())]);
    out.push(rule.finding(first, Some(second), message, fix, line));
}

/// Elements of `other` that reuse the root selector of `owner` must be typed
/// as `owner`.
fn root_selector_implies_type(
    rule: &ActiveRule,
    owner: &PageObjectLintingModel,
    other: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    let Some(root_locator) = owner.root.as_ref().and_then(|r| r.locator()) else {
        return;
    };
    for element in &other.elements {
        if !element.has_same_selector(Some(root_locator))
            || element.type_name() == owner.type_full_name
        {
            continue;
        }
        let message = format!(
            "element \"{}\" should have type \"{}\" because it uses its root selector",
            element.name, owner.type_full_name
        );
        let fix = format!(
            "change the element \"{}\" type to the type of the page object \"{}\"",
            element.name, owner.type_full_name
        );
        let line = lines.find_line(&other.source_path, &[&name_fragment(&element.name)]);
        out.push(rule.finding(other, Some(owner), message, fix, line));
    }
}

/// A selector used for a custom component in one page object must not be
/// used for an element of another type in the other page object.
fn elements_with_different_types(
    rule: &ActiveRule,
    first: &PageObjectLintingModel,
    second: &PageObjectLintingModel,
    lines: &dyn SourceLines,
    out: &mut Vec<Finding>,
) {
    for a in &first.elements {
        for b in &second.elements {
            if !(a.is_custom() || b.is_custom()) || a.type_name() == b.type_name() {
                continue;
            }
            if a.selector.is_none() || b.selector.is_none() || a.selector_str() != b.selector_str() {
                continue;
            }
            let message = format!(
                "custom selector \"{}\" of the element \"{}\" is used for an element \"{}\" in the page object {}, but has a different type \"{}\"",
                b.selector_str(),
                b.name,
                a.name,
                second.source_path,
                b.type_name()
            );
            let fix = format!(
                "change the element \"{}\" type to the same type as the element \"{}\" in page object \"{}\"",
                b.name, a.name, second.source_path
            );
            let line = lines.find_line(&second.source_path, &[&name_fragment(&b.name)]);
            out.push(rule.finding(second, Some(first), message, fix, line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::page_object::{
        ElementFact, ElementScope, ElementSelector, RootFact, BASIC_TYPE, CONTAINER_TYPE,
        ROOT_ELEMENT_NAME,
    };
    use crate::selector::Locator;
    use crate::source::NoSourceLines;

    fn page(path: &str, ty: &str) -> PageObjectLintingModel {
        PageObjectLintingModel::new(path.rsplit('/').next().unwrap_or(path), path, ty)
    }

    fn rooted(path: &str, ty: &str, root_selector: &str) -> PageObjectLintingModel {
        let mut p = page(path, ty);
        p.set_root(RootFact::new(true, true, Some(Locator::css(root_selector))));
        p
    }

    fn element(name: &str, ty: &str, selector: &str) -> ElementFact {
        ElementFact::new(
            name,
            ty,
            Some(ElementSelector::new(Locator::css(selector), false)),
            Some(ElementScope {
                parent_name: Some(ROOT_ELEMENT_NAME.into()),
                is_inside_shadow: false,
            }),
        )
    }

    fn run(rule: RuleId, first: &PageObjectLintingModel, second: &PageObjectLintingModel) -> Vec<Finding> {
        let mut out = Vec::new();
        ActiveRule::new(rule).check_global(first, second, &NoSourceLines, &mut out);
        out
    }

    #[test]
    fn test_unique_root_selector_names_both_paths() {
        let one = rooted("test/lint/rootSelectors/one", "a.One", "root-selector");
        let two = rooted("test/lint/rootSelectors/two", "a.Two", "root-selector");
        let found = run(RuleId::UniqueRootSelector, &one, &two);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].full_message(),
            "lint rule ULR06 failure in page object test/lint/rootSelectors/one: warning 3001: \
             same root selector \"root-selector\" is used as a root selector in the page object test/lint/rootSelectors/two; \
             remove one of the page objects with same root selector: \"test/lint/rootSelectors/one\" or \"test/lint/rootSelectors/two\""
        );
        assert_eq!(
            found[0].related_page_object.as_deref(),
            Some("test/lint/rootSelectors/two")
        );
        let other = rooted("x", "a.X", "other-root");
        assert!(run(RuleId::UniqueRootSelector, &one, &other).is_empty());
        assert!(run(RuleId::UniqueRootSelector, &one, &page("y", "a.Y")).is_empty());
    }

    #[test]
    fn test_element_using_root_selector_must_share_type() {
        let root = rooted("test/lint/rootType/root", "test.lint.roottype.Root", "root-type");
        let mut elements = page("test/lint/rootType/elements", "test.lint.roottype.Elements");
        elements.add_element(element("customSameType", "test.lint.roottype.Root", "root-type"));
        elements.add_element(element("customDifferentType", "test.lint.roottype.Other", "root-type"));
        elements.add_element(element("unrelated", BASIC_TYPE, ".x"));
        let found = run(RuleId::RootSelectorImpliesType, &root, &elements);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].full_message(),
            "lint rule ULR07 failure in page object test/lint/rootType/elements: warning 3002: \
             element \"customDifferentType\" should have type \"test.lint.roottype.Root\" because it uses its root selector; \
             change the element \"customDifferentType\" type to the type of the page object \"test.lint.roottype.Root\""
        );
        // checked in both directions
        let reversed = run(RuleId::RootSelectorImpliesType, &elements, &root);
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0].page_object, "test/lint/rootType/elements");
    }

    #[test]
    fn test_basic_and_custom_types_violation() {
        let mut basic = page("test/lint/elementTypes/basicType", "a.Basic");
        basic.add_element(element("basic", BASIC_TYPE, "my-test-custom"));
        let mut custom = page("test/lint/elementTypes/customType", "a.Custom");
        custom.add_element(element("test", "my.test.Custom", "my-test-custom"));
        let found = run(RuleId::ElementsWithDifferentTypes, &basic, &custom);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].full_message(),
            "lint rule ULR08 failure in page object test/lint/elementTypes/customType: warning 3003: \
             custom selector \"my-test-custom\" of the element \"test\" is used for an element \"basic\" in the page object test/lint/elementTypes/customType, but has a different type \"my.test.Custom\"; \
             change the element \"test\" type to the same type as the element \"basic\" in page object \"test/lint/elementTypes/customType\""
        );
    }

    #[test]
    fn test_container_and_custom_type_violation() {
        let mut custom = page("test/lint/elementTypes/customType", "a.Custom");
        custom.add_element(element("test", "my.test.Custom", "my-test-custom"));
        let mut container = page("test/lint/elementTypes/containerType", "a.Container");
        container.add_element(element("container", CONTAINER_TYPE, "my-test-custom"));
        let found = run(RuleId::ElementsWithDifferentTypes, &custom, &container);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "custom selector \"my-test-custom\" of the element \"container\" is used for an element \"test\" in the page object test/lint/elementTypes/containerType, but has a different type \"container\""
        );
    }

    #[test]
    fn test_same_custom_type_or_two_basics_produce_nothing() {
        let mut one = page("one", "a.One");
        one.add_element(element("test", "my.test.Custom", "my-test-custom"));
        one.add_element(element("plain", BASIC_TYPE, ".plain"));
        let mut two = page("two", "a.Two");
        two.add_element(element("another", "my.test.Custom", "my-test-custom"));
        two.add_element(element("plain", BASIC_TYPE, ".plain"));
        assert!(run(RuleId::ElementsWithDifferentTypes, &one, &two).is_empty());
    }
}
