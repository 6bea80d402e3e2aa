//! Compile-time guardrails over one descriptor's element graph.
//!
//! Every distinct ordered pair of elements is checked while the descriptor is
//! assembled. Any verdict other than `None` is fatal for that descriptor:
//! the generated code could not tell the two elements apart.
//!
//! Element graphs serialize as JSON objects tagged by `kind`, so a compiler
//! in another process can hand its graph over unchanged.
//!
//! Dispatch is on the first element's kind and matches exhaustively, so a new
//! kind cannot silently fall through to `None`.

use crate::error::GuardrailError;
use crate::selector::{has_forbidden_pattern, same_selector, Locator};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
/// Element variants known to the compiler.
pub enum ElementKind {
    /// Root of a page object; carries the type of the declaring page object.
    #[serde(rename_all = "camelCase")]
    Root { enclosing_page_object_type: String },
    Custom,
    Basic,
    /// No selector by design.
    Container,
    /// Reference sentinel, excluded from selector checks.
    Document,
    /// Reference sentinel, excluded from selector checks.
    #[serde(rename = "self")]
    SelfElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One element of the descriptor being compiled.
pub struct ElementNode {
    pub name: String,
    #[serde(default)]
    pub locator: Option<Locator>,
    pub declared_type: String,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementNode {
    pub fn new(
        name: impl Into<String>,
        kind: ElementKind,
        declared_type: impl Into<String>,
        locator: Option<Locator>,
    ) -> Self {
        Self {
            name: name.into(),
            locator,
            declared_type: declared_type.into(),
            kind,
        }
    }

    fn is_root(&self) -> bool {
        matches!(self.kind, ElementKind::Root { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Result of comparing an ordered pair of elements.
pub enum ValidationVerdict {
    None,
    DuplicateWithRootSelector,
    ComponentAndElementDuplicateSelector,
    ComponentsWithSameSelectorDifferentTypes,
}

impl ValidationVerdict {
    pub fn is_violation(self) -> bool {
        self != ValidationVerdict::None
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::None => "no conflict",
            Self::DuplicateWithRootSelector => "element has the same selector as the root",
            Self::ComponentAndElementDuplicateSelector => {
                "custom component and basic element have the same selector"
            }
            Self::ComponentsWithSameSelectorDifferentTypes => {
                "custom components have the same selector but different types"
            }
        };
        f.write_str(text)
    }
}

/// Compare `first` against `second`.
pub fn check(first: &ElementNode, second: &ElementNode) -> ValidationVerdict {
    match &first.kind {
        ElementKind::SelfElement | ElementKind::Document | ElementKind::Container => {
            ValidationVerdict::None
        }
        ElementKind::Root {
            enclosing_page_object_type,
        } => check_root(first, enclosing_page_object_type, second),
        ElementKind::Custom => check_custom(first, second),
        ElementKind::Basic => check_basic(first, second),
    }
}

/// A custom element typed as the page itself, or a reference to the page's
/// own root, re-exposes the root rather than duplicating it.
fn is_same_enclosing_type(enclosing_type: &str, element: &ElementNode) -> bool {
    match &element.kind {
        ElementKind::Custom => element.declared_type == enclosing_type,
        ElementKind::Root {
            enclosing_page_object_type,
        } => enclosing_page_object_type == enclosing_type,
        _ => false,
    }
}

fn check_root(root: &ElementNode, enclosing_type: &str, element: &ElementNode) -> ValidationVerdict {
    if is_same_enclosing_type(enclosing_type, element) {
        return ValidationVerdict::None;
    }
    if same_selector(root.locator.as_ref(), element.locator.as_ref()) {
        return ValidationVerdict::DuplicateWithRootSelector;
    }
    ValidationVerdict::None
}

fn check_custom(custom: &ElementNode, element: &ElementNode) -> ValidationVerdict {
    let same = same_selector(custom.locator.as_ref(), element.locator.as_ref());
    match &element.kind {
        // the declared root is also a plain element, so it goes first
        ElementKind::Root {
            enclosing_page_object_type,
        } => {
            if custom.declared_type == *enclosing_page_object_type {
                ValidationVerdict::None
            } else if same {
                ValidationVerdict::DuplicateWithRootSelector
            } else {
                ValidationVerdict::None
            }
        }
        ElementKind::Basic if same => ValidationVerdict::ComponentAndElementDuplicateSelector,
        ElementKind::Custom if same && custom.declared_type != element.declared_type => {
            ValidationVerdict::ComponentsWithSameSelectorDifferentTypes
        }
        _ => ValidationVerdict::None,
    }
}

fn check_basic(basic: &ElementNode, element: &ElementNode) -> ValidationVerdict {
    if !same_selector(basic.locator.as_ref(), element.locator.as_ref()) {
        return ValidationVerdict::None;
    }
    match element.kind {
        ElementKind::Root { .. } => ValidationVerdict::DuplicateWithRootSelector,
        ElementKind::Custom => ValidationVerdict::ComponentAndElementDuplicateSelector,
        _ => ValidationVerdict::None,
    }
}

/// Reject selectors that hardcode visible text.
pub fn check_hardcoded_text(descriptor: &str, element: &ElementNode) -> Result<(), GuardrailError> {
    let checked = element.is_root()
        || matches!(element.kind, ElementKind::Custom | ElementKind::Basic);
    if checked && has_forbidden_pattern(element.locator.as_ref()) {
        return Err(GuardrailError::HardcodedText {
            descriptor: descriptor.to_string(),
            element: element.name.clone(),
            selector: element
                .locator
                .as_ref()
                .map(|l| l.value.clone())
                .unwrap_or_default(),
        });
    }
    Ok(())
}

/// Validate every element and every distinct ordered pair of `elements`.
///
/// Stops at the first violation; guardrail failures are never downgraded.
pub fn validate_elements(descriptor: &str, elements: &[ElementNode]) -> Result<(), GuardrailError> {
    for element in elements {
        check_hardcoded_text(descriptor, element)?;
    }
    for (i, first) in elements.iter().enumerate() {
        for (j, second) in elements.iter().enumerate() {
            if i == j {
                continue;
            }
            let verdict = check(first, second);
            if verdict.is_violation() {
                tracing::debug!(descriptor, first = %first.name, second = %second.name, ?verdict, "guardrail violation");
                return Err(GuardrailError::Conflict {
                    descriptor: descriptor.to_string(),
                    verdict,
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "my.pages.Page";

    fn root(selector: Option<&str>) -> ElementNode {
        ElementNode::new(
            "root",
            ElementKind::Root {
                enclosing_page_object_type: PAGE.into(),
            },
            PAGE,
            selector.map(Locator::css),
        )
    }

    fn basic(name: &str, selector: &str) -> ElementNode {
        ElementNode::new(name, ElementKind::Basic, "basic", Some(Locator::css(selector)))
    }

    fn custom(name: &str, ty: &str, selector: &str) -> ElementNode {
        ElementNode::new(name, ElementKind::Custom, ty, Some(Locator::css(selector)))
    }

    fn sentinels() -> Vec<ElementNode> {
        vec![
            ElementNode::new("container", ElementKind::Container, "container", Some(Locator::css(""))),
            ElementNode::new("document", ElementKind::Document, "document", None),
            ElementNode::new("self", ElementKind::SelfElement, PAGE, None),
            ElementNode::new("noSelector", ElementKind::Basic, "basic", None),
            basic("emptySelector", ""),
        ]
    }

    #[test]
    fn test_sentinels_never_conflict_on_either_side() {
        let real = vec![
            root(Some(".x")),
            basic("b", ".x"),
            custom("c", "my.Other", ".x"),
        ];
        for s in sentinels() {
            for r in &real {
                assert_eq!(check(&s, r), ValidationVerdict::None, "{} vs {}", s.name, r.name);
                assert_eq!(check(r, &s), ValidationVerdict::None, "{} vs {}", r.name, s.name);
            }
        }
    }

    #[test]
    fn test_root_first() {
        let r = root(Some(".x"));
        assert_eq!(
            check(&r, &basic("b", ".x")),
            ValidationVerdict::DuplicateWithRootSelector
        );
        assert_eq!(
            check(&r, &custom("c", "my.Other", ".x")),
            ValidationVerdict::DuplicateWithRootSelector
        );
        assert_eq!(check(&r, &basic("b", ".y")), ValidationVerdict::None);
        // custom element typed as the page itself is an alias of the root
        assert_eq!(check(&r, &custom("c", PAGE, ".x")), ValidationVerdict::None);
        // reference to the same root
        assert_eq!(check(&r, &root(Some(".x"))), ValidationVerdict::None);
        // root without selector
        assert_eq!(check(&root(None), &basic("b", ".x")), ValidationVerdict::None);
    }

    #[test]
    fn test_custom_first() {
        let c = custom("c", "my.Component", ".x");
        assert_eq!(
            check(&c, &root(Some(".x"))),
            ValidationVerdict::DuplicateWithRootSelector
        );
        assert_eq!(
            check(&custom("c", PAGE, ".x"), &root(Some(".x"))),
            ValidationVerdict::None
        );
        assert_eq!(
            check(&c, &basic("b", ".x")),
            ValidationVerdict::ComponentAndElementDuplicateSelector
        );
        assert_eq!(
            check(&c, &custom("d", "my.Other", ".x")),
            ValidationVerdict::ComponentsWithSameSelectorDifferentTypes
        );
        assert_eq!(
            check(&c, &custom("d", "my.Component", ".x")),
            ValidationVerdict::None
        );
        assert_eq!(check(&c, &basic("b", ".y")), ValidationVerdict::None);
    }

    #[test]
    fn test_basic_first() {
        let b = basic("b", ".x");
        assert_eq!(
            check(&b, &root(Some(".x"))),
            ValidationVerdict::DuplicateWithRootSelector
        );
        assert_eq!(
            check(&b, &custom("c", "my.Component", ".x")),
            ValidationVerdict::ComponentAndElementDuplicateSelector
        );
        // two basic elements are left to the lint layer
        assert_eq!(check(&b, &basic("b2", ".x")), ValidationVerdict::None);
    }

    #[test]
    fn test_validate_elements_reports_names() {
        let elements = vec![root(Some(".root")), basic("one", ".a"), basic("two", ".root")];
        let err = validate_elements("pages/page.json", &elements).unwrap_err();
        match err {
            GuardrailError::Conflict {
                descriptor,
                verdict,
                first,
                second,
            } => {
                assert_eq!(descriptor, "pages/page.json");
                assert_eq!(verdict, ValidationVerdict::DuplicateWithRootSelector);
                assert_eq!(first, "root");
                assert_eq!(second, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_elements_accepts_distinct_graph() {
        let elements = vec![
            root(Some(".root")),
            basic("one", ".a"),
            basic("two", ".a"),
            custom("three", "my.Component", "my-component"),
            ElementNode::new("self", ElementKind::SelfElement, PAGE, None),
        ];
        assert!(validate_elements("page", &elements).is_ok());
    }

    #[test]
    fn test_validate_elements_rejects_hardcoded_text() {
        let elements = vec![root(Some(".root")), basic("ok", "button[title='Save']")];
        let err = validate_elements("page", &elements).unwrap_err();
        assert!(matches!(err, GuardrailError::HardcodedText { ref element, .. } if element == "ok"));
        assert!(err.to_string().contains("button[title='Save']"));
    }

    #[test]
    fn test_element_node_deserializes_tagged_kind() {
        let node: ElementNode = serde_json::from_str(
            r#"{"name":"root","kind":"root","enclosingPageObjectType":"a.B","declaredType":"a.B","locator":{"value":".r"}}"#,
        )
        .unwrap();
        assert_eq!(
            node.kind,
            ElementKind::Root {
                enclosing_page_object_type: "a.B".into()
            }
        );
        let node: ElementNode =
            serde_json::from_str(r#"{"name":"me","kind":"self","declaredType":"a.B"}"#).unwrap();
        assert_eq!(node.kind, ElementKind::SelfElement);
    }

    #[test]
    fn test_json_element_graph_is_validated() {
        let graph: Vec<ElementNode> = serde_json::from_str(
            r#"[
  {"name":"root","kind":"root","enclosingPageObjectType":"a.Page","declaredType":"a.Page","locator":{"value":".page"}},
  {"name":"panel","kind":"custom","declaredType":"a.Panel","locator":{"value":".panel"}},
  {"name":"save","kind":"basic","declaredType":"basic","locator":{"value":".panel"}}
]"#,
        )
        .unwrap();
        let err = validate_elements("a/page.json", &graph).unwrap_err();
        match err {
            GuardrailError::Conflict {
                verdict,
                first,
                second,
                ..
            } => {
                assert_eq!(verdict, ValidationVerdict::ComponentAndElementDuplicateSelector);
                assert_eq!((first.as_str(), second.as_str()), ("panel", "save"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(validate_elements("a/page.json", &graph[..2]).is_ok());
    }
}
