//! Linting facts for one compiled descriptor.
//!
//! The compiler builds a `PageObjectLintingModel` after a descriptor passed
//! guardrails, appending elements, methods and shadow boundaries in
//! declaration order. Order matters: duplicate detection names elements by
//! their position.

use crate::selector::{same_selector, Locator};
use serde::{Deserialize, Serialize};

/// Type names that are not custom components.
pub const BASIC_TYPE: &str = "basic";
pub const CONTAINER_TYPE: &str = "container";
pub const FRAME_TYPE: &str = "frame";

/// Name under which the root element is registered.
pub const ROOT_ELEMENT_NAME: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Selector of an element plus its cardinality.
pub struct ElementSelector {
    pub locator: Locator,
    #[serde(default)]
    pub is_list: bool,
}

impl ElementSelector {
    pub fn new(locator: Locator, is_list: bool) -> Self {
        Self { locator, is_list }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Where an element is declared: its parent and whether it sits under a shadow root.
pub struct ElementScope {
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub is_inside_shadow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementFact {
    pub name: String,
    #[serde(default)]
    pub type_full_name: Option<String>,
    #[serde(default)]
    pub selector: Option<ElementSelector>,
    /// Absent only for the root element.
    #[serde(default)]
    pub scope: Option<ElementScope>,
}

impl ElementFact {
    pub fn new(
        name: impl Into<String>,
        type_full_name: impl Into<String>,
        selector: Option<ElementSelector>,
        scope: Option<ElementScope>,
    ) -> Self {
        Self {
            name: name.into(),
            type_full_name: Some(type_full_name.into()),
            selector,
            scope,
        }
    }

    pub fn locator(&self) -> Option<&Locator> {
        self.selector.as_ref().map(|s| &s.locator)
    }

    /// String form of the selector, empty when there is none.
    pub fn selector_str(&self) -> &str {
        self.locator().map(Locator::as_str).unwrap_or("")
    }

    pub fn type_name(&self) -> &str {
        self.type_full_name.as_deref().unwrap_or("")
    }

    pub fn is_custom(&self) -> bool {
        match self.type_full_name.as_deref() {
            Some(t) => ![BASIC_TYPE, CONTAINER_TYPE, FRAME_TYPE].contains(&t),
            None => false,
        }
    }

    /// Same raw locator and same cardinality.
    ///
    /// A list and a single element may share a selector; two lists or two
    /// single elements may not.
    pub fn is_same_locator(&self, other: &ElementFact) -> bool {
        match (&self.selector, &other.selector) {
            (Some(a), Some(b)) => a.locator == b.locator && a.is_list == b.is_list,
            _ => false,
        }
    }

    pub fn is_same_scope(&self, other: &ElementFact) -> bool {
        match (&self.scope, &other.scope) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.is_inside_shadow == b.is_inside_shadow && a.parent_name == b.parent_name
            }
            _ => false,
        }
    }

    /// Selector identity as the guardrails see it, ignoring cardinality.
    pub fn has_same_selector(&self, locator: Option<&Locator>) -> bool {
        same_selector(self.locator(), locator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodFact {
    pub name: String,
    #[serde(default)]
    pub has_description: bool,
}

impl MethodFact {
    pub fn new(name: impl Into<String>, has_description: bool) -> Self {
        Self {
            name: name.into(),
            has_description,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFact {
    #[serde(default)]
    pub has_description: bool,
    #[serde(default)]
    pub has_author: bool,
    /// Present when the page object is a root page object with a selector.
    #[serde(default)]
    pub selector: Option<ElementSelector>,
}

impl RootFact {
    pub fn new(has_description: bool, has_author: bool, selector: Option<Locator>) -> Self {
        Self {
            has_description,
            has_author,
            selector: selector.map(|l| ElementSelector::new(l, false)),
        }
    }

    /// Root as a selector-only element fact, used by cross-descriptor rules.
    pub fn root_element(&self) -> Option<ElementFact> {
        self.selector.as_ref().map(|s| ElementFact {
            name: ROOT_ELEMENT_NAME.to_string(),
            type_full_name: None,
            selector: Some(s.clone()),
            scope: None,
        })
    }

    pub fn locator(&self) -> Option<&Locator> {
        self.selector.as_ref().map(|s| &s.locator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Flattened projection of one compiled descriptor.
pub struct PageObjectLintingModel {
    pub name: String,
    pub source_path: String,
    pub type_full_name: String,
    #[serde(default)]
    pub elements: Vec<ElementFact>,
    #[serde(default)]
    pub methods: Vec<MethodFact>,
    /// Names of elements declaring a shadow boundary, in insertion order.
    #[serde(default)]
    pub shadow_boundaries: Vec<String>,
    #[serde(default)]
    pub root: Option<RootFact>,
}

impl PageObjectLintingModel {
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<String>,
        type_full_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            type_full_name: type_full_name.into(),
            elements: Vec::new(),
            methods: Vec::new(),
            shadow_boundaries: Vec::new(),
            root: None,
        }
    }

    pub fn add_element(&mut self, element: ElementFact) {
        self.elements.push(element);
    }

    pub fn add_method(&mut self, method: MethodFact) {
        self.methods.push(method);
    }

    /// Register a shadow boundary; repeated names are kept once.
    pub fn add_shadow_boundary(&mut self, element_name: impl Into<String>) {
        let name = element_name.into();
        if !self.shadow_boundaries.contains(&name) {
            self.shadow_boundaries.push(name);
        }
    }

    pub fn set_root(&mut self, root: RootFact) {
        self.root = Some(root);
    }

    /// Matches a rule exclusion entry against the name or the source path.
    pub fn matches(&self, name_or_path: &str) -> bool {
        self.name == name_or_path || self.source_path == name_or_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, selector: &str, is_list: bool) -> ElementFact {
        ElementFact::new(
            name,
            BASIC_TYPE,
            Some(ElementSelector::new(Locator::css(selector), is_list)),
            Some(ElementScope {
                parent_name: Some(ROOT_ELEMENT_NAME.into()),
                is_inside_shadow: false,
            }),
        )
    }

    #[test]
    fn test_locator_equivalence_is_list_aware() {
        assert!(element("a", "css", true).is_same_locator(&element("b", "css", true)));
        assert!(element("a", "css", false).is_same_locator(&element("b", "css", false)));
        assert!(!element("a", "css", true).is_same_locator(&element("b", "css", false)));
        assert!(!element("a", "css", false).is_same_locator(&element("b", "other", false)));
        let no_selector = ElementFact::new("c", BASIC_TYPE, None, None);
        assert!(!no_selector.is_same_locator(&element("b", "css", false)));
        assert!(!no_selector.is_same_locator(&no_selector));
    }

    #[test]
    fn test_scope_equivalence() {
        let a = element("a", "css", false);
        let mut b = element("b", "css", false);
        assert!(a.is_same_scope(&b));
        b.scope.as_mut().unwrap().is_inside_shadow = true;
        assert!(!a.is_same_scope(&b));
        b.scope = Some(ElementScope {
            parent_name: None,
            is_inside_shadow: false,
        });
        assert!(!a.is_same_scope(&b));
        let mut c = b.clone();
        assert!(b.is_same_scope(&c));
        c.scope = None;
        assert!(!b.is_same_scope(&c));
        assert!(c.is_same_scope(&c.clone()));
    }

    #[test]
    fn test_custom_type_detection() {
        assert!(!element("a", "css", false).is_custom());
        assert!(ElementFact::new("c", "my.Custom", None, None).is_custom());
        assert!(!ElementFact::new("f", FRAME_TYPE, None, None).is_custom());
        assert!(!ElementFact::new("k", CONTAINER_TYPE, None, None).is_custom());
    }

    #[test]
    fn test_shadow_boundaries_keep_insertion_order_once() {
        let mut model = PageObjectLintingModel::new("p", "p.json", "a.P");
        model.add_shadow_boundary("root");
        model.add_shadow_boundary("three");
        model.add_shadow_boundary("root");
        assert_eq!(model.shadow_boundaries, vec!["root", "three"]);
    }

    #[test]
    fn test_model_deserializes_with_defaults() {
        let model: PageObjectLintingModel = serde_json::from_str(
            r#"{
              "name": "login",
              "sourcePath": "pages/login.json",
              "typeFullName": "app.pages.Login",
              "elements": [
                {"name": "submit", "typeFullName": "basic",
                 "selector": {"locator": {"value": "button"}},
                 "scope": {"parentName": "root"}}
              ],
              "root": {"hasDescription": true, "selector": {"locator": {"value": "login-form"}}}
            }"#,
        )
        .unwrap();
        assert_eq!(model.elements.len(), 1);
        assert!(model.methods.is_empty());
        let root = model.root.as_ref().unwrap();
        assert!(!root.has_author);
        assert_eq!(root.root_element().unwrap().selector_str(), "login-form");
    }
}
