//! Locator model and the equivalence predicates shared by guardrails and lint.
//!
//! A `Locator` is opaque to the engine: two locators are the same only when
//! both the strategy and the raw value match. The string form (`value`) is
//! what messages print and what the empty-container sentinel is checked on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute fragments that hardcode visible text into a selector.
const FORBIDDEN_FRAGMENTS: [&str; 2] = ["[value", "[title"];

/// Marker for a parameter substituted at runtime.
const PARAMETER_MARKER: char = '%';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Selector strategy of a locator.
pub enum LocatorKind {
    #[default]
    Css,
    AccessId,
    ClassChain,
    UiAutomator,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Opaque selector value with its string rendering.
pub struct Locator {
    #[serde(default)]
    pub kind: LocatorKind,
    pub value: String,
}

impl Locator {
    pub fn new(kind: LocatorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(LocatorKind::Css, value)
    }

    /// String form used in messages and sentinel checks.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// True when the final value is only known after parameter substitution.
    pub fn is_parameterized(&self) -> bool {
        self.value.contains(PARAMETER_MARKER)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Compare two selectors for identity.
///
/// Absent locators (root without selector) and empty ones (containers) never
/// match anything, including themselves.
pub fn same_selector(a: Option<&Locator>, b: Option<&Locator>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.is_empty() && !b.is_empty() && a == b,
        _ => false,
    }
}

/// True when the selector hardcodes text through a value/title attribute.
///
/// Parameterized selectors are exempt: their final value is not known until
/// runtime.
pub fn has_forbidden_pattern(locator: Option<&Locator>) -> bool {
    let Some(locator) = locator else {
        return false;
    };
    let selector = locator.as_str();
    if FORBIDDEN_FRAGMENTS.iter().any(|f| selector.contains(f)) {
        return !locator.is_parameterized();
    }
    false
}
