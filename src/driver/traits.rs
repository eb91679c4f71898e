//! Driver layer traits
//!
//! This module defines the abstract interface to a live rendered page. The
//! page abstraction is written entirely against [`BrowserDriver`], so the same
//! flow code runs over CDP or over the in-memory mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single element-matching expression
///
/// One entry in a selector fallback list. `TestId` matches a stable
/// `data-testid` attribute, `Css` is a structural CSS expression, and `Text`
/// matches elements by contained display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Match by `data-testid` attribute value
    TestId(String),
    /// Match by CSS expression
    Css(String),
    /// Match by contained display text
    Text(String),
}

impl Selector {
    /// Stable test-id selector
    pub fn test_id<S: Into<String>>(name: S) -> Self {
        Selector::TestId(name.into())
    }

    /// Structural CSS selector
    pub fn css<S: Into<String>>(expr: S) -> Self {
        Selector::Css(expr.into())
    }

    /// Display-text selector
    pub fn text<S: Into<String>>(text: S) -> Self {
        Selector::Text(text.into())
    }

    /// The CSS expression this selector queries with, where one exists
    pub fn as_css(&self) -> Option<String> {
        match self {
            Selector::TestId(name) => Some(format!("[data-testid=\"{}\"]", name)),
            Selector::Css(expr) => Some(expr.clone()),
            Selector::Text(_) => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::TestId(name) => write!(f, "test-id={}", name),
            Selector::Css(expr) => write!(f, "css={}", expr),
            Selector::Text(text) => write!(f, "text={}", text),
        }
    }
}

/// Browser cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: String,
}

/// Browser driver capability
///
/// The primitives the page abstraction consumes: navigation, element
/// querying, input simulation, and screenshots against a live rendered page.
/// One driver instance corresponds to one browser tab.
#[async_trait]
pub trait BrowserDriver: Send + Sync + fmt::Debug {
    /// Navigate to an absolute URL and wait for the load to settle
    async fn navigate(&self, url: &str) -> Result<(), crate::Error>;

    /// Current navigable location
    async fn current_url(&self) -> Result<String, crate::Error>;

    /// Whether the selector matches any element right now
    async fn exists(&self, selector: &Selector) -> Result<bool, crate::Error>;

    /// Whether the selector matches a visible element right now
    async fn is_visible(&self, selector: &Selector) -> Result<bool, crate::Error>;

    /// Set the value of the matched input and fire its input event
    async fn fill(&self, selector: &Selector, value: &str) -> Result<(), crate::Error>;

    /// Dispatch a click on the matched element
    async fn click(&self, selector: &Selector) -> Result<(), crate::Error>;

    /// Text content of the matched element
    async fn text_content(&self, selector: &Selector) -> Result<String, crate::Error>;

    /// Attribute value of the matched element, `None` when absent
    async fn get_attribute(
        &self,
        selector: &Selector,
        name: &str,
    ) -> Result<Option<String>, crate::Error>;

    /// Hover over the matched element
    async fn hover(&self, selector: &Selector) -> Result<(), crate::Error>;

    /// Focus the matched element
    async fn focus(&self, selector: &Selector) -> Result<(), crate::Error>;

    /// Dispatch a key event at the current focus (e.g. "Enter", "Tab")
    async fn press_key(&self, key: &str) -> Result<(), crate::Error>;

    /// Capture a full-page PNG screenshot
    async fn screenshot(&self) -> Result<Vec<u8>, crate::Error>;

    /// Set the viewport size
    async fn set_viewport(&self, width: u32, height: u32) -> Result<(), crate::Error>;

    /// All cookies visible to the current page
    async fn cookies(&self) -> Result<Vec<Cookie>, crate::Error>;

    /// Close the tab
    async fn close(&self) -> Result<(), crate::Error>;

    /// Whether the driver is still usable
    fn is_active(&self) -> bool;
}
