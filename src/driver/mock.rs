//! Mock driver implementation for testing
//!
//! An in-memory page model implementing [`BrowserDriver`]. Tests register
//! elements together with the selector expressions they answer to, and attach
//! click effects that mutate the page state (navigate, reveal an element,
//! record a submit), so flow operations can be exercised without a browser.

use super::traits::{BrowserDriver, Cookie, Selector};
use crate::Error;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Effect run against the page state when an element is clicked
pub type ClickEffect = Arc<dyn Fn(&mut MockState) + Send + Sync>;

/// One element of the mock page
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Selector expressions this element answers to
    selectors: Vec<Selector>,
    /// Whether the element is currently visible
    visible: bool,
    /// Text content
    text: String,
    /// Attributes
    attributes: HashMap<String, String>,
    /// Last filled value
    value: Option<String>,
}

impl MockElement {
    /// Create a visible element answering to the given expressions
    pub fn new<I: IntoIterator<Item = Selector>>(selectors: I) -> Self {
        Self {
            selectors: selectors.into_iter().collect(),
            visible: true,
            text: String::new(),
            attributes: HashMap::new(),
            value: None,
        }
    }

    /// Set the text content
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute
    pub fn attribute<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Mark the element hidden
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        self.selectors.contains(selector)
    }
}

/// Mutable page state shared with click effects
#[derive(Debug, Default)]
pub struct MockState {
    /// Current location
    pub url: String,
    /// Registered elements
    pub elements: Vec<MockElement>,
    /// Keys pressed at document focus
    pub pressed_keys: Vec<String>,
    /// Number of screenshots captured
    pub screenshots: usize,
    /// Current viewport
    pub viewport: (u32, u32),
    /// Page cookies
    pub cookies: Vec<Cookie>,
}

impl MockState {
    /// First element matching the selector
    pub fn element(&self, selector: &Selector) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.matches(selector))
    }

    /// First element matching the selector, mutably
    pub fn element_mut(&mut self, selector: &Selector) -> Option<&mut MockElement> {
        self.elements.iter_mut().find(|e| e.matches(selector))
    }

    /// Reveal the element matching the selector
    pub fn show(&mut self, selector: &Selector) {
        if let Some(element) = self.element_mut(selector) {
            element.visible = true;
        }
    }

    /// Hide the element matching the selector
    pub fn hide(&mut self, selector: &Selector) {
        if let Some(element) = self.element_mut(selector) {
            element.visible = false;
        }
    }

    /// Set an attribute on the element matching the selector
    pub fn set_attribute(&mut self, selector: &Selector, name: &str, value: &str) {
        if let Some(element) = self.element_mut(selector) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    /// Last value filled into the element matching the selector
    pub fn filled_value(&self, selector: &Selector) -> Option<String> {
        self.element(selector).and_then(|e| e.value.clone())
    }
}

/// In-memory mock page driver
pub struct MockDriver {
    id: String,
    state: Arc<Mutex<MockState>>,
    click_effects: Mutex<HashMap<Selector, ClickEffect>>,
    is_active: AtomicBool,
}

impl fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDriver")
            .field("id", &self.id)
            .field("is_active", &self.is_active.load(Ordering::Relaxed))
            .finish()
    }
}

impl MockDriver {
    /// Create an empty mock page at about:blank
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            state: Arc::new(Mutex::new(MockState {
                url: "about:blank".to_string(),
                viewport: (1920, 1080),
                ..MockState::default()
            })),
            click_effects: Mutex::new(HashMap::new()),
            is_active: AtomicBool::new(true),
        }
    }

    /// Register an element
    pub fn add_element(&self, element: MockElement) {
        self.state.lock().unwrap().elements.push(element);
    }

    /// Attach an effect to clicks on the given selector expression
    pub fn on_click<F>(&self, selector: Selector, effect: F)
    where
        F: Fn(&mut MockState) + Send + Sync + 'static,
    {
        self.click_effects
            .lock()
            .unwrap()
            .insert(selector, Arc::new(effect));
    }

    /// Inspect or mutate the page state directly
    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    fn locate(&self, selector: &Selector) -> Result<MockElement, Error> {
        self.state
            .lock()
            .unwrap()
            .element(selector)
            .cloned()
            .ok_or_else(|| Error::element_not_found(selector.to_string()))
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&self, url: &str) -> Result<(), Error> {
        self.state.lock().unwrap().url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String, Error> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn exists(&self, selector: &Selector) -> Result<bool, Error> {
        Ok(self.state.lock().unwrap().element(selector).is_some())
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool, Error> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .element(selector)
            .is_some_and(|e| e.visible))
    }

    async fn fill(&self, selector: &Selector, value: &str) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        match state.element_mut(selector) {
            Some(element) => {
                element.value = Some(value.to_string());
                Ok(())
            }
            None => Err(Error::element_not_found(selector.to_string())),
        }
    }

    async fn click(&self, selector: &Selector) -> Result<(), Error> {
        self.locate(selector)?;

        let effect = self.click_effects.lock().unwrap().get(selector).cloned();
        if let Some(effect) = effect {
            effect(&mut self.state.lock().unwrap());
        }

        Ok(())
    }

    async fn text_content(&self, selector: &Selector) -> Result<String, Error> {
        Ok(self.locate(selector)?.text)
    }

    async fn get_attribute(
        &self,
        selector: &Selector,
        name: &str,
    ) -> Result<Option<String>, Error> {
        Ok(self.locate(selector)?.attributes.get(name).cloned())
    }

    async fn hover(&self, selector: &Selector) -> Result<(), Error> {
        self.locate(selector)?;
        Ok(())
    }

    async fn focus(&self, selector: &Selector) -> Result<(), Error> {
        self.locate(selector)?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), Error> {
        self.state.lock().unwrap().pressed_keys.push(key.to_string());
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, Error> {
        self.state.lock().unwrap().screenshots += 1;

        // Minimal PNG header, enough for "a PNG file was produced"
        Ok(vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00,
            0x00, 0x90, 0x77, 0x53, 0xDE,
        ])
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<(), Error> {
        self.state.lock().unwrap().viewport = (width, height);
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<Cookie>, Error> {
        Ok(self.state.lock().unwrap().cookies.clone())
    }

    async fn close(&self) -> Result<(), Error> {
        self.is_active.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }
}
