//! Page session: the verb vocabulary over a browser driver
//!
//! One `PageSession` per active tab. Verbs either resolve a selector fallback
//! list and act on the first matching expression (partial verbs, typed
//! failures), or collapse every failure into a default (total verbs:
//! `is_visible`, `has_attribute`, `optional_text`), so flow code can probe
//! optional UI without exception handling.

use super::selector::FieldEntry;
use super::StepOutcome;
use crate::config::Config;
use crate::driver::{BrowserDriver, Selector};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Poll interval for visibility and optional-element waits
const POLL_INTERVAL: tokio::time::Duration = tokio::time::Duration::from_millis(100);

/// Bounded wait for optional flow steps (confirmation dialogs and the like)
const OPTIONAL_STEP_WAIT_MS: u64 = 1_000;

/// One page session per active browser tab
#[derive(Debug, Clone)]
pub struct PageSession {
    id: String,
    driver: Arc<dyn BrowserDriver>,
    config: Config,
}

impl PageSession {
    /// Create a session owning the given tab driver
    pub fn new(driver: Arc<dyn BrowserDriver>, config: Config) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            driver,
            config,
        }
    }

    /// Session id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The configuration this session was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying driver
    pub fn driver(&self) -> &Arc<dyn BrowserDriver> {
        &self.driver
    }

    /// Navigate to a path relative to the configured base URL
    #[instrument(skip(self))]
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let url = self.config.url_for(path);
        debug!(session = %self.id, "navigate: {}", url);
        self.driver.navigate(&url).await
    }

    /// Current navigable location
    pub async fn current_url(&self) -> Result<String> {
        self.driver.current_url().await
    }

    /// Resolve a fallback list: first expression matching the live document
    ///
    /// Expressions are tried in declared order with short-circuit on the first
    /// match; none matching is a `SelectorUnresolved` carrying the field name
    /// and every expression tried.
    pub async fn resolve<'a>(&self, entry: FieldEntry<'a>) -> Result<&'a Selector> {
        for selector in entry.selectors {
            if self.driver.exists(selector).await? {
                debug!(field = entry.field, "resolved to {}", selector);
                return Ok(selector);
            }
        }

        Err(Error::selector_unresolved(
            entry.field,
            entry.selectors.iter().map(|s| s.to_string()).collect(),
        ))
    }

    /// Wait until some expression of the entry matches a visible element
    ///
    /// Polls the whole fallback list every 100 ms until `timeout_ms` (the
    /// configured default when `None`), then fails with `Error::Timeout`.
    #[instrument(skip(self, entry), fields(field = entry.field))]
    pub async fn wait_for_visible<'a>(
        &self,
        entry: FieldEntry<'a>,
        timeout_ms: Option<u64>,
    ) -> Result<&'a Selector> {
        let timeout = timeout_ms.unwrap_or(self.config.default_timeout_ms);
        let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_millis(timeout);

        loop {
            for selector in entry.selectors {
                if self.driver.is_visible(selector).await? {
                    return Ok(selector);
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(Error::timeout(format!(
                    "'{}' not visible within {}ms",
                    entry.field, timeout
                )));
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Fill the field's input with a value
    pub async fn fill(&self, entry: FieldEntry<'_>, value: &str) -> Result<()> {
        let selector = self.resolve(entry).await?;
        self.driver.fill(selector, value).await
    }

    /// Click the field's element
    pub async fn click(&self, entry: FieldEntry<'_>) -> Result<()> {
        let selector = self.resolve(entry).await?;
        self.driver.click(selector).await
    }

    /// Text content of the field's element
    pub async fn read_text(&self, entry: FieldEntry<'_>) -> Result<String> {
        let selector = self.resolve(entry).await?;
        self.driver.text_content(selector).await
    }

    /// Attribute value of the field's element
    pub async fn attribute(&self, entry: FieldEntry<'_>, name: &str) -> Result<Option<String>> {
        let selector = self.resolve(entry).await?;
        self.driver.get_attribute(selector, name).await
    }

    /// Whether the field resolves to a visible element; never fails
    pub async fn is_visible(&self, entry: FieldEntry<'_>) -> bool {
        for selector in entry.selectors {
            if matches!(self.driver.is_visible(selector).await, Ok(true)) {
                return true;
            }
        }
        false
    }

    /// Whether the field's element carries the attribute; never fails
    pub async fn has_attribute(&self, entry: FieldEntry<'_>, name: &str) -> bool {
        let Ok(selector) = self.resolve(entry).await else {
            return false;
        };
        matches!(
            self.driver.get_attribute(selector, name).await,
            Ok(Some(_))
        )
    }

    /// Hover the field's element
    pub async fn hover(&self, entry: FieldEntry<'_>) -> Result<()> {
        let selector = self.resolve(entry).await?;
        self.driver.hover(selector).await
    }

    /// Focus the field's element
    pub async fn focus(&self, entry: FieldEntry<'_>) -> Result<()> {
        let selector = self.resolve(entry).await?;
        self.driver.focus(selector).await
    }

    /// Dispatch a key event at the current focus
    pub async fn press_key(&self, key: &str) -> Result<()> {
        self.driver.press_key(key).await
    }

    /// Capture a full-page screenshot into the configured directory
    ///
    /// Returns the written path. The file is `<screenshot_dir>/<name>.png`.
    #[instrument(skip(self))]
    pub async fn screenshot(&self, name: &str) -> Result<PathBuf> {
        let data = self.driver.screenshot().await?;

        tokio::fs::create_dir_all(&self.config.screenshot_dir).await?;
        let path = self.config.screenshot_dir.join(format!("{}.png", name));
        tokio::fs::write(&path, data).await?;

        debug!(session = %self.id, "screenshot written to {}", path.display());
        Ok(path)
    }

    /// Sleep the configured settle delay before classifying the location
    pub async fn settle(&self) {
        tokio::time::sleep(tokio::time::Duration::from_millis(self.config.settle_delay_ms)).await;
    }

    /// Text of an error-display element, or "" when none appears in time
    ///
    /// Waits up to `wait_ms` (the configured error wait when `None`) for the
    /// entry to become visible. Absence of an error is a valid outcome, so
    /// this is total: resolution and timeout failures both yield "".
    pub async fn optional_text(&self, entry: FieldEntry<'_>, wait_ms: Option<u64>) -> String {
        let wait = wait_ms.unwrap_or(self.config.error_wait_ms);

        match self.wait_for_visible(entry, Some(wait)).await {
            Ok(selector) => self
                .driver
                .text_content(selector)
                .await
                .unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    /// Click an optional element, reporting which branch ran
    ///
    /// `Ok(Handled)` when the element appeared and was clicked, `Ok(Skipped)`
    /// when it never appeared within the bounded wait, `Err` when it appeared
    /// but the click itself failed.
    pub async fn try_optional_click(&self, entry: FieldEntry<'_>) -> Result<StepOutcome> {
        match self
            .wait_for_visible(entry, Some(OPTIONAL_STEP_WAIT_MS))
            .await
        {
            Ok(selector) => {
                self.driver.click(selector).await?;
                Ok(StepOutcome::Handled)
            }
            Err(e) if e.is_resolution_failure() => Ok(StepOutcome::Skipped),
            Err(e) => Err(e),
        }
    }
}
