//! CDP-backed browser driver
//!
//! Implements [`BrowserDriver`] over a DevTools WebSocket target. Element
//! verbs compile the selector into a JavaScript expression evaluated through
//! `Runtime.evaluate`; navigation, screenshots, key input, and viewport go
//! through their dedicated CDP domains.

use super::connection::CdpConnection;
use super::scripts;
use super::traits::{BrowserDriver, Cookie, Selector};
use super::types::{EvaluateParams, EvaluateResponse, NavigateParams};
use crate::Error;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Poll interval and attempt cap for the post-navigation ready-state wait
const READY_POLL_INTERVAL: tokio::time::Duration = tokio::time::Duration::from_millis(100);
const READY_POLL_ATTEMPTS: u32 = 50;

/// Browser driver over Chrome DevTools Protocol
#[derive(Debug, Clone)]
pub struct CdpDriver {
    /// Connection to the page target
    connection: Arc<CdpConnection>,
    /// DevTools target id, used to close the tab
    target_id: String,
}

impl CdpDriver {
    /// Open a fresh tab on a running browser and attach to it
    ///
    /// # Arguments
    /// * `endpoint` - browser DevTools endpoint (e.g. "ws://localhost:9222")
    pub async fn open_tab(endpoint: &str) -> Result<Self, Error> {
        let http_endpoint = endpoint
            .replace("ws://", "http://")
            .replace("wss://", "https://");

        info!("Opening new tab via {}", http_endpoint);

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        // Chrome 111+ requires PUT for /json/new
        let target: serde_json::Value = client
            .put(format!("{}/json/new?about:blank", http_endpoint))
            .send()
            .await
            .map_err(|e| Error::internal(format!("Failed to create target: {}", e)))?
            .json()
            .await
            .map_err(|e| Error::internal(format!("Failed to parse target: {}", e)))?;

        let ws_url = target
            .get("webSocketDebuggerUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::cdp("Target has no webSocketDebuggerUrl"))?;
        let target_id = target
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let connection = CdpConnection::connect(ws_url).await?;
        connection.send_command("Page.enable", json!({})).await?;

        Ok(Self {
            connection,
            target_id,
        })
    }

    /// Attach to an existing page target by its WebSocket URL
    pub async fn attach(ws_url: &str) -> Result<Self, Error> {
        let connection = CdpConnection::connect(ws_url).await?;
        connection.send_command("Page.enable", json!({})).await?;

        Ok(Self {
            connection,
            target_id: String::new(),
        })
    }

    /// Evaluate an expression, returning its value (`None` for null/undefined)
    async fn evaluate(&self, expression: &str) -> Result<Option<serde_json::Value>, Error> {
        let params = EvaluateParams {
            expression: expression.to_string(),
            await_promise: Some(false),
            return_by_value: Some(true),
        };

        let result = self
            .connection
            .send_command("Runtime.evaluate", serde_json::to_value(params)?)
            .await?;

        let response: EvaluateResponse = serde_json::from_value(result)
            .map_err(|e| Error::cdp(format!("Failed to parse evaluate response: {}", e)))?;

        if let Some(exception) = response.exception_details {
            return Err(Error::cdp(format!(
                "Script threw: {}",
                exception
                    .get("exception")
                    .and_then(|e| e.get("description"))
                    .and_then(|d| d.as_str())
                    .unwrap_or("unknown error")
            )));
        }

        match response.result.r#type.as_str() {
            "undefined" | "null" => Ok(None),
            _ => Ok(response.result.value),
        }
    }

    /// Evaluate an element operation; `null` means the selector matched nothing
    async fn evaluate_on_element(
        &self,
        selector: &Selector,
        script: String,
    ) -> Result<serde_json::Value, Error> {
        match self.evaluate(&script).await? {
            Some(value) => Ok(value),
            None => Err(Error::element_not_found(selector.to_string())),
        }
    }

    /// Key event parameters for the small set of named keys the flows use
    fn key_params(key: &str) -> (String, i64, Option<String>) {
        match key {
            "Enter" => ("Enter".to_string(), 13, Some("\r".to_string())),
            "Tab" => ("Tab".to_string(), 9, None),
            "Escape" => ("Escape".to_string(), 27, None),
            other => {
                let code = other.chars().next().map(|c| c as i64).unwrap_or(0);
                (other.to_string(), code, Some(other.to_string()))
            }
        }
    }
}

#[async_trait]
impl BrowserDriver for CdpDriver {
    #[instrument(skip(self))]
    async fn navigate(&self, url: &str) -> Result<(), Error> {
        info!("Navigating to {}", url);

        let params = NavigateParams {
            url: url.to_string(),
        };

        let result = self
            .connection
            .send_command("Page.navigate", serde_json::to_value(params)?)
            .await
            .map_err(|e| Error::navigation(format!("{}: {}", url, e)))?;

        if let Some(error_text) = result.get("errorText").and_then(|v| v.as_str()) {
            if !error_text.is_empty() {
                return Err(Error::navigation(format!("{}: {}", url, error_text)));
            }
        }

        // Event-based load detection races the navigation; poll the document
        // ready state instead and proceed once the page settles.
        for attempt in 0..READY_POLL_ATTEMPTS {
            tokio::time::sleep(READY_POLL_INTERVAL).await;

            match self.evaluate(scripts::READY_STATE).await {
                Ok(Some(state)) if state.as_str() == Some("complete") => {
                    debug!("Page load complete after {} polls", attempt + 1);
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => debug!("Ready-state poll failed: {}", e),
            }
        }

        debug!("Ready-state polling exhausted, continuing anyway");
        Ok(())
    }

    async fn current_url(&self) -> Result<String, Error> {
        match self.evaluate(scripts::CURRENT_URL).await? {
            Some(value) => Ok(value.as_str().unwrap_or_default().to_string()),
            None => Ok(String::new()),
        }
    }

    async fn exists(&self, selector: &Selector) -> Result<bool, Error> {
        match self.evaluate(&scripts::exists(selector)).await? {
            Some(value) => Ok(value.as_bool().unwrap_or(false)),
            None => Ok(false),
        }
    }

    async fn is_visible(&self, selector: &Selector) -> Result<bool, Error> {
        match self.evaluate(&scripts::visible(selector)).await? {
            Some(value) => Ok(value.as_bool().unwrap_or(false)),
            None => Ok(false),
        }
    }

    #[instrument(skip(self, value))]
    async fn fill(&self, selector: &Selector, value: &str) -> Result<(), Error> {
        debug!("Filling {}", selector);
        self.evaluate_on_element(selector, scripts::fill(selector, value))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn click(&self, selector: &Selector) -> Result<(), Error> {
        debug!("Clicking {}", selector);
        self.evaluate_on_element(selector, scripts::click(selector))
            .await?;
        Ok(())
    }

    async fn text_content(&self, selector: &Selector) -> Result<String, Error> {
        let value = self
            .evaluate_on_element(selector, scripts::text_content(selector))
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn get_attribute(
        &self,
        selector: &Selector,
        name: &str,
    ) -> Result<Option<String>, Error> {
        let value = self
            .evaluate_on_element(selector, scripts::attribute(selector, name))
            .await?;

        Ok(value
            .get("value")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    async fn hover(&self, selector: &Selector) -> Result<(), Error> {
        self.evaluate_on_element(selector, scripts::hover(selector))
            .await?;
        Ok(())
    }

    async fn focus(&self, selector: &Selector) -> Result<(), Error> {
        self.evaluate_on_element(selector, scripts::focus(selector))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn press_key(&self, key: &str) -> Result<(), Error> {
        let (key_name, key_code, text) = Self::key_params(key);

        let mut down = json!({
            "type": "keyDown",
            "key": key_name,
            "windowsVirtualKeyCode": key_code,
            "nativeVirtualKeyCode": key_code,
        });
        if let Some(text) = &text {
            down["text"] = json!(text);
        }

        self.connection
            .send_command("Input.dispatchKeyEvent", down)
            .await?;
        self.connection
            .send_command(
                "Input.dispatchKeyEvent",
                json!({
                    "type": "keyUp",
                    "key": key_name,
                    "windowsVirtualKeyCode": key_code,
                    "nativeVirtualKeyCode": key_code,
                }),
            )
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn screenshot(&self) -> Result<Vec<u8>, Error> {
        let result = self
            .connection
            .send_command(
                "Page.captureScreenshot",
                json!({
                    "format": "png",
                    "captureBeyondViewport": true,
                }),
            )
            .await?;

        let data = result
            .get("data")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::cdp("No data in screenshot result"))?;

        BASE64
            .decode(data)
            .map_err(|e| Error::cdp(format!("Failed to decode screenshot: {}", e)))
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<(), Error> {
        self.connection
            .send_command(
                "Emulation.setDeviceMetricsOverride",
                json!({
                    "width": width,
                    "height": height,
                    "deviceScaleFactor": 1.0,
                    "mobile": false,
                }),
            )
            .await?;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<Cookie>, Error> {
        let result = self
            .connection
            .send_command("Network.getCookies", json!({}))
            .await?;

        let cookies = result
            .get("cookies")
            .cloned()
            .unwrap_or(serde_json::Value::Array(vec![]));

        Ok(serde_json::from_value(cookies)?)
    }

    async fn close(&self) -> Result<(), Error> {
        if !self.target_id.is_empty() {
            // Best effort: the tab may already be gone
            let _ = self
                .connection
                .send_command("Target.closeTarget", json!({ "targetId": self.target_id }))
                .await;
        }
        self.connection.close().await
    }

    fn is_active(&self) -> bool {
        self.connection.is_active()
    }
}
