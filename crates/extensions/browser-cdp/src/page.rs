//! Page session implementing [`BrowserPage`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use anysite_protocols::{BrowserError, BrowserPage};

use crate::client::CdpClient;
use crate::error::CdpError;
use crate::script;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A tab attached to a [`CdpClient`] in flattened mode.
pub struct CdpPage {
    client: Arc<CdpClient>,
    target_id: String,
    session_id: String,
    wait_timeout: Duration,
}

impl CdpPage {
    pub(crate) fn new(
        client: Arc<CdpClient>,
        target_id: String,
        session_id: String,
        wait_timeout: Duration,
    ) -> Self {
        Self {
            client,
            target_id,
            session_id,
            wait_timeout,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.client.call(method, params, Some(&self.session_id)).await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = Instant::now();
        loop {
            match self.evaluate(script::READY_STATE).await {
                Ok(state) if matches!(state.as_str(), Some("complete" | "interactive")) => {
                    return Ok(());
                }
                // The old execution context goes away mid-navigation.
                Ok(_) | Err(CdpError::JavaScript(_) | CdpError::Protocol { .. }) => {}
                Err(e) => return Err(e),
            }
            if start.elapsed() > self.wait_timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn expect_match(&self, expression: String, selector: &str) -> Result<(), CdpError> {
        match self.evaluate(&expression).await? {
            Value::Bool(true) => Ok(()),
            _ => Err(CdpError::ElementNotFound(selector.to_string())),
        }
    }
}

#[async_trait]
impl BrowserPage for CdpPage {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await
            .map_err(|e| match e {
                CdpError::Protocol { message, .. } => {
                    BrowserError::NavigationFailed(format!("{}: {}", url, message))
                }
                other => other.into(),
            })?;

        if let Some(error) = result.get("errorText").and_then(Value::as_str) {
            return Err(BrowserError::NavigationFailed(format!("{}: {}", url, error)));
        }

        self.wait_for_load().await?;
        debug!("Navigated to {}", url);
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.expect_match(script::fill(selector, value), selector).await?;
        debug!("Filled {}", selector);
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.expect_match(script::click(selector), selector).await?;
        debug!("Clicked {}", selector);
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        let expression = script::exists(selector);
        let start = Instant::now();
        loop {
            match self.evaluate(&expression).await {
                Ok(Value::Bool(true)) => return Ok(()),
                Ok(_) | Err(CdpError::JavaScript(_) | CdpError::Protocol { .. }) => {}
                Err(e) => return Err(e.into()),
            }
            if start.elapsed() > self.wait_timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for selector '{}' timed out after {}ms",
                    selector,
                    self.wait_timeout.as_millis()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn text_content(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let value = self.evaluate(&script::text_content(selector)).await?;
        if value["found"] != Value::Bool(true) {
            return Err(BrowserError::ElementNotFound(selector.to_string()));
        }
        Ok(value["text"].as_str().map(str::to_string))
    }

    async fn url(&self) -> Result<String, BrowserError> {
        let value = self.evaluate(script::LOCATION_HREF).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}
