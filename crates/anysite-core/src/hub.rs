//! Registry of connected sites.
//!
//! An [`IntegrationHub`] is an ordinary value: create one, share it by
//! reference (or `Arc`) with whatever needs it, and drop it when done.
//! Entries live exactly as long as the hub.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use anysite_protocols::browser::BrowserLauncher;
use anysite_protocols::discovery::{DiscoveredVia, DiscoveryResult};
use anysite_protocols::error::{DiscoveryError, ExecutorError};
use anysite_protocols::fetch::Fetcher;
use anysite_protocols::tool::{Args, ToolDefinition, ToolOutput, Transport};

use crate::discovery::{DiscoverOptions, DiscoveryPipeline, LlmEnricher};
use crate::executor::{BrowserExecutor, HttpExecutor};

/// Default upper bound for one discovery run.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(60);

/// A site to connect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Overrides the per-call `skip_llm` option when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_llm: Option<bool>,
}

impl IntegrationConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: None,
            skip_llm: None,
        }
    }

    pub fn with_skip_llm(mut self, skip_llm: bool) -> Self {
        self.skip_llm = Some(skip_llm);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Error,
}

/// Outcome of connecting a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationEntry {
    pub config: IntegrationConfig,
    pub tools: Vec<ToolDefinition>,
    pub connected_at: DateTime<Utc>,
    pub status: IntegrationStatus,
    /// Strategy that produced the tools; unset for failed entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_via: Option<DiscoveredVia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntegrationEntry {
    fn connected(config: IntegrationConfig, result: DiscoveryResult) -> Self {
        Self {
            config,
            tools: result.tools,
            connected_at: Utc::now(),
            status: IntegrationStatus::Connected,
            discovered_via: Some(result.discovered_via),
            error: None,
        }
    }

    fn failed(config: IntegrationConfig, error: String) -> Self {
        Self {
            config,
            tools: Vec::new(),
            connected_at: Utc::now(),
            status: IntegrationStatus::Error,
            discovered_via: None,
            error: Some(error),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == IntegrationStatus::Connected
    }
}

#[derive(Debug, Error)]
pub enum HubError {
    #[error("No integration named \"{name}\". Connected: {available}")]
    IntegrationNotFound { name: String, available: String },

    #[error("Tool \"{tool}\" not found in \"{integration}\". Available: {available}")]
    ToolNotFound {
        integration: String,
        tool: String,
        available: String,
    },

    #[error("Tool \"{0}\" needs a browser but none is configured")]
    BrowserUnavailable(String),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

fn names_or_none(names: Vec<String>) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// Connects sites, keeps their tools and dispatches tool calls.
pub struct IntegrationHub {
    pipeline: DiscoveryPipeline,
    http: HttpExecutor,
    browser: Option<BrowserExecutor>,
    timeout: Duration,
    entries: DashMap<String, IntegrationEntry>,
}

impl IntegrationHub {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            pipeline: DiscoveryPipeline::new(fetcher.clone()),
            http: HttpExecutor::new(fetcher),
            browser: None,
            timeout: DEFAULT_DISCOVERY_TIMEOUT,
            entries: DashMap::new(),
        }
    }

    pub fn with_enricher(mut self, enricher: LlmEnricher) -> Self {
        self.pipeline = self.pipeline.with_enricher(enricher);
        self
    }

    pub fn with_browser(mut self, launcher: Arc<dyn BrowserLauncher>) -> Self {
        self.browser = Some(BrowserExecutor::new(launcher));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Discover the tools of a site and record the outcome.
    ///
    /// Discovery failures, including exceeding the timeout, are recorded as
    /// an entry with [`IntegrationStatus::Error`] rather than returned.
    /// Connecting a name again replaces the previous entry.
    pub async fn connect(
        &self,
        config: IntegrationConfig,
        options: &DiscoverOptions,
    ) -> IntegrationEntry {
        let mut options = options.clone();
        if let Some(skip_llm) = config.skip_llm {
            options.skip_llm = skip_llm;
        }

        let outcome =
            tokio::time::timeout(self.timeout, self.pipeline.discover(&config.url, &options)).await;

        let entry = match outcome {
            Ok(Ok(result)) => {
                info!(
                    "Connected {} with {} tool(s) via {}",
                    config.name,
                    result.tools.len(),
                    result.discovered_via.as_str()
                );
                IntegrationEntry::connected(config, result)
            }
            Ok(Err(e)) => {
                warn!("Failed to connect {}: {}", config.name, e);
                IntegrationEntry::failed(config, e.to_string())
            }
            Err(_) => {
                let e = DiscoveryError::Timeout(self.timeout.as_secs());
                warn!("Failed to connect {}: {}", config.name, e);
                IntegrationEntry::failed(config, e.to_string())
            }
        };

        self.entries.insert(entry.config.name.clone(), entry.clone());
        entry
    }

    /// Connect several sites concurrently.
    pub async fn connect_all(&self, configs: Vec<IntegrationConfig>) -> Vec<IntegrationEntry> {
        let options = DiscoverOptions::default();
        join_all(configs.into_iter().map(|config| self.connect(config, &options))).await
    }

    /// Run a tool of a connected site.
    pub async fn call(
        &self,
        integration: &str,
        tool_name: &str,
        args: &Args,
    ) -> Result<ToolOutput, HubError> {
        let tool = self.find_tool(integration, tool_name)?;

        let output = match tool.transport {
            Transport::Http => self.http.execute(&tool, args).await?,
            Transport::Browser => {
                let browser = self
                    .browser
                    .as_ref()
                    .ok_or_else(|| HubError::BrowserUnavailable(tool.name.clone()))?;
                browser.execute(&tool, args).await?
            }
        };
        Ok(output)
    }

    fn find_tool(&self, integration: &str, tool_name: &str) -> Result<ToolDefinition, HubError> {
        let entry = self
            .entries
            .get(integration)
            .ok_or_else(|| HubError::IntegrationNotFound {
                name: integration.to_string(),
                available: names_or_none(self.names()),
            })?;

        entry
            .tools
            .iter()
            .find(|t| t.name == tool_name)
            .cloned()
            .ok_or_else(|| HubError::ToolNotFound {
                integration: integration.to_string(),
                tool: tool_name.to_string(),
                available: names_or_none(entry.tools.iter().map(|t| t.name.clone()).collect()),
            })
    }

    /// Forget a site. Returns whether it was connected.
    pub fn disconnect(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<IntegrationEntry> {
        self.entries.get(name).map(|entry| entry.clone())
    }

    /// All entries, ordered by name.
    pub fn list(&self) -> Vec<IntegrationEntry> {
        let mut entries: Vec<IntegrationEntry> =
            self.entries.iter().map(|entry| entry.value().clone()).collect();
        entries.sort_by(|a, b| a.config.name.cmp(&b.config.name));
        entries
    }

    /// Tools of a site; empty when it is not connected.
    pub fn tools(&self, name: &str) -> Vec<ToolDefinition> {
        self.entries
            .get(name)
            .map(|entry| entry.tools.clone())
            .unwrap_or_default()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[path = "hub_tests.rs"]
mod tests;
