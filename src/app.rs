//! Wiring from configuration to an [`IntegrationHub`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tracing::{info, warn};
use url::Url;

use anysite_browser_cdp::{CdpLauncher, LauncherConfig};
use anysite_config::{Config, ConfigLoader};
use anysite_core::{IntegrationHub, LlmEnricher, ReqwestFetcher};
use anysite_protocols::{Args, ToolDefinition, Transport};
use anysite_provider_anthropic::AnthropicProvider;

/// A hub built from configuration, plus whether enrichment is available.
pub(crate) struct App {
    pub hub: IntegrationHub,
    pub has_enricher: bool,
}

impl App {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fetcher = ReqwestFetcher::new(
            &config.network.user_agent,
            Duration::from_secs(config.network.timeout_seconds),
        )
        .context("failed to build HTTP client")?;

        let launcher = CdpLauncher::new(LauncherConfig {
            chrome_path: config
                .browser
                .chrome_path
                .as_deref()
                .map(|p| PathBuf::from(ConfigLoader::expand_path(p))),
            headless: config.browser.headless,
            launch_timeout: Duration::from_secs(config.browser.launch_timeout_seconds),
            wait_timeout: Duration::from_millis(config.browser.wait_timeout_ms),
        });

        let mut hub = IntegrationHub::new(Arc::new(fetcher))
            .with_browser(Arc::new(launcher))
            .with_timeout(Duration::from_secs(config.discovery.timeout_seconds));

        let has_enricher = match config.provider.resolve_api_key() {
            Some(api_key) => {
                let mut provider = AnthropicProvider::new(api_key)
                    .context("failed to build provider client")?
                    .with_default_model(&config.provider.model);
                if let Some(base_url) = &config.provider.base_url {
                    provider = provider.with_base_url(base_url);
                }
                let enricher = LlmEnricher::new(Arc::new(provider))
                    .with_model(&config.provider.model)
                    .with_max_tokens(config.provider.max_tokens)
                    .with_snippet_chars(config.discovery.snippet_chars);
                hub = hub.with_enricher(enricher);
                info!("LLM enrichment enabled (model {})", config.provider.model);
                true
            }
            None => false,
        };

        Ok(Self { hub, has_enricher })
    }

    /// Effective `skip_llm`: forced on when no provider is configured.
    pub fn skip_llm(&self, requested: bool) -> bool {
        if !requested && !self.has_enricher {
            warn!("No API key configured; skipping LLM enrichment");
            return true;
        }
        requested
    }
}

/// Parse `--args` into a JSON object.
pub(crate) fn parse_args(raw: Option<&str>) -> anyhow::Result<Args> {
    let Some(raw) = raw else {
        return Ok(Args::new());
    };
    match serde_json::from_str::<serde_json::Value>(raw).context("--args is not valid JSON")? {
        serde_json::Value::Object(map) => Ok(map),
        other => bail!("--args must be a JSON object, got {}", other),
    }
}

/// Registry name for a site: its host, or `site` when it has none.
pub(crate) fn integration_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "site".to_string())
}

/// One row of the `analyze` table.
pub(crate) fn tool_line(tool: &ToolDefinition) -> String {
    let badge = match tool.transport {
        Transport::Http => "[HTTP]   ",
        Transport::Browser => "[Browser]",
    };
    format!("  • {:<30} {} {}", tool.name, badge, tool.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anysite_protocols::{HttpConfig, HttpMethod, InputSchema};

    #[test]
    fn test_parse_args() {
        assert!(parse_args(None).unwrap().is_empty());
        let args = parse_args(Some(r#"{"q": "rust", "limit": 5}"#)).unwrap();
        assert_eq!(args["q"], "rust");
        assert_eq!(args["limit"], 5);
        assert!(parse_args(Some("[1, 2]")).is_err());
        assert!(parse_args(Some("{not json")).is_err());
    }

    #[test]
    fn test_integration_name() {
        assert_eq!(integration_name("https://shop.example.com/search"), "shop.example.com");
        assert_eq!(integration_name("not a url"), "site");
    }

    #[test]
    fn test_tool_line_badge() {
        let tool = ToolDefinition::http(
            "search",
            "Search the catalog",
            InputSchema::object(),
            HttpConfig::new("https://example.com/search", HttpMethod::Get),
        );
        let line = tool_line(&tool);
        assert!(line.starts_with("  • search "));
        assert!(line.contains("[HTTP]    Search the catalog"));
    }

    #[test]
    fn test_skip_llm_forced_without_provider() {
        let app = App {
            hub: IntegrationHub::new(Arc::new(
                ReqwestFetcher::new("test", Duration::from_secs(1)).unwrap(),
            )),
            has_enricher: false,
        };
        assert!(app.skip_llm(false));
        assert!(app.skip_llm(true));
    }
}
