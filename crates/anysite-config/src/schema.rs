//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Discovery pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Convert forms to tools without calling the provider.
    #[serde(default)]
    pub skip_llm: bool,

    /// Upper bound for one discovery run, enforced by the integration hub.
    #[serde(default = "default_discovery_timeout")]
    pub timeout_seconds: u64,

    /// Characters of page markup sent to the provider.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            skip_llm: false,
            timeout_seconds: default_discovery_timeout(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

fn default_discovery_timeout() -> u64 {
    60
}

fn default_snippet_chars() -> usize {
    3000
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    format!("AnySite/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> u64 {
    30
}

/// Generative-text provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key. Falls back to `ANTHROPIC_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Override of the API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: None,
        }
    }
}

impl ProviderConfig {
    /// API key from the config file or the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

fn default_model() -> String {
    "claude-sonnet-4-6".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome executable (auto-detected when unset).
    #[serde(default)]
    pub chrome_path: Option<String>,

    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_launch_timeout")]
    pub launch_timeout_seconds: u64,

    /// Timeout for waitFor steps and page loads.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            launch_timeout_seconds: default_launch_timeout(),
            wait_timeout_ms: default_wait_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_launch_timeout() -> u64 {
    20
}

fn default_wait_timeout() -> u64 {
    30_000
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
