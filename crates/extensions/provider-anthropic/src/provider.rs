//! Anthropic provider implementation.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use anysite_protocols::error::ProviderError;
use anysite_protocols::provider::{CompletionRequest, CompletionResponse, LLMProvider};

use crate::api::{ApiErrorBody, ApiRequest, ApiResponse};
use crate::converter::convert_messages;
use crate::parser::parse_response;

/// Public API endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-6";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Anthropic LLM provider.
pub struct AnthropicProvider {
    api_key: String,
    base_url: String,
    default_model: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            client,
        })
    }

    /// Point the provider at another endpoint root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Model used when a request leaves `model` empty.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MESSAGES_PATH)
    }

    fn build_request(&self, request: &CompletionRequest) -> ApiRequest {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };
        ApiRequest {
            model,
            messages: convert_messages(&request.messages),
            system: request.system.clone(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(ProviderError::from_api_response(status, message));
        }

        Ok(response)
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn id(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let api_request = self.build_request(&request);
        debug!(
            "Anthropic request: model={}, max_tokens={}",
            api_request.model, api_request.max_tokens
        );
        let response = self.send_request(&api_request).await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        if let Some(usage) = &api_response.usage {
            debug!(
                "Anthropic usage: input={}, output={}",
                usage.input_tokens, usage.output_tokens
            );
        }
        Ok(parse_response(api_response))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
