//! `http` transport.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use anysite_protocols::error::ExecutorError;
use anysite_protocols::fetch::{FetchRequest, Fetcher};
use anysite_protocols::tool::{Args, HttpConfig, HttpMethod, ToolDefinition, ToolOutput};

use super::arg_to_text;

/// Runs `http` tools as one request through a [`Fetcher`].
pub struct HttpExecutor {
    fetcher: Arc<dyn Fetcher>,
}

impl HttpExecutor {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Execute `tool` with `args`.
    ///
    /// GET arguments go into the query string, other methods send a JSON
    /// body keyed by the mapped parameter names. JSON responses are parsed,
    /// anything else is returned as text.
    pub async fn execute(
        &self,
        tool: &ToolDefinition,
        args: &Args,
    ) -> Result<ToolOutput, ExecutorError> {
        let config = tool
            .http_config
            .as_ref()
            .ok_or_else(|| ExecutorError::MissingHttpConfig(tool.name.clone()))?;

        let mut url = Url::parse(&config.url).map_err(|e| ExecutorError::InvalidUrl {
            tool: tool.name.clone(),
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        let request = match config.method {
            HttpMethod::Get => {
                apply_query(&mut url, config, args);
                FetchRequest::get(url)
            }
            method => {
                let body = Value::Object(json_body(config, args)).to_string();
                FetchRequest::new(method, url)
                    .with_header("Content-Type", "application/json")
                    .with_body(body)
            }
        };

        let request_url = request.url.to_string();
        debug!("Tool {}: {} {}", tool.name, request.method, request_url);

        let response = self
            .fetcher
            .fetch(request)
            .await
            .map_err(|e| ExecutorError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(ExecutorError::HttpStatus {
                status: response.status,
                url: request_url,
            });
        }

        if response.is_json() {
            let value = serde_json::from_str(&response.body).map_err(|e| {
                ExecutorError::InvalidResponse {
                    url: request_url,
                    reason: e.to_string(),
                }
            })?;
            Ok(ToolOutput::Json(value))
        } else {
            Ok(ToolOutput::Text(response.body))
        }
    }
}

/// Merge mapped arguments into the query of `url`.
///
/// A mapped parameter replaces any pair of the same name already on the
/// URL. Absent and null arguments are left out.
fn apply_query(url: &mut Url, config: &HttpConfig, args: &Args) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut changed = false;

    for (tool_param, api_param) in &config.param_mapping {
        let Some(value) = args.get(tool_param).filter(|v| !v.is_null()) else {
            continue;
        };
        pairs.retain(|(name, _)| name != api_param);
        pairs.push((api_param.clone(), arg_to_text(value)));
        changed = true;
    }

    if changed {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// Body object keyed by API parameter names. Values are passed through
/// untouched; only absent arguments are left out.
fn json_body(config: &HttpConfig, args: &Args) -> Map<String, Value> {
    config
        .param_mapping
        .iter()
        .filter_map(|(tool_param, api_param)| {
            args.get(tool_param)
                .map(|value| (api_param.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
