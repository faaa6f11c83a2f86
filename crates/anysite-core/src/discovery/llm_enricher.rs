//! Provider-backed tool synthesis.

use std::sync::Arc;
use tracing::{debug, info, warn};

use anysite_protocols::discovery::FormCandidate;
use anysite_protocols::provider::{CompletionRequest, LLMProvider, Message};
use anysite_protocols::tool::ToolDefinition;

use super::json_extract::extract_json_array;
use super::naming::{UniqueNames, snake_case};

/// Characters of page markup included in the prompt.
pub const DEFAULT_SNIPPET_CHARS: usize = 3000;

const DEFAULT_MODEL: &str = "claude-sonnet-4-6";
const DEFAULT_MAX_TOKENS: u32 = 4096;

const SYSTEM_PROMPT: &str = "You analyze websites and turn them into callable tool definitions. \
You receive a website URL, a snippet of its HTML and the forms detected on the page. \
Produce a JSON array of ToolDefinition objects. Each ToolDefinition has: name (snake_case), \
description, inputSchema (a JSON object schema), transport (\"http\" or \"browser\"), and \
httpConfig ({url, method, paramMapping}) for http tools or browserConfig ({steps: [{action, \
selector?, value?, paramRef?}]}, action one of navigate, fill, click, waitFor, extract) for \
browser tools. Also suggest further tools the site context makes obvious. \
Reply with the JSON array only, no explanation.";

/// Asks a generative-text provider to turn form candidates into tools.
///
/// Enrichment is best-effort: provider failures and unusable replies yield
/// an empty list, never an error.
pub struct LlmEnricher {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: u32,
    snippet_chars: usize,
}

impl LlmEnricher {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_snippet_chars(mut self, snippet_chars: usize) -> Self {
        self.snippet_chars = snippet_chars;
        self
    }

    /// Build the user prompt for one page.
    pub fn build_prompt(&self, candidates: &[FormCandidate], url: &str, page_body: &str) -> String {
        let candidates_json =
            serde_json::to_string_pretty(candidates).unwrap_or_else(|_| "[]".to_string());
        let snippet: String = page_body.chars().take(self.snippet_chars).collect();

        format!(
            "Website URL: {url}\n\n\
             Detected form candidates:\n{candidates_json}\n\n\
             HTML snippet (first {} chars):\n{snippet}\n\n\
             Generate ToolDefinitions for this website.",
            self.snippet_chars
        )
    }

    /// Synthesize tool definitions for `url`.
    pub async fn enrich(
        &self,
        candidates: &[FormCandidate],
        url: &str,
        page_body: &str,
    ) -> Vec<ToolDefinition> {
        let request = CompletionRequest::new(
            self.model.clone(),
            vec![Message::user(self.build_prompt(candidates, url, page_body))],
        )
        .with_system(SYSTEM_PROMPT)
        .with_max_tokens(self.max_tokens);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Enrichment via {} failed: {}", self.provider.id(), e);
                return Vec::new();
            }
        };

        let Some(items) = extract_json_array(&response.text) else {
            warn!("Enrichment reply for {} contained no JSON array", url);
            return Vec::new();
        };

        let tools = parse_tools(items);
        info!("Enrichment produced {} tool(s) for {}", tools.len(), url);
        tools
    }
}

/// Keep the elements that are well-formed tool definitions, with names
/// normalized and made unique.
fn parse_tools(items: Vec<serde_json::Value>) -> Vec<ToolDefinition> {
    let mut names = UniqueNames::new();
    let mut tools = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let mut tool: ToolDefinition = match serde_json::from_value(item) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("Dropping enrichment element {}: {}", index, e);
                continue;
            }
        };
        if let Err(e) = tool.validate() {
            warn!("Dropping enrichment element {}: {}", index, e);
            continue;
        }
        let name = names.claim(snake_case(&tool.name));
        if name != tool.name {
            debug!("Renamed tool {:?} to {:?}", tool.name, name);
        }
        tool.name = name;
        tools.push(tool);
    }

    tools
}

#[cfg(test)]
#[path = "llm_enricher_tests.rs"]
mod tests;
