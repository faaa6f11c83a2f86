//! The discovery state machine.

use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use anysite_protocols::discovery::{DiscoveredVia, DiscoveryResult, FormCandidate};
use anysite_protocols::error::DiscoveryError;
use anysite_protocols::fetch::{FetchRequest, Fetcher};
use anysite_protocols::tool::{HttpConfig, InputSchema, PropertySchema, ToolDefinition};

use super::html_analyzer::analyze_html;
use super::llm_enricher::LlmEnricher;
use super::naming::{UniqueNames, snake_case};
use super::spec_detector::SpecDetector;
use super::spec_parser::parse_openapi_spec;

/// Stages of a discovery run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStage {
    ApiSpec,
    Html,
    Enrichment,
}

impl DiscoveryStage {
    /// 1-based position of the stage.
    pub fn number(&self) -> u8 {
        match self {
            Self::ApiSpec => 1,
            Self::Html => 2,
            Self::Enrichment => 3,
        }
    }
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ApiSpec => "API description",
            Self::Html => "HTML analysis",
            Self::Enrichment => "enrichment",
        };
        f.write_str(name)
    }
}

/// Progress callback.
pub type ProgressFn = Arc<dyn Fn(DiscoveryStage, &str) + Send + Sync>;

/// Per-run options.
#[derive(Clone, Default)]
pub struct DiscoverOptions {
    /// Convert forms directly instead of calling the enricher.
    pub skip_llm: bool,
    pub on_progress: Option<ProgressFn>,
}

impl DiscoverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_llm(mut self, skip_llm: bool) -> Self {
        self.skip_llm = skip_llm;
        self
    }

    pub fn with_progress(
        mut self,
        on_progress: impl Fn(DiscoveryStage, &str) + Send + Sync + 'static,
    ) -> Self {
        self.on_progress = Some(Arc::new(on_progress));
        self
    }

    fn report(&self, stage: DiscoveryStage, message: &str) {
        if let Some(on_progress) = &self.on_progress {
            on_progress(stage, message);
        }
    }
}

impl fmt::Debug for DiscoverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoverOptions")
            .field("skip_llm", &self.skip_llm)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

/// Turns a URL into tool definitions.
///
/// Stages run in a fixed order and the first productive one wins:
///
/// 1. a published OpenAPI/Swagger document (the page itself is not fetched);
/// 2. the page's forms, converted directly when `skip_llm` is set;
/// 3. otherwise the forms and page snippet are handed to the enricher.
pub struct DiscoveryPipeline {
    fetcher: Arc<dyn Fetcher>,
    detector: SpecDetector,
    enricher: Option<LlmEnricher>,
}

impl DiscoveryPipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            detector: SpecDetector::new(fetcher.clone()),
            fetcher,
            enricher: None,
        }
    }

    pub fn with_enricher(mut self, enricher: LlmEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn has_enricher(&self) -> bool {
        self.enricher.is_some()
    }

    /// Discover the tools of `url`.
    ///
    /// Only an invalid `url` is an error. An unreachable page produces an
    /// empty `html` result and enrichment failures an empty `hybrid` one.
    pub async fn discover(
        &self,
        url: &str,
        options: &DiscoverOptions,
    ) -> Result<DiscoveryResult, DiscoveryError> {
        let page_url = Url::parse(url).map_err(|e| DiscoveryError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !page_url.origin().is_tuple() {
            return Err(DiscoveryError::InvalidUrl {
                url: url.to_string(),
                reason: "URL has no origin".to_string(),
            });
        }

        options.report(DiscoveryStage::ApiSpec, "Checking for an API description");
        if let Some(document) = self.detector.detect(&page_url).await {
            match parse_openapi_spec(&document, url) {
                Ok(tools) if !tools.is_empty() => {
                    let message = format!("Found {} operation(s)", tools.len());
                    options.report(DiscoveryStage::ApiSpec, &message);
                    info!("Discovered {} tool(s) for {} via API description", tools.len(), url);
                    return Ok(DiscoveryResult::new(tools, url, DiscoveredVia::ApiSpec));
                }
                Ok(_) => info!("API description for {} has no usable operations", url),
                Err(e) => warn!("Could not parse API description for {}: {}", url, e),
            }
        }

        options.report(DiscoveryStage::Html, "Fetching page");
        let page = match self.fetcher.fetch(FetchRequest::get(page_url.clone())).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                warn!("Page {} returned HTTP {}", url, response.status);
                return Ok(DiscoveryResult::empty(url, DiscoveredVia::Html));
            }
            Err(e) => {
                warn!("Page {} could not be fetched: {}", url, e);
                return Ok(DiscoveryResult::empty(url, DiscoveredVia::Html));
            }
        };

        let candidates = analyze_html(&page.body, &page_url);
        options.report(
            DiscoveryStage::Html,
            &format!("Found {} form(s)", candidates.len()),
        );

        if options.skip_llm {
            let tools = forms_to_tools(&candidates);
            info!("Discovered {} tool(s) for {} from forms", tools.len(), url);
            return Ok(DiscoveryResult::new(tools, url, DiscoveredVia::Html));
        }

        options.report(DiscoveryStage::Enrichment, "Generating tool definitions");
        let tools = match &self.enricher {
            Some(enricher) => enricher.enrich(&candidates, url, &page.body).await,
            None => {
                warn!("No provider configured; enrichment for {} produced no tools", url);
                Vec::new()
            }
        };
        options.report(
            DiscoveryStage::Enrichment,
            &format!("Generated {} tool(s)", tools.len()),
        );

        Ok(DiscoveryResult::new(tools, url, DiscoveredVia::Hybrid))
    }
}

/// Direct form → `http` tool conversion used when enrichment is skipped.
fn forms_to_tools(candidates: &[FormCandidate]) -> Vec<ToolDefinition> {
    let mut names = UniqueNames::new();
    candidates
        .iter()
        .map(|candidate| form_to_tool(candidate, &mut names))
        .collect()
}

fn form_to_tool(candidate: &FormCandidate, names: &mut UniqueNames) -> ToolDefinition {
    let name = names.claim(snake_case(&last_path_segment(&candidate.form_action)));
    let description = format!(
        "Submit {} at {}",
        candidate.submit_label.as_deref().unwrap_or("form"),
        candidate.form_action
    );

    let mut schema = InputSchema::object();
    for field in &candidate.fields {
        if schema
            .properties
            .insert(field.name.clone(), PropertySchema::string())
            .is_none()
        {
            schema.required.push(field.name.clone());
        }
    }

    let config = HttpConfig::new(candidate.form_action.clone(), candidate.method.into())
        .with_identity_mapping(candidate.fields.iter().map(|f| f.name.clone()));

    ToolDefinition::http(name, description, schema, config)
}

fn last_path_segment(action: &str) -> String {
    Url::parse(action)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|segment| !segment.is_empty())
        .unwrap_or_else(|| "form".to_string())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
