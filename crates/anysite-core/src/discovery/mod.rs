//! Website → tool definition discovery.
//!
//! Three strategies run in a fixed order: a published API description,
//! forms found in the page markup, and provider enrichment of those forms.

mod html_analyzer;
mod json_extract;
mod llm_enricher;
mod naming;
mod pipeline;
mod spec_detector;
mod spec_parser;

pub use html_analyzer::analyze_html;
pub use json_extract::extract_json_array;
pub use llm_enricher::{DEFAULT_SNIPPET_CHARS, LlmEnricher};
pub use naming::{UniqueNames, snake_case};
pub use pipeline::{DiscoverOptions, DiscoveryPipeline, DiscoveryStage, ProgressFn};
pub use spec_detector::{SPEC_PATHS, SpecDetector, is_api_description};
pub use spec_parser::parse_openapi_spec;
