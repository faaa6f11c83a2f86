//! # AnySite Core
//!
//! Turns a website into callable tool definitions and runs those tools.
//!
//! ## Components
//!
//! - [`DiscoveryPipeline`] - API description, HTML forms, then provider enrichment
//! - [`HttpExecutor`] - Runs `http` tools as a single request
//! - [`BrowserExecutor`] - Runs `browser` tools as a scripted page session
//! - [`IntegrationHub`] - Registry of connected sites and their tools
//! - [`ReqwestFetcher`] - Default network transport

pub mod discovery;
pub mod executor;
pub mod fetch;
pub mod hub;

pub use discovery::{
    DiscoverOptions, DiscoveryPipeline, DiscoveryStage, LlmEnricher, SpecDetector,
    analyze_html, extract_json_array, parse_openapi_spec, snake_case,
};
pub use executor::{BrowserExecutor, HttpExecutor};
pub use fetch::ReqwestFetcher;
pub use hub::{HubError, IntegrationConfig, IntegrationEntry, IntegrationHub, IntegrationStatus};
