//! # AnySite Protocols
//!
//! Data model and protocol definitions (traits) shared by the AnySite crates.
//! Contains only types and interfaces - no network or browser code.
//!
//! ## Core Traits
//!
//! - [`Fetcher`] - Injectable network fetch used by discovery and the HTTP executor
//! - [`LLMProvider`] - Generative-text provider used for tool enrichment
//! - [`BrowserLauncher`] - Source of isolated browser sessions for browser tools

pub mod browser;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod provider;
pub mod tool;

// Re-export core types
pub use browser::{BrowserLauncher, BrowserPage, BrowserSession};
pub use discovery::{DiscoveredVia, DiscoveryResult, FormCandidate, FormField, FormMethod};
pub use fetch::{FetchRequest, FetchResponse, Fetcher};
pub use provider::{CompletionRequest, CompletionResponse, LLMProvider, Message, MessageRole};
pub use tool::{
    Args, BrowserAction, BrowserConfig, BrowserStep, HttpConfig, HttpMethod, InputSchema,
    PropertySchema, ToolDefinition, ToolOutput, Transport,
};
pub use error::{
    BrowserError, DefinitionError, DiscoveryError, ExecutorError, FetchError, ProviderError,
};
