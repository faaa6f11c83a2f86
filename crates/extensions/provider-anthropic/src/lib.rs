//! Anthropic LLM provider for AnySite.

mod api;
mod converter;
mod parser;
mod provider;

pub use provider::{AnthropicProvider, DEFAULT_BASE_URL};
