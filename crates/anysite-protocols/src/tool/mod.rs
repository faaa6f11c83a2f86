//! Tool definitions.
//!
//! A tool is a named, schema-described operation against a website, backed
//! either by a structured HTTP call or by a scripted browser sequence.

mod browser;
mod definition;
mod http;
mod output;
mod schema;

pub use browser::*;
pub use definition::*;
pub use http::*;
pub use output::*;
pub use schema::*;

/// Caller-supplied tool arguments, keyed by argument name.
pub type Args = serde_json::Map<String, serde_json::Value>;
