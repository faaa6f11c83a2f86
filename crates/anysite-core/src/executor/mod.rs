//! Tool executors, one per transport.

mod browser;
mod http;

pub use browser::BrowserExecutor;
pub use http::HttpExecutor;

use serde_json::Value;

/// Text form of an argument: strings verbatim, everything else as JSON.
pub(crate) fn arg_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
