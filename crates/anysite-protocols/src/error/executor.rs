//! Tool execution errors.

use thiserror::Error;

use super::BrowserError;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Tool \"{0}\" has no httpConfig")]
    MissingHttpConfig(String),

    #[error("Tool \"{0}\" has no browserConfig")]
    MissingBrowserConfig(String),

    #[error("Tool \"{0}\" has no steps")]
    NoSteps(String),

    #[error("Tool \"{tool}\" has invalid url \"{url}\": {reason}")]
    InvalidUrl {
        tool: String,
        url: String,
        reason: String,
    },

    #[error("{action} step in tool \"{tool}\" is missing required \"{field}\"")]
    MissingStepField {
        tool: String,
        action: &'static str,
        field: &'static str,
    },

    #[error("fill step in tool \"{0}\" needs either \"paramRef\" or \"value\"")]
    MissingFillValue(String),

    #[error("Tool \"{tool}\" requires argument \"{param}\" which was not supplied")]
    MissingArgument { tool: String, param: String },

    #[error("extract step in tool \"{tool}\" could not find element \"{selector}\"")]
    ElementNotFound { tool: String, selector: String },

    #[error("extract step in tool \"{tool}\" found no text content in \"{selector}\"")]
    EmptyText { tool: String, selector: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("Browser error in tool \"{tool}\": {source}")]
    Browser {
        tool: String,
        #[source]
        source: BrowserError,
    },
}
