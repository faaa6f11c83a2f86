//! Browser transport configuration.

use serde::{Deserialize, Serialize};

/// Actions a browser step can perform. Closed set: adding a variant is a
/// compile error at every exhaustive match that handles steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrowserAction {
    Navigate,
    Fill,
    Click,
    WaitFor,
    Extract,
}

impl BrowserAction {
    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Fill => "fill",
            Self::Click => "click",
            Self::WaitFor => "waitFor",
            Self::Extract => "extract",
        }
    }
}

/// A single step of a browser sequence.
///
/// Which of `selector`, `value` and `param_ref` are required depends on the
/// action; the browser executor checks them before running the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserStep {
    pub action: BrowserAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Name of a tool argument substituted at execution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param_ref: Option<String>,
}

impl BrowserStep {
    fn bare(action: BrowserAction) -> Self {
        Self {
            action,
            selector: None,
            value: None,
            param_ref: None,
        }
    }

    pub fn navigate(url: impl Into<String>) -> Self {
        Self {
            value: Some(url.into()),
            ..Self::bare(BrowserAction::Navigate)
        }
    }

    /// Fill `selector` with the value of argument `param_ref`.
    pub fn fill_param(selector: impl Into<String>, param_ref: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            param_ref: Some(param_ref.into()),
            ..Self::bare(BrowserAction::Fill)
        }
    }

    /// Fill `selector` with a literal value.
    pub fn fill_value(selector: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            value: Some(value.into()),
            ..Self::bare(BrowserAction::Fill)
        }
    }

    pub fn click(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::bare(BrowserAction::Click)
        }
    }

    pub fn wait_for(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::bare(BrowserAction::WaitFor)
        }
    }

    pub fn extract(selector: Option<String>) -> Self {
        Self {
            selector,
            ..Self::bare(BrowserAction::Extract)
        }
    }
}

/// Configuration of a browser-backed tool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub steps: Vec<BrowserStep>,
}

impl BrowserConfig {
    pub fn new(steps: Vec<BrowserStep>) -> Self {
        Self { steps }
    }
}
