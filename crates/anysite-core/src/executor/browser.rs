//! `browser` transport.

use std::sync::Arc;
use tracing::{debug, warn};

use anysite_protocols::browser::{BrowserLauncher, BrowserPage, BrowserSession};
use anysite_protocols::error::{BrowserError, ExecutorError};
use anysite_protocols::tool::{Args, BrowserAction, BrowserStep, ToolDefinition, ToolOutput};

use super::arg_to_text;

const BODY_SELECTOR: &str = "body";

/// A step whose required fields have been checked.
#[derive(Debug, PartialEq)]
enum PageCommand<'a> {
    Navigate { url: &'a str },
    Fill { selector: &'a str, value: String },
    Click { selector: &'a str },
    WaitFor { selector: &'a str },
    Extract { selector: &'a str },
}

impl<'a> PageCommand<'a> {
    fn from_step(tool: &str, step: &'a BrowserStep, args: &Args) -> Result<Self, ExecutorError> {
        let require = |field: Option<&'a String>, name: &'static str| {
            field
                .map(String::as_str)
                .ok_or_else(|| ExecutorError::MissingStepField {
                    tool: tool.to_string(),
                    action: step.action.as_str(),
                    field: name,
                })
        };

        let command = match step.action {
            BrowserAction::Navigate => Self::Navigate {
                url: require(step.value.as_ref(), "value")?,
            },
            BrowserAction::Fill => {
                let selector = require(step.selector.as_ref(), "selector")?;
                let value = match (&step.param_ref, &step.value) {
                    (Some(param), _) => args
                        .get(param)
                        .filter(|v| !v.is_null())
                        .map(arg_to_text)
                        .ok_or_else(|| ExecutorError::MissingArgument {
                            tool: tool.to_string(),
                            param: param.clone(),
                        })?,
                    (None, Some(value)) => value.clone(),
                    (None, None) => return Err(ExecutorError::MissingFillValue(tool.to_string())),
                };
                Self::Fill { selector, value }
            }
            BrowserAction::Click => Self::Click {
                selector: require(step.selector.as_ref(), "selector")?,
            },
            BrowserAction::WaitFor => Self::WaitFor {
                selector: require(step.selector.as_ref(), "selector")?,
            },
            BrowserAction::Extract => Self::Extract {
                selector: step.selector.as_deref().unwrap_or(BODY_SELECTOR),
            },
        };
        Ok(command)
    }
}

/// Runs `browser` tools against a fresh browser per invocation.
pub struct BrowserExecutor {
    launcher: Arc<dyn BrowserLauncher>,
}

impl BrowserExecutor {
    pub fn new(launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self { launcher }
    }

    /// Execute `tool` with `args`.
    ///
    /// Steps run in order on a single page. The text of the last `extract`
    /// step is the result; without one the result is the final page URL.
    /// The browser is closed whatever the outcome.
    pub async fn execute(
        &self,
        tool: &ToolDefinition,
        args: &Args,
    ) -> Result<ToolOutput, ExecutorError> {
        let config = tool
            .browser_config
            .as_ref()
            .ok_or_else(|| ExecutorError::MissingBrowserConfig(tool.name.clone()))?;
        if config.steps.is_empty() {
            return Err(ExecutorError::NoSteps(tool.name.clone()));
        }

        let mut session = self
            .launcher
            .launch()
            .await
            .map_err(|source| browser_error(tool, source))?;

        let result = run_steps(session.as_mut(), tool, &config.steps, args).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser for tool {}: {}", tool.name, e);
        }

        result
    }
}

async fn run_steps(
    session: &mut dyn BrowserSession,
    tool: &ToolDefinition,
    steps: &[BrowserStep],
    args: &Args,
) -> Result<ToolOutput, ExecutorError> {
    let page = session
        .new_page()
        .await
        .map_err(|source| browser_error(tool, source))?;

    let mut extracted: Option<String> = None;
    for (index, step) in steps.iter().enumerate() {
        let command = PageCommand::from_step(&tool.name, step, args)?;
        debug!("Tool {} step {}: {:?}", tool.name, index + 1, step.action);
        if let Some(text) = run_command(page.as_ref(), tool, command).await? {
            extracted = Some(text);
        }
    }

    match extracted {
        Some(text) => Ok(ToolOutput::Text(text)),
        None => {
            let url = page.url().await.map_err(|source| browser_error(tool, source))?;
            Ok(ToolOutput::navigated(url))
        }
    }
}

async fn run_command(
    page: &dyn BrowserPage,
    tool: &ToolDefinition,
    command: PageCommand<'_>,
) -> Result<Option<String>, ExecutorError> {
    let wrap = |source| browser_error(tool, source);
    match command {
        PageCommand::Navigate { url } => page.goto(url).await.map_err(wrap)?,
        PageCommand::Fill { selector, value } => page.fill(selector, &value).await.map_err(wrap)?,
        PageCommand::Click { selector } => page.click(selector).await.map_err(wrap)?,
        PageCommand::WaitFor { selector } => page.wait_for_selector(selector).await.map_err(wrap)?,
        PageCommand::Extract { selector } => {
            let text = match page.text_content(selector).await {
                Ok(text) => text,
                Err(BrowserError::ElementNotFound(_)) => {
                    return Err(ExecutorError::ElementNotFound {
                        tool: tool.name.clone(),
                        selector: selector.to_string(),
                    });
                }
                Err(source) => return Err(wrap(source)),
            };
            return match text.filter(|t| !t.is_empty()) {
                Some(text) => Ok(Some(text)),
                None => Err(ExecutorError::EmptyText {
                    tool: tool.name.clone(),
                    selector: selector.to_string(),
                }),
            };
        }
    }
    Ok(None)
}

fn browser_error(tool: &ToolDefinition, source: BrowserError) -> ExecutorError {
    ExecutorError::Browser {
        tool: tool.name.clone(),
        source,
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
