//! Tool definition types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BrowserConfig, HttpConfig, InputSchema};
use crate::error::DefinitionError;

/// How a tool is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Http,
    Browser,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Browser => f.write_str("browser"),
        }
    }
}

/// Definition of a callable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Snake_case identifier, unique within a discovery result.
    pub name: String,

    /// Description of what the tool does.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub input_schema: InputSchema,

    pub transport: Transport,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_config: Option<HttpConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_config: Option<BrowserConfig>,
}

impl ToolDefinition {
    /// Create an HTTP-backed tool.
    pub fn http(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
        config: HttpConfig,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            transport: Transport::Http,
            http_config: Some(config),
            browser_config: None,
        }
    }

    /// Create a browser-backed tool.
    pub fn browser(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
        config: BrowserConfig,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            transport: Transport::Browser,
            http_config: None,
            browser_config: Some(config),
        }
    }

    /// Check the structural invariants of the definition.
    ///
    /// Executors re-check what they need at call time; this is used to
    /// filter definitions coming from untrusted sources.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        if let Some(field) = self.input_schema.undeclared_required().first() {
            return Err(DefinitionError::UndeclaredRequired {
                tool: self.name.clone(),
                field: (*field).to_string(),
            });
        }

        match self.transport {
            Transport::Http => {
                let config = self
                    .http_config
                    .as_ref()
                    .ok_or_else(|| DefinitionError::MissingConfig {
                        tool: self.name.clone(),
                        transport: self.transport,
                    })?;
                if self.browser_config.is_some() {
                    return Err(DefinitionError::ConflictingConfig(self.name.clone()));
                }
                url::Url::parse(&config.url).map_err(|e| DefinitionError::InvalidUrl {
                    tool: self.name.clone(),
                    url: config.url.clone(),
                    reason: e.to_string(),
                })?;
            }
            Transport::Browser => {
                let config = self
                    .browser_config
                    .as_ref()
                    .ok_or_else(|| DefinitionError::MissingConfig {
                        tool: self.name.clone(),
                        transport: self.transport,
                    })?;
                if self.http_config.is_some() {
                    return Err(DefinitionError::ConflictingConfig(self.name.clone()));
                }
                if config.steps.is_empty() {
                    return Err(DefinitionError::NoSteps(self.name.clone()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
