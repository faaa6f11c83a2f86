//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_discovery(config, &mut result);
        Self::validate_network(config, &mut result);
        Self::validate_provider(config, &mut result);
        Self::validate_browser(config, &mut result);

        result
    }

    fn validate_discovery(config: &Config, result: &mut ValidationResult) {
        if config.discovery.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "discovery.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if config.discovery.snippet_chars == 0 {
            result.add_error(ValidationError::new(
                "discovery.snippet_chars",
                "snippet_chars must be greater than 0",
            ));
        }
    }

    fn validate_network(config: &Config, result: &mut ValidationResult) {
        if config.network.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "network.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if config.network.user_agent.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "network.user_agent",
                "user_agent is empty, some sites reject anonymous clients",
            ));
        }
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let provider = &config.provider;

        if provider.model.trim().is_empty() {
            result.add_error(ValidationError::new(
                "provider.model",
                "model cannot be empty",
            ));
        }

        if provider.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "provider.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if let Some(ref url) = provider.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    "provider.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        if !config.discovery.skip_llm && provider.resolve_api_key().is_none() {
            result.add_warning(ValidationWarning::new(
                "provider.api_key",
                "API key is not set, tool enrichment will be skipped",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.launch_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_seconds",
                "launch_timeout_seconds must be greater than 0",
            ));
        }

        if config.browser.wait_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.wait_timeout_ms",
                "wait_timeout_ms must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
