//! Discovery types.

use serde::{Deserialize, Serialize};

use crate::tool::{HttpMethod, ToolDefinition};

/// Which strategy produced a discovery result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveredVia {
    /// A machine-readable API description was found and parsed.
    ApiSpec,
    /// Tools were derived from the page's forms only.
    Html,
    /// Form candidates were enriched by a generative-text provider.
    Hybrid,
}

impl DiscoveredVia {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiSpec => "api-spec",
            Self::Html => "html",
            Self::Hybrid => "hybrid",
        }
    }
}

/// Outcome of one discovery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResult {
    pub tools: Vec<ToolDefinition>,
    pub source_url: String,
    pub discovered_via: DiscoveredVia,
}

impl DiscoveryResult {
    pub fn new(tools: Vec<ToolDefinition>, source_url: impl Into<String>, via: DiscoveredVia) -> Self {
        Self {
            tools,
            source_url: source_url.into(),
            discovered_via: via,
        }
    }

    /// A result with no tools.
    pub fn empty(source_url: impl Into<String>, via: DiscoveredVia) -> Self {
        Self::new(Vec::new(), source_url, via)
    }
}

/// Submission method of an HTML form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    /// Parse a form's `method` attribute. Only POST is distinguished;
    /// everything else submits as GET.
    pub fn from_attr(method: Option<&str>) -> Self {
        match method.map(|m| m.trim().to_ascii_uppercase()) {
            Some(m) if m == "POST" => Self::Post,
            _ => Self::Get,
        }
    }
}

impl From<FormMethod> for HttpMethod {
    fn from(method: FormMethod) -> Self {
        match method {
            FormMethod::Get => HttpMethod::Get,
            FormMethod::Post => HttpMethod::Post,
        }
    }
}

/// A named input of a detected form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// An interactive form detected on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCandidate {
    /// Absolute submission URL.
    pub form_action: String,
    pub method: FormMethod,
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovered_via_wire_names() {
        assert_eq!(serde_json::to_value(DiscoveredVia::ApiSpec).unwrap(), "api-spec");
        assert_eq!(serde_json::to_value(DiscoveredVia::Html).unwrap(), "html");
        assert_eq!(serde_json::to_value(DiscoveredVia::Hybrid).unwrap(), "hybrid");
        assert_eq!(DiscoveredVia::ApiSpec.as_str(), "api-spec");
    }

    #[test]
    fn test_result_shape() {
        let result = DiscoveryResult::empty("https://example.com", DiscoveredVia::Html);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sourceUrl"], "https://example.com");
        assert_eq!(json["discoveredVia"], "html");
        assert_eq!(json["tools"], serde_json::json!([]));
    }

    #[test]
    fn test_form_method_from_attr() {
        assert_eq!(FormMethod::from_attr(None), FormMethod::Get);
        assert_eq!(FormMethod::from_attr(Some("post")), FormMethod::Post);
        assert_eq!(FormMethod::from_attr(Some(" Post ")), FormMethod::Post);
        assert_eq!(FormMethod::from_attr(Some("dialog")), FormMethod::Get);
        assert_eq!(HttpMethod::from(FormMethod::Post), HttpMethod::Post);
    }

    #[test]
    fn test_candidate_serialization() {
        let candidate = FormCandidate {
            form_action: "https://example.com/search".to_string(),
            method: FormMethod::Get,
            fields: vec![FormField {
                name: "q".to_string(),
                field_type: "text".to_string(),
                placeholder: None,
            }],
            submit_label: Some("Go".to_string()),
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["formAction"], "https://example.com/search");
        assert_eq!(json["method"], "GET");
        assert_eq!(json["fields"][0]["type"], "text");
        assert!(json["fields"][0].get("placeholder").is_none());
        assert_eq!(json["submitLabel"], "Go");
    }
}
