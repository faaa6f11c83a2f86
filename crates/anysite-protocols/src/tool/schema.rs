//! Restricted JSON schema for tool inputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input schema of a tool. Always an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type", default = "default_object_type")]
    pub schema_type: String,

    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,

    /// Required field names. Omitted when empty, never serialized as `[]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

fn default_object_type() -> String {
    "object".to_string()
}

impl InputSchema {
    /// Create an empty object schema.
    pub fn object() -> Self {
        Self {
            schema_type: default_object_type(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, name: impl Into<String>, property: PropertySchema) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    /// Mark a property as required.
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Required names that are not declared in `properties`.
    pub fn undeclared_required(&self) -> Vec<&str> {
        self.required
            .iter()
            .filter(|name| !self.properties.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::object()
    }
}

/// Schema of a single input property.
///
/// Keywords other than `type` and `description` (enum, items, format, ...)
/// are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type", default = "default_string_type")]
    pub property_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_string_type() -> String {
    "string".to_string()
}

impl PropertySchema {
    /// A property of the given JSON type.
    pub fn new(property_type: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    /// A plain string property.
    pub fn string() -> Self {
        Self::new("string")
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
