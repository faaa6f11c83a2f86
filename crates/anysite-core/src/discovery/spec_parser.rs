//! OpenAPI document → tool definitions.

use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use anysite_protocols::error::DiscoveryError;
use anysite_protocols::tool::{HttpConfig, HttpMethod, InputSchema, PropertySchema, ToolDefinition};

use super::naming::{UniqueNames, snake_case};

/// Operation keys converted to tools, in the order they are visited.
const OPERATION_METHODS: [HttpMethod; 5] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Delete,
    HttpMethod::Patch,
];

/// The parts of an operation object we read.
struct Operation<'a> {
    operation_id: Option<&'a str>,
    summary: Option<&'a str>,
    description: Option<&'a str>,
    parameters: Vec<Parameter<'a>>,
}

impl<'a> Operation<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let parameters = obj
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| params.iter().filter_map(Parameter::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            operation_id: str_field(obj, "operationId").filter(|id| !id.is_empty()),
            summary: str_field(obj, "summary"),
            description: str_field(obj, "description"),
            parameters,
        })
    }
}

/// A declared parameter. Entries without a `name` (e.g. unresolved `$ref`s)
/// are not parameters we can map.
struct Parameter<'a> {
    name: &'a str,
    required: bool,
    description: Option<&'a str>,
    schema: Option<&'a Map<String, Value>>,
}

impl<'a> Parameter<'a> {
    fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = str_field(obj, "name").filter(|name| !name.is_empty())?;
        Some(Self {
            name,
            required: obj.get("required").and_then(Value::as_bool).unwrap_or(false),
            description: str_field(obj, "description"),
            schema: obj.get("schema").and_then(Value::as_object),
        })
    }

    fn property(&self) -> PropertySchema {
        let base = self
            .schema
            .and_then(|schema| serde_json::from_value(Value::Object(schema.clone())).ok())
            .unwrap_or_else(PropertySchema::string);
        base.with_description(self.description.unwrap_or(""))
    }
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Convert every GET/POST/PUT/DELETE/PATCH operation of an OpenAPI or
/// Swagger document into an `http` tool.
///
/// Tool URLs are the origin of `base_url` joined with the raw path; any
/// path on `base_url` itself is ignored. Names are unique within the
/// returned list.
pub fn parse_openapi_spec(
    document: &Value,
    base_url: &str,
) -> Result<Vec<ToolDefinition>, DiscoveryError> {
    let base = Url::parse(base_url).map_err(|e| DiscoveryError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if !base.origin().is_tuple() {
        return Err(DiscoveryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "URL has no origin".to_string(),
        });
    }
    let origin = base.origin().ascii_serialization();

    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return Ok(Vec::new());
    };

    let mut names = UniqueNames::new();
    let mut tools = Vec::new();

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };

        for method in OPERATION_METHODS {
            let Some(raw) = item.get(method.as_lower_str()) else {
                continue;
            };
            let Some(operation) = Operation::from_value(raw) else {
                debug!("Skipping {} {}: operation is not an object", method, path);
                continue;
            };

            tools.push(operation_to_tool(&operation, method, path, &origin, &mut names));
        }
    }

    Ok(tools)
}

fn operation_to_tool(
    operation: &Operation<'_>,
    method: HttpMethod,
    path: &str,
    origin: &str,
    names: &mut UniqueNames,
) -> ToolDefinition {
    let raw_name = match operation.operation_id {
        Some(id) => snake_case(id),
        None => snake_case(&format!("{}_{}", method.as_lower_str(), path.replace('/', "_"))),
    };
    let name = names.claim(raw_name);

    let description = operation
        .summary
        .or(operation.description)
        .unwrap_or(path)
        .to_string();

    let mut schema = InputSchema::object();
    for param in &operation.parameters {
        schema.properties.insert(param.name.to_string(), param.property());
        if param.required && !schema.required.iter().any(|r| r == param.name) {
            schema.required.push(param.name.to_string());
        }
    }

    let config = HttpConfig::new(format!("{origin}{path}"), method)
        .with_identity_mapping(operation.parameters.iter().map(|p| p.name));

    ToolDefinition::http(name, description, schema, config)
}

#[cfg(test)]
#[path = "spec_parser_tests.rs"]
mod tests;
