use super::*;
use crate::tool::{BrowserStep, HttpMethod, PropertySchema, ToolOutput};

fn search_tool() -> ToolDefinition {
    ToolDefinition::http(
        "search",
        "Search the catalogue",
        InputSchema::object()
            .with_property("q", PropertySchema::string())
            .with_required("q"),
        HttpConfig::new("https://example.com/search", HttpMethod::Get).with_identity_mapping(["q"]),
    )
}

#[test]
fn test_serialize_wire_shape() {
    let json = serde_json::to_value(search_tool()).unwrap();
    assert_eq!(json["name"], "search");
    assert_eq!(json["transport"], "http");
    assert_eq!(json["inputSchema"]["type"], "object");
    assert_eq!(json["inputSchema"]["required"][0], "q");
    assert_eq!(json["httpConfig"]["method"], "GET");
    assert_eq!(json["httpConfig"]["paramMapping"]["q"], "q");
    assert!(json.get("browserConfig").is_none());
}

#[test]
fn test_empty_required_is_omitted() {
    let tool = ToolDefinition::http(
        "list_items",
        "List items",
        InputSchema::object(),
        HttpConfig::new("https://example.com/items", HttpMethod::Get),
    );
    let json = serde_json::to_value(tool).unwrap();
    assert!(json["inputSchema"].get("required").is_none());
}

#[test]
fn test_deserialize_browser_tool() {
    let json = serde_json::json!({
        "name": "login",
        "description": "Log in",
        "inputSchema": {
            "type": "object",
            "properties": {"email": {"type": "string", "description": "Email"}},
            "required": ["email"]
        },
        "transport": "browser",
        "browserConfig": {
            "steps": [
                {"action": "navigate", "value": "https://example.com/login"},
                {"action": "fill", "selector": "#email", "paramRef": "email"},
                {"action": "waitFor", "selector": ".dashboard"},
                {"action": "extract"}
            ]
        }
    });
    let tool: ToolDefinition = serde_json::from_value(json).unwrap();
    assert_eq!(tool.transport, Transport::Browser);
    let steps = &tool.browser_config.as_ref().unwrap().steps;
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[1], BrowserStep::fill_param("#email", "email"));
    assert_eq!(steps[2].action, crate::tool::BrowserAction::WaitFor);
    assert!(tool.validate().is_ok());
}

#[test]
fn test_unknown_action_rejected() {
    let json = serde_json::json!({"action": "hover", "selector": "a"});
    assert!(serde_json::from_value::<BrowserStep>(json).is_err());
}

#[test]
fn test_property_extra_keywords_preserved() {
    let json = serde_json::json!({"type": "integer", "minimum": 1, "description": "Page"});
    let prop: PropertySchema = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(prop.property_type, "integer");
    assert_eq!(prop.extra["minimum"], 1);
    assert_eq!(serde_json::to_value(prop).unwrap(), json);
}

#[test]
fn test_validate_ok() {
    assert!(search_tool().validate().is_ok());
}

#[test]
fn test_validate_undeclared_required() {
    let mut tool = search_tool();
    tool.input_schema.required.push("page".to_string());
    let err = tool.validate().unwrap_err();
    assert!(err.to_string().contains("page"));
}

#[test]
fn test_validate_missing_config() {
    let mut tool = search_tool();
    tool.http_config = None;
    assert!(matches!(tool.validate(), Err(DefinitionError::MissingConfig { .. })));
}

#[test]
fn test_validate_relative_url() {
    let mut tool = search_tool();
    tool.http_config.as_mut().unwrap().url = "/search".to_string();
    assert!(matches!(tool.validate(), Err(DefinitionError::InvalidUrl { .. })));
}

#[test]
fn test_validate_browser_without_steps() {
    let tool = ToolDefinition::browser("noop", "", InputSchema::object(), BrowserConfig::default());
    assert!(matches!(tool.validate(), Err(DefinitionError::NoSteps(_))));
}

#[test]
fn test_validate_conflicting_config() {
    let mut tool = search_tool();
    tool.browser_config = Some(BrowserConfig::new(vec![BrowserStep::navigate("https://example.com")]));
    assert!(matches!(tool.validate(), Err(DefinitionError::ConflictingConfig(_))));
}

#[test]
fn test_output_shapes() {
    let navigated = serde_json::to_value(ToolOutput::navigated("https://example.com/done")).unwrap();
    assert_eq!(navigated, serde_json::json!({"success": true, "url": "https://example.com/done"}));

    let text = serde_json::to_value(ToolOutput::Text("hello".to_string())).unwrap();
    assert_eq!(text, serde_json::json!("hello"));

    let json = ToolOutput::Json(serde_json::json!({"id": 1})).into_value();
    assert_eq!(json["id"], 1);
}
