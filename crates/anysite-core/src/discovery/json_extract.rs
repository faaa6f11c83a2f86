//! Locating a JSON array inside free-form model output.

use serde_json::Value;

/// Find a JSON array embedded in `text`.
///
/// Starts at the first `[` and tries every span ending at a `]`, longest
/// first, returning the first one that parses as an array. Nested brackets
/// inside the payload are handled by the parser, not by bracket counting.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    let start = text.find('[')?;
    let tail = &text[start..];

    let ends: Vec<usize> = tail.match_indices(']').map(|(i, _)| i).collect();
    for &end in ends.iter().rev() {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&tail[..=end]) {
            return Some(items);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let items = extract_json_array(r#"[{"name":"a"},{"name":"b"}]"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_array_wrapped_in_prose() {
        let text = "Here are the tools:\n[{\"name\":\"search\"}]\nLet me know [if] you need more.";
        let items = extract_json_array(text).unwrap();
        assert_eq!(items, vec![json!({"name": "search"})]);
    }

    #[test]
    fn test_nested_brackets() {
        let text = r#"Result: [{"name":"a","inputSchema":{"required":["q","r"]}}] done"#;
        let items = extract_json_array(text).unwrap();
        assert_eq!(items[0]["inputSchema"]["required"], json!(["q", "r"]));
    }

    #[test]
    fn test_markdown_fence() {
        let text = "```json\n[1, 2, 3]\n```";
        assert_eq!(extract_json_array(text).unwrap().len(), 3);
    }

    #[test]
    fn test_no_bracket() {
        assert!(extract_json_array("I could not find any tools.").is_none());
    }

    #[test]
    fn test_unparseable() {
        assert!(extract_json_array("[not json at all]").is_none());
        assert!(extract_json_array("[{\"unterminated\": ").is_none());
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(extract_json_array("[]").unwrap().len(), 0);
    }
}
