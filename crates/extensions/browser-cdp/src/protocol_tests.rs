use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: Some("S1".to_string()),
    };
    let json: Value = serde_json::to_value(&req).unwrap();
    assert_eq!(json["method"], "Page.navigate");
    assert_eq!(json["sessionId"], "S1");
    assert_eq!(json["params"]["url"], "https://example.com");
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 7,
        method: "Browser.close".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert_eq!(json, r#"{"id":7,"method":"Browser.close"}"#);
}

#[test]
fn test_cdp_response_reply_and_error() {
    let resp: CdpResponse = serde_json::from_str(r#"{"id": 1, "result": {"frameId": "abc"}}"#).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());

    let resp: CdpResponse =
        serde_json::from_str(r#"{"id": 2, "error": {"code": -32601, "message": "'Foo.bar' wasn't found"}}"#)
            .unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32601);
}

#[test]
fn test_cdp_event_has_no_id() {
    let resp: CdpResponse = serde_json::from_str(
        r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}, "sessionId": "S1"}"#,
    )
    .unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "",
        "url": "about:blank",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert_eq!(info.page_type, "page");
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "HeadlessChrome/126.0.6478.126",
        "Protocol-Version": "1.3",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert!(version.browser.starts_with("HeadlessChrome"));
    assert!(version.web_socket_debugger_url.ends_with("/abc"));
}
