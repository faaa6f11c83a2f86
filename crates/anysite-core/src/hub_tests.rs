use super::*;
use anysite_protocols::error::{BrowserError, FetchError};
use anysite_protocols::fetch::{FetchRequest, FetchResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;

const FORM_PAGE: &str = r#"<form action="/search"><input name="q"><button>Find</button></form>"#;

/// Routes by host + path; everything else is a 404.
struct MockFetcher {
    routes: HashMap<String, FetchResponse>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    fn new(routes: &[(&str, u16, &str, &str)]) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|(key, status, content_type, body)| {
                    (
                        key.to_string(),
                        FetchResponse::new(*status, Some(content_type.to_string()), *body),
                    )
                })
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let key = format!(
            "{}{}",
            request.url.host_str().unwrap_or_default(),
            request.url.path()
        );
        self.requested.lock().push(request.url.to_string());
        Ok(self
            .routes
            .get(&key)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, None, "")))
    }
}

/// Never answers within any reasonable time.
struct StalledFetcher;

#[async_trait]
impl Fetcher for StalledFetcher {
    async fn fetch(&self, _request: FetchRequest) -> Result<FetchResponse, FetchError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(FetchResponse::new(200, None, ""))
    }
}

struct NoBrowser;

#[async_trait]
impl BrowserLauncher for NoBrowser {
    async fn launch(
        &self,
    ) -> Result<Box<dyn anysite_protocols::browser::BrowserSession>, BrowserError> {
        Err(BrowserError::ChromeNotFound)
    }
}

fn shop_fetcher() -> Arc<MockFetcher> {
    Arc::new(MockFetcher::new(&[
        ("shop.example.com/", 200, "text/html", FORM_PAGE),
        ("shop.example.com/search", 200, "application/json", r#"{"hits":3}"#),
    ]))
}

fn skip_llm() -> DiscoverOptions {
    DiscoverOptions::new().with_skip_llm(true)
}

#[tokio::test]
async fn test_connect_records_entry() {
    let hub = IntegrationHub::new(shop_fetcher());

    let entry = hub
        .connect(IntegrationConfig::new("shop", "https://shop.example.com/"), &skip_llm())
        .await;

    assert!(entry.is_connected());
    assert_eq!(entry.tools.len(), 1);
    assert_eq!(entry.tools[0].name, "search");
    assert!(entry.error.is_none());
    assert_eq!(entry.discovered_via, Some(DiscoveredVia::Html));
    assert_eq!(hub.get("shop").unwrap().tools.len(), 1);
    assert_eq!(hub.tools("shop")[0].name, "search");
}

#[tokio::test]
async fn test_config_skip_llm_overrides_options() {
    let hub = IntegrationHub::new(shop_fetcher());

    let entry = hub
        .connect(
            IntegrationConfig::new("shop", "https://shop.example.com/").with_skip_llm(true),
            &DiscoverOptions::new(),
        )
        .await;

    assert_eq!(entry.tools.len(), 1);
}

#[tokio::test]
async fn test_invalid_url_recorded_as_error() {
    let hub = IntegrationHub::new(shop_fetcher());

    let entry = hub
        .connect(IntegrationConfig::new("broken", "nowhere"), &skip_llm())
        .await;

    assert_eq!(entry.status, IntegrationStatus::Error);
    assert!(entry.error.as_deref().unwrap().contains("nowhere"));
    assert!(entry.tools.is_empty());
    assert!(hub.get("broken").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_discovery_timeout() {
    let hub = IntegrationHub::new(Arc::new(StalledFetcher)).with_timeout(Duration::from_secs(60));

    let entry = hub
        .connect(IntegrationConfig::new("slow", "https://slow.example.com/"), &skip_llm())
        .await;

    assert_eq!(entry.status, IntegrationStatus::Error);
    assert_eq!(
        entry.error.as_deref(),
        Some("Discovery timed out after 60 seconds")
    );
}

#[tokio::test]
async fn test_connect_all_and_list() {
    let fetcher = Arc::new(MockFetcher::new(&[
        ("a.example.com/", 200, "text/html", FORM_PAGE),
        ("b.example.com/", 200, "text/html", FORM_PAGE),
    ]));
    let hub = IntegrationHub::new(fetcher);

    let entries = hub
        .connect_all(vec![
            IntegrationConfig::new("b", "https://b.example.com/").with_skip_llm(true),
            IntegrationConfig::new("a", "https://a.example.com/").with_skip_llm(true),
        ])
        .await;

    assert_eq!(entries.len(), 2);
    let names: Vec<String> = hub.list().into_iter().map(|e| e.config.name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn test_call_dispatches_http() {
    let fetcher = shop_fetcher();
    let hub = IntegrationHub::new(fetcher.clone());
    hub.connect(IntegrationConfig::new("shop", "https://shop.example.com/"), &skip_llm())
        .await;

    let args = json!({"q": "boots"}).as_object().cloned().unwrap();
    let output = hub.call("shop", "search", &args).await.unwrap();

    assert_eq!(output, ToolOutput::Json(json!({"hits": 3})));
    assert!(
        fetcher
            .requested
            .lock()
            .iter()
            .any(|u| u == "https://shop.example.com/search?q=boots")
    );
}

#[tokio::test]
async fn test_call_unknown_integration() {
    let hub = IntegrationHub::new(shop_fetcher());
    hub.connect(IntegrationConfig::new("shop", "https://shop.example.com/"), &skip_llm())
        .await;

    let err = hub.call("bank", "search", &Args::new()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "No integration named \"bank\". Connected: shop"
    );
}

#[tokio::test]
async fn test_call_unknown_tool_lists_available() {
    let hub = IntegrationHub::new(shop_fetcher());
    hub.connect(IntegrationConfig::new("shop", "https://shop.example.com/"), &skip_llm())
        .await;

    let err = hub.call("shop", "checkout", &Args::new()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tool \"checkout\" not found in \"shop\". Available: search"
    );
}

#[tokio::test]
async fn test_call_on_empty_hub() {
    let hub = IntegrationHub::new(shop_fetcher());
    let err = hub.call("shop", "search", &Args::new()).await.unwrap_err();
    assert!(err.to_string().ends_with("Connected: none"));
}

#[tokio::test]
async fn test_browser_tool_without_launcher() {
    let hub = IntegrationHub::new(shop_fetcher());
    let tool: ToolDefinition = serde_json::from_value(json!({
        "name": "read",
        "transport": "browser",
        "browserConfig": {"steps": [{"action": "extract"}]}
    }))
    .unwrap();
    hub.entries.insert(
        "site".to_string(),
        IntegrationEntry::connected(
            IntegrationConfig::new("site", "https://site.example.com"),
            DiscoveryResult::new(vec![tool], "https://site.example.com", DiscoveredVia::Html),
        ),
    );

    let err = hub.call("site", "read", &Args::new()).await.unwrap_err();
    assert!(matches!(err, HubError::BrowserUnavailable(_)));

    let hub = hub.with_browser(Arc::new(NoBrowser));
    let err = hub.call("site", "read", &Args::new()).await.unwrap_err();
    assert!(matches!(
        err,
        HubError::Executor(ExecutorError::Browser { .. })
    ));
}

#[tokio::test]
async fn test_disconnect() {
    let hub = IntegrationHub::new(shop_fetcher());
    hub.connect(IntegrationConfig::new("shop", "https://shop.example.com/"), &skip_llm())
        .await;

    assert!(hub.disconnect("shop"));
    assert!(!hub.disconnect("shop"));
    assert!(hub.get("shop").is_none());
    assert!(hub.tools("shop").is_empty());
}

#[test]
fn test_entry_wire_shape() {
    let entry = IntegrationEntry::failed(
        IntegrationConfig::new("shop", "https://shop.example.com"),
        "boom".to_string(),
    );
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"], "boom");
    assert!(value["connectedAt"].is_string());
    assert_eq!(value["config"]["url"], "https://shop.example.com");
    assert!(value["config"].get("skipLlm").is_none());
    assert!(value.get("discoveredVia").is_none());
}
