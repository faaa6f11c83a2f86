use super::*;
use crate::fetch::ReqwestFetcher;
use anysite_protocols::error::FetchError;
use anysite_protocols::fetch::FetchResponse;
use anysite_protocols::tool::{BrowserConfig, BrowserStep, InputSchema};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records requests and answers with a fixed response.
struct RecordingFetcher {
    response: FetchResponse,
    requests: Mutex<Vec<FetchRequest>>,
}

impl RecordingFetcher {
    fn ok_text(body: &str) -> Self {
        Self {
            response: FetchResponse::new(200, Some("text/plain".to_string()), body),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn last_url(&self) -> String {
        self.requests.lock().last().map(|r| r.url.to_string()).unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for RecordingFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        self.requests.lock().push(request);
        Ok(self.response.clone())
    }
}

struct FailingFetcher;

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        Err(FetchError::Request {
            url: request.url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

fn tool(url: &str, method: HttpMethod, params: &[&str]) -> ToolDefinition {
    let config = HttpConfig::new(url, method).with_identity_mapping(params.iter().copied());
    ToolDefinition::http("search", "Search", InputSchema::object(), config)
}

fn args(value: serde_json::Value) -> Args {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("args must be an object"),
    }
}

fn reqwest_executor() -> HttpExecutor {
    let fetcher = ReqwestFetcher::new("AnySite/test", Duration::from_secs(5)).unwrap();
    HttpExecutor::new(Arc::new(fetcher))
}

#[tokio::test]
async fn test_get_merges_into_existing_query() {
    let fetcher = Arc::new(RecordingFetcher::ok_text("ok"));
    let executor = HttpExecutor::new(fetcher.clone());
    let tool = tool(
        "https://api.example.com/search?version=2",
        HttpMethod::Get,
        &["q", "page"],
    );

    executor
        .execute(&tool, &args(json!({"q": "shoes", "page": null})))
        .await
        .unwrap();

    let url = fetcher.last_url();
    assert_eq!(url.matches('?').count(), 1, "{url}");
    assert!(url.contains("version=2"), "{url}");
    assert!(url.contains("q=shoes"), "{url}");
    assert!(!url.contains("null"), "{url}");
    assert!(!url.contains("page="), "{url}");

    let requests = fetcher.requests.lock();
    assert!(requests[0].body.is_none());
    assert_eq!(requests[0].method, HttpMethod::Get);
}

#[tokio::test]
async fn test_get_argument_replaces_configured_pair() {
    let fetcher = Arc::new(RecordingFetcher::ok_text("ok"));
    let executor = HttpExecutor::new(fetcher.clone());
    let tool = tool("https://api.example.com/search?q=old&lang=en", HttpMethod::Get, &["q"]);

    executor
        .execute(&tool, &args(json!({"q": "new"})))
        .await
        .unwrap();

    let url = Url::parse(&fetcher.last_url()).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("lang".to_string(), "en".to_string()),
            ("q".to_string(), "new".to_string())
        ]
    );
}

#[tokio::test]
async fn test_get_without_arguments_keeps_url() {
    let fetcher = Arc::new(RecordingFetcher::ok_text("ok"));
    let executor = HttpExecutor::new(fetcher.clone());
    let tool = tool("https://api.example.com/items?sort=asc", HttpMethod::Get, &["q"]);

    executor.execute(&tool, &Args::new()).await.unwrap();

    assert_eq!(fetcher.last_url(), "https://api.example.com/items?sort=asc");
}

#[tokio::test]
async fn test_get_non_string_arguments() {
    let fetcher = Arc::new(RecordingFetcher::ok_text("ok"));
    let executor = HttpExecutor::new(fetcher.clone());
    let tool = tool("https://api.example.com/items", HttpMethod::Get, &["limit", "exact"]);

    executor
        .execute(&tool, &args(json!({"limit": 10, "exact": false})))
        .await
        .unwrap();

    let url = fetcher.last_url();
    assert!(url.contains("limit=10"));
    assert!(url.contains("exact=false"));
}

#[tokio::test]
async fn test_get_against_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("version", "2"))
        .and(query_param("q", "red shoes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"results":[{"id":1}]}"#, "application/json; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let tool = tool(
        &format!("{}/search?version=2", mock_server.uri()),
        HttpMethod::Get,
        &["q"],
    );
    let output = reqwest_executor()
        .execute(&tool, &args(json!({"q": "red shoes"})))
        .await
        .unwrap();

    assert_eq!(output, ToolOutput::Json(json!({"results": [{"id": 1}]})));
}

#[tokio::test]
async fn test_post_preserves_types() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"flag": true, "count": 42, "tags": [1, 2]})))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tool = tool(
        &format!("{}/items", mock_server.uri()),
        HttpMethod::Post,
        &["flag", "count", "tags", "absent"],
    );
    let output = reqwest_executor()
        .execute(&tool, &args(json!({"flag": true, "count": 42, "tags": [1, 2]})))
        .await
        .unwrap();

    assert_eq!(output, ToolOutput::Text("created".to_string()));
}

#[tokio::test]
async fn test_body_uses_api_parameter_names() {
    let fetcher = Arc::new(RecordingFetcher::ok_text("ok"));
    let executor = HttpExecutor::new(fetcher.clone());
    let mut config = HttpConfig::new("https://api.example.com/users", HttpMethod::Put);
    config
        .param_mapping
        .insert("user_name".to_string(), "userName".to_string());
    config
        .param_mapping
        .insert("nickname".to_string(), "nick".to_string());
    let tool = ToolDefinition::http("update_user", "", InputSchema::object(), config);

    executor
        .execute(&tool, &args(json!({"user_name": "ada", "nickname": null, "extra": 1})))
        .await
        .unwrap();

    let requests = fetcher.requests.lock();
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"userName": "ada", "nick": null}));
    assert!(
        requests[0]
            .headers
            .iter()
            .any(|(k, v)| k == "Content-Type" && v == "application/json")
    );
}

#[tokio::test]
async fn test_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let tool = tool(&url, HttpMethod::Get, &[]);
    let err = reqwest_executor()
        .execute(&tool, &Args::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutorError::HttpStatus { status: 404, .. }));
    assert_eq!(err.to_string(), format!("HTTP 404 from {url}"));
}

#[tokio::test]
async fn test_text_response_verbatim() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("  <p>{\"not\": \"parsed\"}</p>\n")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let tool = tool(&format!("{}/page", mock_server.uri()), HttpMethod::Get, &[]);
    let output = reqwest_executor().execute(&tool, &Args::new()).await.unwrap();

    assert_eq!(output.as_text(), Some("  <p>{\"not\": \"parsed\"}</p>\n"));
}

#[tokio::test]
async fn test_structured_json_suffix() {
    let fetcher = Arc::new(RecordingFetcher {
        response: FetchResponse::new(
            200,
            Some("application/problem+json".to_string()),
            r#"{"title":"ok"}"#,
        ),
        requests: Mutex::new(Vec::new()),
    });
    let executor = HttpExecutor::new(fetcher);
    let tool = tool("https://api.example.com/x", HttpMethod::Get, &[]);

    let output = executor.execute(&tool, &Args::new()).await.unwrap();
    assert_eq!(output, ToolOutput::Json(json!({"title": "ok"})));
}

#[tokio::test]
async fn test_malformed_json_response() {
    let fetcher = Arc::new(RecordingFetcher {
        response: FetchResponse::new(200, Some("application/json".to_string()), "{oops"),
        requests: Mutex::new(Vec::new()),
    });
    let executor = HttpExecutor::new(fetcher);
    let tool = tool("https://api.example.com/x", HttpMethod::Get, &[]);

    let err = executor.execute(&tool, &Args::new()).await.unwrap_err();
    assert!(matches!(err, ExecutorError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_missing_http_config() {
    let executor = HttpExecutor::new(Arc::new(RecordingFetcher::ok_text("")));
    let tool = ToolDefinition::browser(
        "login",
        "",
        InputSchema::object(),
        BrowserConfig::new(vec![BrowserStep::navigate("https://example.com")]),
    );

    let err = executor.execute(&tool, &Args::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "Tool \"login\" has no httpConfig");
}

#[tokio::test]
async fn test_relative_url_rejected() {
    let fetcher = Arc::new(RecordingFetcher::ok_text(""));
    let executor = HttpExecutor::new(fetcher.clone());
    let tool = tool("/search", HttpMethod::Get, &[]);

    let err = executor.execute(&tool, &Args::new()).await.unwrap_err();
    assert!(matches!(err, ExecutorError::InvalidUrl { ref tool, .. } if tool == "search"));
    assert!(fetcher.requests.lock().is_empty());
}

#[tokio::test]
async fn test_network_failure() {
    let executor = HttpExecutor::new(Arc::new(FailingFetcher));
    let tool = tool("https://api.example.com/x", HttpMethod::Delete, &[]);

    let err = executor.execute(&tool, &Args::new()).await.unwrap_err();
    assert!(matches!(err, ExecutorError::Network(ref m) if m.contains("connection refused")));
}
