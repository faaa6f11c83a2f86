//! Default [`Fetcher`] over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

use anysite_protocols::error::FetchError;
use anysite_protocols::fetch::{FetchRequest, FetchResponse, Fetcher};
use anysite_protocols::tool::HttpMethod;

/// Network fetcher backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with the given user agent and per-request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = request.url.to_string();
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.clone())
            } else {
                FetchError::Request {
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.clone(),
            message: e.to_string(),
        })?;

        Ok(FetchResponse::new(status, content_type, body))
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
