//! Network fetch protocol.
//!
//! Discovery and the HTTP executor never talk to the network directly; they
//! go through an injected [`Fetcher`], which lets callers substitute the
//! transport (tests, proxies, recorded responses).

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;
use crate::tool::HttpMethod;

/// An outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl FetchRequest {
    /// A GET request with no headers.
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the content type declares JSON (`application/json` or a
    /// `+json` structured suffix).
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|ct| {
            let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
    }
}

/// Injectable network fetch.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform the request and read the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors; errors are
    /// reserved for transport failures.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError>;
}
