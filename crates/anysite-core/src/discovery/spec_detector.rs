//! API description probing.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use anysite_protocols::fetch::{FetchRequest, Fetcher};

/// Well-known locations of an OpenAPI/Swagger document, probed in order.
pub const SPEC_PATHS: [&str; 5] = [
    "/openapi.json",
    "/swagger.json",
    "/api-docs",
    "/api-docs.json",
    "/.well-known/openapi.json",
];

/// Whether `doc` looks like an OpenAPI or Swagger document: an object whose
/// `openapi` or `swagger` key holds a non-empty string or a non-zero number.
pub fn is_api_description(doc: &Value) -> bool {
    doc.as_object().is_some_and(|obj| {
        ["openapi", "swagger"]
            .iter()
            .any(|key| obj.get(*key).is_some_and(is_version))
    })
}

fn is_version(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Probes a site for a published API description.
pub struct SpecDetector {
    fetcher: Arc<dyn Fetcher>,
}

impl SpecDetector {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Probe [`SPEC_PATHS`] relative to the origin of `base_url`.
    ///
    /// Returns the first document that parses as JSON and declares an
    /// `openapi` or `swagger` version. Network failures, non-2xx statuses
    /// and unparseable bodies only move on to the next path.
    pub async fn detect(&self, base_url: &Url) -> Option<Value> {
        for probe in SPEC_PATHS {
            let url = match base_url.join(probe) {
                Ok(url) => url,
                Err(e) => {
                    debug!("Cannot build probe URL for {}: {}", probe, e);
                    continue;
                }
            };

            let request = FetchRequest::get(url.clone()).with_header("Accept", "application/json");
            let response = match self.fetcher.fetch(request).await {
                Ok(response) => response,
                Err(e) => {
                    debug!("Spec probe {} failed: {}", url, e);
                    continue;
                }
            };

            if !response.is_success() {
                debug!("Spec probe {} returned HTTP {}", url, response.status);
                continue;
            }

            match serde_json::from_str::<Value>(&response.body) {
                Ok(doc) if is_api_description(&doc) => {
                    info!("Found API description at {}", url);
                    return Some(doc);
                }
                Ok(_) => debug!("Spec probe {} returned JSON without openapi/swagger key", url),
                Err(e) => debug!("Spec probe {} returned non-JSON body: {}", url, e),
            }
        }

        None
    }
}

#[cfg(test)]
#[path = "spec_detector_tests.rs"]
mod tests;
