//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use crate::error::CdpError;
use crate::page::CdpPage;
use crate::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection to one browser over its browser-level WebSocket.
///
/// Pages are attached in flattened mode, so every page command travels over
/// this single socket tagged with its `sessionId`.
pub struct CdpClient {
    http_endpoint: String,
    http: reqwest::Client,
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
    call_timeout: Duration,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Fetch `/json/version` from a debugging endpoint such as
    /// `http://127.0.0.1:9222`.
    pub async fn version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
        let endpoint = endpoint.trim_end_matches('/');
        let version_url = format!("{}/json/version", endpoint);
        reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .error_for_status()
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))
    }

    /// Connect to Chrome at the given endpoint.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        let version = Self::version(&http_endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let (ws_stream, _) = tokio_tungstenite::connect_async(&version.web_socket_debugger_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;
        let (ws_sink, ws_source) = ws_stream.split();

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let recv_task = tokio::spawn(Self::receive_loop(ws_source, pending.clone()));

        debug!("CDP client connected to {}", version.web_socket_debugger_url);

        Ok(Self {
            http_endpoint,
            http: reqwest::Client::new(),
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            request_id: AtomicU64::new(1),
            pending,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            recv_task,
        })
    }

    /// Per-command reply deadline.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    let resp = match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => resp,
                        Err(e) => {
                            warn!("Failed to parse CDP message: {}", e);
                            continue;
                        }
                    };
                    // Events carry no id and nothing here subscribes to them.
                    let Some(id) = resp.id else { continue };
                    if let Some(tx) = pending.lock().remove(&id) {
                        let result = match resp.error {
                            Some(error) => Err(CdpError::Protocol {
                                code: error.code,
                                message: error.message,
                            }),
                            None => Ok(resp.result.unwrap_or(Value::Null)),
                        };
                        let _ = tx.send(result);
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    debug!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        // Dropping the senders wakes every waiter with SessionClosed.
        pending.lock().clear();
    }

    /// Send a CDP command and wait for its reply.
    pub async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        };
        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let sent = {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await
        };
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(self.call_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Open a blank tab and attach a flattened session to it.
    pub async fn new_page(self: &Arc<Self>, wait_timeout: Duration) -> Result<CdpPage, CdpError> {
        // Chrome requires PUT for /json/new
        let create_url = format!("{}/json/new?about:blank", self.http_endpoint);
        let page_info: PageInfo = self
            .http
            .put(&create_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Created new page: {} - {}", page_info.id, page_info.url);

        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({"targetId": page_info.id, "flatten": true})),
                None,
            )
            .await?;
        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let page = CdpPage::new(self.clone(), page_info.id, session_id, wait_timeout);
        page.enable_domains().await?;
        Ok(page)
    }

    /// Ask the browser to exit.
    pub async fn close_browser(&self) -> Result<(), CdpError> {
        match self.call("Browser.close", None, None).await {
            // The socket may drop before the reply arrives.
            Ok(_) | Err(CdpError::SessionClosed) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
