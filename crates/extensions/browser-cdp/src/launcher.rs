//! Chrome process management.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use anysite_protocols::{BrowserError, BrowserLauncher, BrowserPage, BrowserSession};

use crate::client::CdpClient;

/// File Chrome writes into its profile directory once the debugging
/// server listens. First line is the port.
const ACTIVE_PORT_FILE: &str = "DevToolsActivePort";
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const EXIT_GRACE: Duration = Duration::from_secs(5);

/// Launch settings.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Chrome executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    /// Deadline for the debugging endpoint to come up.
    pub launch_timeout: Duration,
    /// Deadline for page loads and `waitFor` steps.
    pub wait_timeout: Duration,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            launch_timeout: Duration::from_secs(20),
            wait_timeout: Duration::from_secs(30),
        }
    }
}

/// Find a Chrome or Chromium executable in the usual install locations.
pub fn find_chrome() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    let paths: &[&str] = &[
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    ];

    #[cfg(target_os = "linux")]
    let paths: &[&str] = &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    #[cfg(target_os = "windows")]
    let paths: &[&str] = &[
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let paths: &[&str] = &[];

    paths.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Parse the port from the contents of `DevToolsActivePort`.
fn parse_active_port(contents: &str) -> Option<u16> {
    contents.lines().next()?.trim().parse().ok()
}

/// [`BrowserLauncher`] that starts a private headless Chrome per session.
pub struct CdpLauncher {
    config: LauncherConfig,
}

impl CdpLauncher {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    fn chrome_path(&self) -> Result<PathBuf, BrowserError> {
        self.config
            .chrome_path
            .clone()
            .or_else(find_chrome)
            .ok_or(BrowserError::ChromeNotFound)
    }

    fn command(&self, chrome_path: &Path, profile_dir: &Path) -> Command {
        let mut cmd = Command::new(chrome_path);
        cmd.arg("--remote-debugging-port=0")
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--metrics-recording-only")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        if self.config.headless {
            cmd.arg("--headless=new");
        }
        cmd.arg("about:blank");
        cmd
    }

    /// Wait until Chrome reports its debugging port.
    async fn wait_for_port(&self, child: &mut Child, profile_dir: &Path) -> Result<u16, BrowserError> {
        let port_file = profile_dir.join(ACTIVE_PORT_FILE);
        let start = Instant::now();
        loop {
            if let Ok(Some(status)) = child.try_wait() {
                return Err(BrowserError::LaunchFailed(format!(
                    "Chrome exited during startup ({})",
                    status
                )));
            }
            if let Ok(contents) = tokio::fs::read_to_string(&port_file).await {
                if let Some(port) = parse_active_port(&contents) {
                    return Ok(port);
                }
            }
            if start.elapsed() > self.config.launch_timeout {
                return Err(BrowserError::LaunchFailed(format!(
                    "Chrome failed to start within {}s",
                    self.config.launch_timeout.as_secs()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl BrowserLauncher for CdpLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let chrome_path = self.chrome_path()?;
        let profile = tempfile::Builder::new()
            .prefix("anysite-chrome-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed(format!("profile directory: {}", e)))?;

        let mut child = self
            .command(&chrome_path, profile.path())
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;
        info!("Chrome launched with PID: {:?}", child.id());

        let port = self.wait_for_port(&mut child, profile.path()).await?;
        let endpoint = format!("http://127.0.0.1:{}", port);
        let client = CdpClient::connect(&endpoint).await?;
        debug!("Connected to Chrome at {}", endpoint);

        Ok(Box::new(CdpSession {
            client: Arc::new(client),
            child,
            profile: Some(profile),
            wait_timeout: self.config.wait_timeout,
            closed: false,
        }))
    }
}

/// One running Chrome process and its throwaway profile.
pub struct CdpSession {
    client: Arc<CdpClient>,
    child: Child,
    profile: Option<TempDir>,
    wait_timeout: Duration,
    closed: bool,
}

#[async_trait]
impl BrowserSession for CdpSession {
    async fn new_page(&mut self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        if self.closed {
            return Err(BrowserError::Closed);
        }
        let page = self.client.new_page(self.wait_timeout).await?;
        Ok(Box::new(page))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Err(e) = self.client.close_browser().await {
            warn!("Browser.close failed: {}", e);
        }
        if tokio::time::timeout(EXIT_GRACE, self.child.wait()).await.is_err() {
            warn!("Chrome did not exit in time, killing it");
            self.child
                .kill()
                .await
                .map_err(|e| BrowserError::Protocol(format!("kill Chrome: {}", e)))?;
        }
        if let Some(profile) = self.profile.take() {
            if let Err(e) = profile.close() {
                warn!("Failed to remove Chrome profile: {}", e);
            }
        }
        info!("Chrome session closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
