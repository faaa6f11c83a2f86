//! Browser automation protocol.
//!
//! The browser executor acquires one [`BrowserSession`] per tool invocation
//! from a [`BrowserLauncher`], opens a single page, runs its steps and then
//! closes the session.

use async_trait::async_trait;

use crate::error::BrowserError;

/// Source of isolated browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Start a fresh browser instance.
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

/// A running browser instance owned by one invocation.
#[async_trait]
pub trait BrowserSession: Send {
    /// Open a new page.
    async fn new_page(&mut self) -> Result<Box<dyn BrowserPage>, BrowserError>;

    /// Shut the browser down and release its resources.
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// A single automated page.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Navigate to `url` and wait for the page to load.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Replace the value of the input matching `selector`.
    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Click the element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// Block until an element matching `selector` exists.
    async fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError>;

    /// Text content of the first element matching `selector`.
    ///
    /// `Ok(None)` means the element exists but has no text content; a
    /// missing element is [`BrowserError::ElementNotFound`].
    async fn text_content(&self, selector: &str) -> Result<Option<String>, BrowserError>;

    /// Current page URL.
    async fn url(&self) -> Result<String, BrowserError>;
}
