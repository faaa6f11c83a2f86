//! # AnySite Browser (CDP)
//!
//! [`BrowserLauncher`](anysite_protocols::BrowserLauncher) backed by a local
//! Chrome/Chromium driven over the Chrome DevTools Protocol.
//!
//! Every launch starts a private Chrome process with its own throwaway
//! profile directory and debugging port, so concurrent browser tool
//! invocations never share cookies or pages.

mod client;
mod error;
mod launcher;
mod page;
mod protocol;
mod script;

pub use client::CdpClient;
pub use error::CdpError;
pub use launcher::{CdpLauncher, CdpSession, LauncherConfig, find_chrome};
pub use page::CdpPage;
