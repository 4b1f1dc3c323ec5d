// src/browser/mod.rs

//! Browser live-reload capability.
//!
//! The runtime and the reload coordinator only see the [`Browser`] trait:
//! open a tab on the configured URL, reload it, close it. The production
//! implementation in [`chrome`] drives a Chromium instance over its
//! DevTools HTTP endpoint; tests substitute a recording fake.

use async_trait::async_trait;

use crate::errors::Result;

pub mod chrome;

pub use chrome::Chrome;

/// Live-reload operations on a browser tab.
#[async_trait]
pub trait Browser: Send {
    /// Navigate a tab to the configured URL, first waiting for the target
    /// endpoint to become reachable.
    async fn open(&mut self) -> Result<()>;

    /// Reload the tab opened by [`open`](Browser::open).
    async fn reload(&mut self) -> Result<()>;

    /// Close the tab and disconnect.
    async fn close(&mut self) -> Result<()>;
}
