// src/browser/chrome.rs

//! Live-reload client for a Chromium browser, backed by the DevTools HTTP
//! endpoint of an instance started with `--remote-debugging-port`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::net::TcpStream;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, warn};
use url::Url;

use crate::browser::Browser;
use crate::errors::{Result, WatchreloadError};

/// Overall budget for waiting on the page host before navigating.
const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between TCP reachability probes.
const PROBE_INTERVAL: Duration = Duration::from_millis(10);
/// Per-probe connect budget.
const PROBE_CONNECT_TIMEOUT: Duration = Duration::from_millis(250);
/// Budget for each DevTools HTTP request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Tab descriptor returned by the DevTools `/json/new` endpoint.
#[derive(Debug, Deserialize)]
struct TargetInfo {
    id: String,
}

/// Chromium live-reload client.
///
/// Holds the DevTools address, the normalized page URL, the host probed
/// for reachability before each navigation, and the id of the tab it
/// manages. Reloading replaces the tab through the HTTP endpoint.
pub struct Chrome {
    client: reqwest::Client,
    devtools: String,
    url: String,
    probe_host: String,
    target_id: Option<String>,
}

impl Chrome {
    /// Connect to the DevTools endpoint and prepare a client for `url`.
    ///
    /// Verifies the endpoint answers `/json/version`; a browser that is not
    /// listening there is a startup failure.
    pub async fn connect(devtools_addr: impl Into<String>, url: &str) -> Result<Self> {
        let devtools = devtools_addr.into();
        let url = normalize_url(url);
        let parsed = Url::parse(&url)
            .map_err(|e| WatchreloadError::Config(format!("invalid URL '{url}': {e}")))?;
        let probe_host = probe_host(&parsed)?;

        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(WatchreloadError::BrowserConnect)?;

        client
            .get(format!("http://{devtools}/json/version"))
            .send()
            .await
            .map_err(WatchreloadError::BrowserConnect)?
            .error_for_status()
            .map_err(WatchreloadError::BrowserConnect)?;

        info!(devtools = %devtools, "connected to browser DevTools endpoint");

        Ok(Self {
            client,
            devtools,
            url,
            probe_host,
            target_id: None,
        })
    }

    /// Poll the page host with TCP probes until it accepts a connection.
    ///
    /// An unreachable host after the overall budget is logged and ignored:
    /// the navigation is issued anyway and the browser shows its own error,
    /// which is more useful than silently skipping the reload.
    async fn wait_for_reachability(&self) {
        debug!(host = %self.probe_host, "waiting for page host to become reachable");
        let deadline = Instant::now() + REACHABILITY_TIMEOUT;
        loop {
            if let Ok(Ok(_)) =
                timeout(PROBE_CONNECT_TIMEOUT, TcpStream::connect(&self.probe_host)).await
            {
                debug!(host = %self.probe_host, "page host reachable");
                return;
            }
            if Instant::now() >= deadline {
                warn!(
                    host = %self.probe_host,
                    timeout = ?REACHABILITY_TIMEOUT,
                    "page host not reachable; navigating anyway"
                );
                return;
            }
            sleep(PROBE_INTERVAL).await;
        }
    }

    async fn open_tab(&mut self) -> std::result::Result<(), reqwest::Error> {
        let endpoint = format!(
            "http://{}/json/new?{}",
            self.devtools,
            urlencoding::encode(&self.url)
        );
        // /json/new requires PUT since Chromium 111.
        let target: TargetInfo = self
            .client
            .put(&endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(target = %target.id, url = %self.url, "opened browser tab");
        self.target_id = Some(target.id);
        Ok(())
    }

    async fn close_tab(&mut self) -> std::result::Result<(), reqwest::Error> {
        if let Some(id) = self.target_id.take() {
            let endpoint = format!("http://{}/json/close/{}", self.devtools, id);
            self.client.get(&endpoint).send().await?.error_for_status()?;
            debug!(target = %id, "closed browser tab");
        }
        Ok(())
    }
}

#[async_trait]
impl Browser for Chrome {
    async fn open(&mut self) -> Result<()> {
        self.wait_for_reachability().await;
        info!(url = %self.url, "opening browser tab");
        self.open_tab()
            .await
            .map_err(WatchreloadError::BrowserNavigate)
    }

    async fn reload(&mut self) -> Result<()> {
        self.wait_for_reachability().await;
        info!(url = %self.url, "reloading browser tab");
        if let Err(err) = self.close_tab().await {
            // The stale tab stays open; the fresh one still gets the page.
            warn!(error = %err, "failed to close previous browser tab");
        }
        self.open_tab()
            .await
            .map_err(WatchreloadError::BrowserReload)
    }

    async fn close(&mut self) -> Result<()> {
        self.close_tab().await.map_err(WatchreloadError::BrowserClose)
    }
}

/// Prepend `http://` when the URL carries no scheme.
pub fn normalize_url(raw: &str) -> String {
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

/// `host:port` to probe for reachability before navigating.
fn probe_host(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| WatchreloadError::Config(format!("URL '{url}' has no host")))?;
    let port = url.port_or_known_default().unwrap_or(80);
    Ok(format!("{host}:{port}"))
}
