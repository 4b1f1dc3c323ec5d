// tests/chrome_client.rs
//
// Chrome DevTools client against a local fake endpoint.

use std::error::Error;

use watchreload::browser::{Browser, Chrome};
use watchreload::errors::WatchreloadError;
use watchreload_test_utils::{FakeDevtools, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

/// Full session against the fake endpoint: connect probes the version,
/// open creates a tab, reload replaces it, close removes it.
#[tokio::test]
async fn chrome_client_drives_the_devtools_endpoint() -> TestResult {
    init_tracing();

    let devtools = FakeDevtools::spawn().await?;

    // The page URL points at the fake endpoint too, so the reachability
    // probe finds an open port immediately.
    let mut chrome = Chrome::connect(devtools.addr.clone(), &devtools.addr).await?;
    chrome.open().await?;
    chrome.reload().await?;
    chrome.close().await?;

    let requests = devtools.requests();
    assert_eq!(requests.len(), 5, "unexpected requests: {requests:?}");
    assert!(requests[0].starts_with("GET /json/version"));
    assert!(requests[1].starts_with("PUT /json/new"));
    // Reload replaces the tracked tab: close the old one, open a new one.
    assert!(requests[2].starts_with("GET /json/close/tab-1"));
    assert!(requests[3].starts_with("PUT /json/new"));
    assert!(requests[4].starts_with("GET /json/close/tab-1"));

    Ok(())
}

/// The opened tab carries the normalized page URL in the query string.
#[tokio::test]
async fn open_navigates_to_the_normalized_url() -> TestResult {
    init_tracing();

    let devtools = FakeDevtools::spawn().await?;
    let mut chrome = Chrome::connect(devtools.addr.clone(), &devtools.addr).await?;
    chrome.open().await?;

    let requests = devtools.requests();
    let new_request = requests
        .iter()
        .find(|line| line.contains("/json/new"))
        .expect("a /json/new request");
    // The scheme-less input gains http:// before being percent-encoded.
    assert!(
        new_request.contains("http%3A%2F%2F"),
        "unexpected navigation request: {new_request}"
    );

    Ok(())
}

/// No DevTools endpoint listening means connect fails up front.
#[tokio::test]
async fn connect_fails_when_devtools_endpoint_is_absent() {
    init_tracing();

    // Port 9 (discard) is assumed closed on test machines.
    let result = Chrome::connect("127.0.0.1:9", "localhost:8000").await;
    assert!(matches!(result, Err(WatchreloadError::BrowserConnect(_))));
}
