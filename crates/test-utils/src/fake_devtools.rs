use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal DevTools-like HTTP endpoint for exercising the Chrome client.
///
/// Answers `/json/version`, `/json/new` and `/json/close/{id}` with canned
/// JSON and records the request line of every request it serves. Bare TCP
/// probes (connect-then-close, as the reachability loop issues) are
/// tolerated and not recorded.
pub struct FakeDevtools {
    pub addr: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeDevtools {
    pub async fn spawn() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?.to_string();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        match stream.read(&mut chunk).await {
                            Ok(0) => break,
                            Ok(n) => {
                                buf.extend_from_slice(&chunk[..n]);
                                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                    break;
                                }
                            }
                            Err(_) => return,
                        }
                    }
                    if buf.is_empty() {
                        // Reachability probe: connection with no request.
                        return;
                    }

                    let request = String::from_utf8_lossy(&buf);
                    let line = request.lines().next().unwrap_or_default().to_string();
                    log.lock().unwrap().push(line.clone());

                    let body = if line.contains("/json/new") {
                        r#"{"id":"tab-1","type":"page","url":"about:blank"}"#
                    } else if line.contains("/json/version") {
                        r#"{"Browser":"FakeChrome/1.0","Protocol-Version":"1.3"}"#
                    } else {
                        "{}"
                    };
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Ok(Self { addr, requests })
    }

    /// Request lines served so far (e.g. `PUT /json/new?... HTTP/1.1`).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
