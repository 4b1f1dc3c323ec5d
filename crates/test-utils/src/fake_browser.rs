use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use watchreload::browser::Browser;
use watchreload::errors::Result;

/// A fake browser that records every call into a shared log.
///
/// The log is shared via `Arc` so tests keep a handle to it after the
/// browser has been moved into the coordinator/runtime under test.
pub struct FakeBrowser {
    calls: Arc<Mutex<Vec<String>>>,
    fail_reloads: bool,
}

impl FakeBrowser {
    pub fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            calls,
            fail_reloads: false,
        }
    }

    /// Variant whose `reload` always fails, for error-path tests.
    pub fn failing(calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            calls,
            fail_reloads: true,
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn open(&mut self) -> Result<()> {
        self.record("open");
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        self.record("reload");
        if self.fail_reloads {
            return Err(anyhow::anyhow!("fake reload failure").into());
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.record("close");
        Ok(())
    }
}
