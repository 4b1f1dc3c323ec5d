// src/reload/coordinator.rs

use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info};

use crate::browser::Browser;
use crate::engine::RuntimeEvent;
use crate::errors::{Result, WatchreloadError};
use crate::proc::ProcessRunner;

/// Coalesces bursts of change events into rate-limited reloads.
///
/// The pending flag holds exactly one slot: the first event of a burst
/// flips Idle→Pending and spawns a reload task; every further event while
/// the task is scheduled-or-executing is dropped. The task waits for a
/// rate-limiter token (window W, burst 1), performs the reload, and flips
/// Pending→Idle — so at most one reload is in flight per coordinator and
/// at most one executes per window.
pub struct ReloadCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    runner: Option<Arc<Mutex<ProcessRunner>>>,
    browser: Option<Arc<Mutex<dyn Browser>>>,
    pending: AtomicBool,
    limiter: DefaultDirectRateLimiter,
    events_tx: mpsc::Sender<RuntimeEvent>,
}

impl ReloadCoordinator {
    /// Build a coordinator over the configured collaborators.
    ///
    /// `window` must be non-zero. `events_tx` is used to escalate errors
    /// the reload task must not absorb.
    pub fn new(
        runner: Option<Arc<Mutex<ProcessRunner>>>,
        browser: Option<Arc<Mutex<dyn Browser>>>,
        window: Duration,
        events_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Result<Self> {
        let quota = Quota::with_period(window)
            .ok_or_else(|| {
                WatchreloadError::Config("debounce window must be non-zero".to_string())
            })?
            .allow_burst(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(quota);

        // Drain the initial burst allowance: the first reload of the
        // process lifetime also waits out a full window, so a burst at
        // startup still coalesces into a single reload.
        let _ = limiter.check();

        Ok(Self {
            inner: Arc::new(Inner {
                runner,
                browser,
                pending: AtomicBool::new(false),
                limiter,
                events_tx,
            }),
        })
    }

    /// Whether a reload task is currently scheduled or executing.
    pub fn is_pending(&self) -> bool {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Handle one change notification.
    ///
    /// The first event of a burst schedules a reload task; later events
    /// are dropped and extend no timer. Never blocks the caller.
    pub fn on_change(&self) {
        if self
            .inner
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("reload already pending; change event coalesced");
            return;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.limiter.until_ready().await;
            let result = reload(&inner).await;
            inner.pending.store(false, Ordering::Release);

            match result {
                Ok(()) => {}
                Err(err @ WatchreloadError::KillDelivery { .. }) => {
                    // The child is unmanageable from here on; surface this
                    // to the runtime instead of absorbing it in the log.
                    let _ = inner.events_tx.send(RuntimeEvent::FatalError(err)).await;
                }
                Err(err) => {
                    error!(error = %err, "reload failed");
                }
            }
        });
    }
}

/// Restart the command, then reload the browser, short-circuiting on the
/// first error.
async fn reload(inner: &Inner) -> Result<()> {
    if let Some(runner) = &inner.runner {
        info!("change detected, restarting command");
        runner.lock().await.restart().await?;
    }
    if let Some(browser) = &inner.browser {
        info!("change detected, reloading browser");
        browser.lock().await.reload().await?;
    }
    Ok(())
}
