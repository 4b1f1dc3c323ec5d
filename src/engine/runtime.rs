// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info};

use crate::browser::Browser;
use crate::engine::{RuntimeEvent, ShutdownPhase};
use crate::errors::Result;
use crate::proc::ProcessRunner;
use crate::reload::ReloadCoordinator;

/// Single-consumer dispatch loop over the runtime event channel.
///
/// Change events are handed to the coordinator (which never blocks the
/// loop); a shutdown request drains the collaborators in order — stop the
/// command, close the browser — with errors logged, then ends the loop.
/// An in-flight reload task is neither awaited nor cancelled; whatever it
/// does after draining begins is discarded by process exit.
pub struct Runtime {
    event_rx: mpsc::Receiver<RuntimeEvent>,
    coordinator: ReloadCoordinator,
    runner: Option<Arc<Mutex<ProcessRunner>>>,
    browser: Option<Arc<Mutex<dyn Browser>>>,
    phase: ShutdownPhase,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(
        event_rx: mpsc::Receiver<RuntimeEvent>,
        coordinator: ReloadCoordinator,
        runner: Option<Arc<Mutex<ProcessRunner>>>,
        browser: Option<Arc<Mutex<dyn Browser>>>,
    ) -> Self {
        Self {
            event_rx,
            coordinator,
            runner,
            browser,
            phase: ShutdownPhase::Running,
        }
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.phase
    }

    /// Main event loop.
    ///
    /// Returns `Ok` after a drained shutdown (or when every sender went
    /// away), `Err` when a background task escalated a fatal error.
    pub async fn run(mut self) -> Result<()> {
        info!("watchreload runtime started");

        while let Some(event) = self.event_rx.recv().await {
            match event {
                RuntimeEvent::ChangeDetected => {
                    debug!("change event received");
                    self.coordinator.on_change();
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("signal received, exiting");
                    self.drain().await;
                    return Ok(());
                }
                RuntimeEvent::FatalError(err) => {
                    self.phase = ShutdownPhase::Terminated;
                    return Err(err);
                }
            }
        }

        info!("runtime event channel closed; exiting");
        Ok(())
    }

    async fn drain(&mut self) {
        self.phase = ShutdownPhase::Draining;
        debug!(phase = ?self.phase, "draining collaborators");

        if let Some(runner) = &self.runner {
            if let Err(err) = runner.lock().await.stop().await {
                error!(error = %err, "error stopping process");
            }
        }
        if let Some(browser) = &self.browser {
            if let Err(err) = browser.lock().await.close().await {
                error!(error = %err, "error closing browser");
            }
        }

        self.phase = ShutdownPhase::Terminated;
        debug!(phase = ?self.phase, "runtime terminated");
    }
}
