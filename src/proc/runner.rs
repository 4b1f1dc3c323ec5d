// src/proc/runner.rs

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::errors::{Result, WatchreloadError};
use crate::proc::{CommandSpec, ProcessHandle};

/// Manages running, stopping, and restarting the supervised command.
///
/// Invariants:
/// - at most one [`ProcessHandle`] is current at any time;
/// - the running flag is true iff the current handle's process has not yet
///   exited, and is only read/written under its mutex;
/// - each `start` installs a fresh flag together with the fresh handle, so
///   a late exit of a superseded instance never touches the current state.
#[derive(Debug)]
pub struct ProcessRunner {
    spec: CommandSpec,
    grace: Duration,
    current: Option<ProcessHandle>,
    running: Arc<Mutex<bool>>,
}

impl ProcessRunner {
    pub fn new(spec: CommandSpec, grace: Duration) -> Self {
        Self {
            spec,
            grace,
            current: None,
            running: Arc::new(Mutex::new(false)),
        }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Whether the current instance is still running.
    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }

    /// Pid of the current instance, if any was started.
    pub fn current_pid(&self) -> Option<u32> {
        self.current.as_ref().map(ProcessHandle::pid)
    }

    /// Spawn a fresh instance of the command template.
    ///
    /// The child inherits our stdout/stderr and lands in its own process
    /// group. A background task awaits its exit, flips the running flag
    /// under the lock and publishes the exit result on the handle's
    /// completion channel.
    pub fn start(&mut self) -> Result<()> {
        info!(cmd = %self.spec, "starting command");

        let mut child = self
            .spec
            .to_command()
            .spawn()
            .map_err(WatchreloadError::Spawn)?;
        let pid = child.id().ok_or_else(|| {
            WatchreloadError::Spawn(std::io::Error::other("spawned child has no pid"))
        })?;

        let running = Arc::new(Mutex::new(true));
        let (done_tx, done_rx) = oneshot::channel();

        let watcher_running = Arc::clone(&running);
        tokio::spawn(async move {
            let result = child.wait().await;
            info!(pid, "command exited");
            *watcher_running.lock().unwrap() = false;
            // The receiver is dropped when stop/restart replaced the handle;
            // a oneshot send never blocks either way.
            let _ = done_tx.send(result);
        });

        self.running = running;
        self.current = Some(ProcessHandle::new(pid, done_rx));
        debug!(pid, "command running in new process group");
        Ok(())
    }

    /// Signal the current instance to stop and wait for it to exit.
    ///
    /// No-op when nothing was started or the instance already exited.
    /// Sends SIGINT to the process group, waits up to the grace period for
    /// the completion channel, then escalates to SIGKILL. The escalation is
    /// logged, not an error; a failed SIGKILL delivery is an error since the
    /// child is unmanageable from here on.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(handle) = self.current.as_mut() else {
            return Ok(());
        };
        if !*self.running.lock().unwrap() {
            return Ok(());
        }

        info!(pid = handle.pid(), "sending SIGINT to process group");
        handle.interrupt()?;

        match timeout(self.grace, handle.wait()).await {
            Ok(_) => Ok(()),
            Err(_) => {
                handle.kill()?;
                warn!(
                    pid = handle.pid(),
                    grace = ?self.grace,
                    "timed out waiting for command to stop; killed process group"
                );
                Ok(())
            }
        }
    }

    /// Stop the current instance, then start a new one from the template.
    ///
    /// Propagates the first error; `start` is not attempted when `stop`
    /// fails.
    pub async fn restart(&mut self) -> Result<()> {
        self.stop().await?;
        self.start()
    }
}
