// src/proc/handle.rs

use std::process::ExitStatus;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::sync::oneshot;

use crate::errors::{Result, WatchreloadError};

/// Handle for one spawned child process instance.
///
/// Owned exclusively by [`ProcessRunner`](crate::proc::ProcessRunner) and
/// replaced whenever stop/restart supersedes the instance. The child was
/// spawned into its own process group with pgid == pid, so `interrupt` and
/// `kill` reach the whole subtree.
#[derive(Debug)]
pub struct ProcessHandle {
    pid: u32,
    done: oneshot::Receiver<std::io::Result<ExitStatus>>,
}

impl ProcessHandle {
    pub(crate) fn new(pid: u32, done: oneshot::Receiver<std::io::Result<ExitStatus>>) -> Self {
        Self { pid, done }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    fn pgid(&self) -> Pid {
        Pid::from_raw(self.pid as i32)
    }

    /// Send SIGINT to the child's process group.
    pub fn interrupt(&self) -> Result<()> {
        signal::killpg(self.pgid(), Signal::SIGINT).map_err(|source| {
            WatchreloadError::InterruptDelivery {
                pgid: self.pid as i32,
                source,
            }
        })
    }

    /// Send SIGKILL to the child's process group.
    pub fn kill(&self) -> Result<()> {
        signal::killpg(self.pgid(), Signal::SIGKILL).map_err(|source| {
            WatchreloadError::KillDelivery {
                pgid: self.pid as i32,
                source,
            }
        })
    }

    /// Wait for the exit result published by the runner's exit-watcher task.
    ///
    /// Returns `None` if the watcher task went away without publishing
    /// (only possible once the result has already been consumed).
    pub async fn wait(&mut self) -> Option<std::io::Result<ExitStatus>> {
        (&mut self.done).await.ok()
    }
}
