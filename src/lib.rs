// src/lib.rs

pub mod browser;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod proc;
pub mod reload;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::{Mutex, mpsc};

use crate::browser::{Browser, Chrome};
use crate::cli::CliArgs;
use crate::config::Config;
use crate::engine::{Runtime, RuntimeEvent};
use crate::proc::ProcessRunner;
use crate::reload::ReloadCoordinator;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution from the CLI
/// - the file watcher
/// - the process runner (first spawn is fatal on failure)
/// - the browser client (connect + first navigation fatal on failure)
/// - the reload coordinator
/// - SIGINT/SIGTERM handling and the runtime event loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = Config::from_args(&args)?;

    // Runtime event channel: change events, shutdown requests, fatal errors.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // File watcher; failure to initialise is fatal.
    let _watcher_handle = watch::spawn_watcher(cfg.watch_dir.clone(), rt_tx.clone())?;

    // First spawn of the supervised command; failure is fatal.
    let runner = match cfg.command.clone() {
        Some(spec) => {
            let mut runner = ProcessRunner::new(spec, cfg.stop_grace_timeout);
            runner.start()?;
            Some(Arc::new(Mutex::new(runner)))
        }
        None => None,
    };

    // Browser client. Connecting after the command is started lets the
    // reachability probe overlap with the server's own startup.
    let browser: Option<Arc<Mutex<dyn Browser>>> = match &cfg.browser_url {
        Some(url) => {
            let mut chrome = Chrome::connect(cfg.devtools_addr.clone(), url).await?;
            chrome.open().await?;
            Some(Arc::new(Mutex::new(chrome)))
        }
        None => None,
    };

    // SIGINT / SIGTERM → graceful shutdown.
    {
        let tx = rt_tx.clone();
        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            tokio::select! {
                _ = interrupt.recv() => {}
                _ = terminate.recv() => {}
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let coordinator = ReloadCoordinator::new(
        runner.clone(),
        browser.clone(),
        cfg.debounce_window,
        rt_tx.clone(),
    )?;

    Runtime::new(rt_rx, coordinator, runner, browser).run().await?;
    Ok(())
}
