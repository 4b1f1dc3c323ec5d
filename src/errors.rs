// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchreloadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to spawn command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed to interrupt process group {pgid}: {source}")]
    InterruptDelivery {
        pgid: i32,
        source: nix::errno::Errno,
    },

    #[error("Failed to kill process group {pgid}: {source}")]
    KillDelivery {
        pgid: i32,
        source: nix::errno::Errno,
    },

    #[error("Failed to initialise file watcher: {0}")]
    WatcherInit(#[from] notify::Error),

    #[error("Browser connect error: {0}")]
    BrowserConnect(#[source] reqwest::Error),

    #[error("Browser navigate error: {0}")]
    BrowserNavigate(#[source] reqwest::Error),

    #[error("Browser reload error: {0}")]
    BrowserReload(#[source] reqwest::Error),

    #[error("Browser close error: {0}")]
    BrowserClose(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WatchreloadError>;
