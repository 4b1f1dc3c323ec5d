// src/config.rs

//! Runtime configuration, built once from the CLI and passed into
//! constructors as a plain value.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::errors::{Result, WatchreloadError};
use crate::proc::CommandSpec;

/// Resolved configuration for one `watchreload` invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Command template to run and restart; `None` for browser-only mode.
    pub command: Option<CommandSpec>,
    /// URL to open and reload in the browser; `None` for command-only mode.
    pub browser_url: Option<String>,
    /// Root of the directory tree to watch.
    pub watch_dir: PathBuf,
    /// Debounce window: at most one reload per window. Must be non-zero.
    pub debounce_window: Duration,
    /// How long a stopping command gets after SIGINT before SIGKILL.
    pub stop_grace_timeout: Duration,
    /// Address of the browser's DevTools endpoint.
    pub devtools_addr: String,
}

impl Config {
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let command = CommandSpec::from_argv(&args.command);
        if command.is_none() && args.url.is_none() {
            return Err(WatchreloadError::Config(
                "nothing to do: give a command and/or --url".to_string(),
            ));
        }

        let debounce_window = parse_duration(&args.debounce)
            .map_err(|e| WatchreloadError::Config(format!("invalid --debounce: {e}")))?;
        if debounce_window.is_zero() {
            return Err(WatchreloadError::Config(
                "--debounce must be non-zero".to_string(),
            ));
        }

        let stop_grace_timeout = parse_duration(&args.grace)
            .map_err(|e| WatchreloadError::Config(format!("invalid --grace: {e}")))?;

        let watch_dir = match &args.dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()?,
        };

        Ok(Self {
            command,
            browser_url: args.url.clone(),
            watch_dir,
            debounce_window,
            stop_grace_timeout,
            devtools_addr: args.devtools.clone(),
        })
    }
}

/// Parse a compact duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 60 * 60)),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
