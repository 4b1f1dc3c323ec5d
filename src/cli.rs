// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchreload`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchreload",
    version,
    about = "Restart a command and/or reload a browser tab on file changes.",
    long_about = None
)]
pub struct CliArgs {
    /// URL to open and live-reload in the browser on change.
    ///
    /// Requires a Chromium-based browser started with
    /// `--remote-debugging-port` (see `--devtools`).
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Directory tree to watch for changes.
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "PATH")]
    pub dir: Option<String>,

    /// Debounce window: changes within one window coalesce into one reload.
    #[arg(long, value_name = "DURATION", default_value = "500ms")]
    pub debounce: String,

    /// Grace period a stopping command gets after SIGINT before SIGKILL.
    #[arg(long, value_name = "DURATION", default_value = "3s")]
    pub grace: String,

    /// Address of the browser's DevTools endpoint.
    #[arg(long, value_name = "HOST:PORT", default_value = "127.0.0.1:9222")]
    pub devtools: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHRELOAD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to run and restart on change, with its arguments.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse arguments, enforcing that at least one of a command or `--url`
/// was given. Prints usage and exits with status 1 otherwise.
pub fn parse() -> CliArgs {
    let args = CliArgs::parse();
    if args.command.is_empty() && args.url.is_none() {
        eprintln!("Usage: watchreload [--url URL] <command> [args ...]");
        std::process::exit(1);
    }
    args
}
