// tests/config_parsing.rs
//
// CLI parsing, config resolution, duration parsing, URL normalization.

use std::error::Error;
use std::time::Duration;

use clap::Parser;

use watchreload::browser::chrome::normalize_url;
use watchreload::cli::CliArgs;
use watchreload::config::{Config, parse_duration};
use watchreload::errors::WatchreloadError;
use watchreload::proc::CommandSpec;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn parses_common_durations() -> TestResult {
    assert_eq!(parse_duration("250ms")?, Duration::from_millis(250));
    assert_eq!(parse_duration("3s")?, Duration::from_secs(3));
    assert_eq!(parse_duration("1m")?, Duration::from_secs(60));
    assert_eq!(parse_duration("2h")?, Duration::from_secs(7200));
    Ok(())
}

#[test]
fn rejects_malformed_durations() {
    assert!(parse_duration("").is_err());
    assert!(parse_duration("500").is_err());
    assert!(parse_duration("ms").is_err());
    assert!(parse_duration("10d").is_err());
}

#[test]
fn command_spec_splits_program_and_args() {
    let argv: Vec<String> = ["cargo", "run", "--quiet"]
        .into_iter()
        .map(String::from)
        .collect();
    let spec = CommandSpec::from_argv(&argv).expect("non-empty argv");
    assert_eq!(spec.program(), "cargo");
    assert_eq!(spec.args(), ["run", "--quiet"]);
    assert_eq!(spec.to_string(), "cargo run --quiet");
}

#[test]
fn command_spec_rejects_empty_argv() {
    assert!(CommandSpec::from_argv(&[]).is_none());
}

#[test]
fn normalize_url_adds_missing_scheme() {
    assert_eq!(normalize_url("localhost:8000"), "http://localhost:8000");
    assert_eq!(normalize_url("https://example.com"), "https://example.com");
}

#[test]
fn cli_parses_url_and_trailing_command() -> TestResult {
    let args = CliArgs::try_parse_from([
        "watchreload",
        "--url",
        "localhost:3000",
        "cargo",
        "run",
        "--quiet",
    ])?;
    assert_eq!(args.url.as_deref(), Some("localhost:3000"));
    assert_eq!(args.command, ["cargo", "run", "--quiet"]);

    let cfg = Config::from_args(&args)?;
    assert_eq!(cfg.debounce_window, Duration::from_millis(500));
    assert_eq!(cfg.stop_grace_timeout, Duration::from_secs(3));
    assert_eq!(cfg.devtools_addr, "127.0.0.1:9222");
    assert_eq!(cfg.browser_url.as_deref(), Some("localhost:3000"));
    let spec = cfg.command.expect("command given");
    assert_eq!(spec.program(), "cargo");

    Ok(())
}

#[test]
fn config_requires_a_command_or_a_url() -> TestResult {
    let args = CliArgs::try_parse_from(["watchreload"])?;
    let result = Config::from_args(&args);
    assert!(matches!(result, Err(WatchreloadError::Config(_))));
    Ok(())
}

#[test]
fn config_rejects_a_zero_debounce_window() -> TestResult {
    let args =
        CliArgs::try_parse_from(["watchreload", "--debounce", "0ms", "sleep", "60"])?;
    let result = Config::from_args(&args);
    assert!(matches!(result, Err(WatchreloadError::Config(_))));
    Ok(())
}

#[test]
fn custom_debounce_and_grace_are_honoured() -> TestResult {
    let args = CliArgs::try_parse_from([
        "watchreload",
        "--debounce",
        "250ms",
        "--grace",
        "1s",
        "sleep",
        "60",
    ])?;
    let cfg = Config::from_args(&args)?;
    assert_eq!(cfg.debounce_window, Duration::from_millis(250));
    assert_eq!(cfg.stop_grace_timeout, Duration::from_secs(1));
    Ok(())
}
