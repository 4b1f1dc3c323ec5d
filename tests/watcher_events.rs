// tests/watcher_events.rs
//
// Filesystem watcher integration: changes under the root reach the runtime
// channel as opaque events.

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use watchreload::engine::RuntimeEvent;
use watchreload::watch::spawn_watcher;
use watchreload_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

/// Writing a file under the watched root produces a change event.
#[tokio::test]
async fn file_write_produces_a_change_event() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let (tx, mut rx) = mpsc::channel::<RuntimeEvent>(64);
    let _handle = spawn_watcher(dir.path(), tx)?;

    // Give the platform watcher a moment to settle before mutating.
    sleep(Duration::from_millis(250)).await;
    std::fs::write(dir.path().join("observed.txt"), "hello")?;

    let event = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("change event should arrive well within the timeout")
        .expect("channel should stay open while the handle lives");
    assert!(matches!(event, RuntimeEvent::ChangeDetected));

    Ok(())
}

/// Writes in a nested directory created after the watcher started are
/// still observed (recursive mode).
#[tokio::test]
async fn nested_writes_are_observed_recursively() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let nested = dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested)?;

    let (tx, mut rx) = mpsc::channel::<RuntimeEvent>(64);
    let _handle = spawn_watcher(dir.path(), tx)?;

    sleep(Duration::from_millis(250)).await;
    std::fs::write(nested.join("lib.rs"), "pub fn nothing() {}")?;

    let event = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("nested change event should arrive")
        .expect("channel open");
    assert!(matches!(event, RuntimeEvent::ChangeDetected));

    Ok(())
}

/// A missing root is a watcher-initialisation error, reported at spawn.
#[tokio::test]
async fn watching_a_missing_root_fails() {
    init_tracing();

    let (tx, _rx) = mpsc::channel::<RuntimeEvent>(1);
    let result = spawn_watcher("/definitely/not/a/real/watchreload-root", tx);
    assert!(result.is_err());
}
