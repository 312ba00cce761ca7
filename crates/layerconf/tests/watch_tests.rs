//! Integration tests for live updates: file watching and polling.

#![cfg(feature = "watch")]

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;

use layerconf::sources::{FileSource, PollSource};
use layerconf::{ChangeMode, ChangeSet, Config, ConfigBuilder, ConfigSource, FlatMap, Result};
use tempfile::tempdir;

/// Polls `predicate` until it holds or the timeout elapses.
fn wait_for(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        thread::sleep(Duration::from_millis(25));
    }

    predicate()
}

// ============================================================================
// File Watching
// ============================================================================

#[test]
fn file_change_reloads_provider_and_fires_token() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"port": 8080}"#).unwrap();

    let root = ConfigBuilder::new()
        .add(FileSource::new(&path).reload_on_change(true))
        .build()
        .unwrap();

    assert_eq!(root.get_int("/port").unwrap(), 8080);

    fs::write(&path, r#"{"port": 9090}"#).unwrap();

    // The watch thread swaps the snapshot in directly.
    assert!(wait_for(Duration::from_secs(5), || {
        root.try_get_int("/port", 0) == 9090
    }));

    // The token fired so the selective sweep would include this provider.
    assert!(root.providers()[0].change_token().has_changed());

    root.reload().unwrap();
    assert!(!root.providers()[0].change_token().has_changed());
}

#[test]
fn change_callback_receives_the_diff() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"port": 8080, "gone": true}"#).unwrap();

    let (tx, rx) = unbounded::<ChangeSet>();

    let root = ConfigBuilder::new()
        .add(
            FileSource::new(&path)
                .reload_on_change(true)
                .on_change(move |changes| {
                    let _ = tx.send(changes.clone());
                }),
        )
        .build()
        .unwrap();

    fs::write(&path, r#"{"port": 9090, "fresh": 1}"#).unwrap();

    let changes = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("change callback should fire");

    assert_eq!(changes.len(), 3);

    let by_key = |key: &str| {
        changes
            .changes()
            .iter()
            .find(|c| c.key == key)
            .unwrap_or_else(|| panic!("missing change for {key}"))
    };

    assert_eq!(by_key("/port").mode, ChangeMode::Modified);
    assert_eq!(by_key("/fresh").mode, ChangeMode::Created);
    assert_eq!(by_key("/gone").mode, ChangeMode::Removed);

    drop(root);
}

#[test]
fn rewriting_identical_content_is_suppressed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"port": 8080}"#).unwrap();

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in_callback = fired.clone();

    let root = ConfigBuilder::new()
        .add(
            FileSource::new(&path)
                .reload_on_change(true)
                .on_change(move |_| {
                    fired_in_callback.fetch_add(1, Ordering::SeqCst);
                }),
        )
        .build()
        .unwrap();

    // Same bytes, so the reload diff is empty and must not notify.
    fs::write(&path, r#"{"port": 8080}"#).unwrap();

    thread::sleep(Duration::from_millis(600));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!root.providers()[0].change_token().has_changed());
}

#[test]
fn dispose_stops_the_watcher() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"port": 8080}"#).unwrap();

    let mut root = ConfigBuilder::new()
        .add(FileSource::new(&path).reload_on_change(true))
        .build()
        .unwrap();

    root.dispose();

    // After dispose the provider is empty and stays empty.
    fs::write(&path, r#"{"port": 9090}"#).unwrap();
    thread::sleep(Duration::from_millis(400));

    assert!(root.is_empty());
}

// ============================================================================
// Polling
// ============================================================================

/// A source whose content the test mutates while a poll loop observes it,
/// standing in for a remote key-value backend.
struct SharedSource {
    data: Arc<Mutex<FlatMap>>,
}

impl ConfigSource for SharedSource {
    fn name(&self) -> &str {
        "shared"
    }

    fn load(&self) -> Result<FlatMap> {
        Ok(self.data.lock().unwrap().clone())
    }
}

#[test]
fn poll_source_picks_up_backend_changes() {
    let mut initial = FlatMap::new();
    initial.insert("/limit".to_string(), 10u32.into());

    let data = Arc::new(Mutex::new(initial));

    let (tx, rx) = unbounded::<usize>();

    let root = ConfigBuilder::new()
        .add(
            PollSource::new(
                SharedSource { data: data.clone() },
                Duration::from_millis(50),
            )
            .on_change(move |changes| {
                let _ = tx.send(changes.len());
            }),
        )
        .build()
        .unwrap();

    assert_eq!(root.get_uint("/limit").unwrap(), 10);

    data.lock().unwrap().insert("/limit".to_string(), 20u32.into());

    assert!(wait_for(Duration::from_secs(5), || {
        root.try_get_uint("/limit", 0) == 20
    }));

    assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), 1);
    assert!(root.providers()[0].change_token().has_changed());
}

#[test]
fn poll_with_stable_backend_never_fires() {
    let mut initial = FlatMap::new();
    initial.insert("/limit".to_string(), 10u32.into());

    let root = ConfigBuilder::new()
        .add(PollSource::new(
            SharedSource {
                data: Arc::new(Mutex::new(initial)),
            },
            Duration::from_millis(25),
        ))
        .build()
        .unwrap();

    thread::sleep(Duration::from_millis(300));

    assert!(!root.providers()[0].change_token().has_changed());
    assert_eq!(root.get_uint("/limit").unwrap(), 10);
}
