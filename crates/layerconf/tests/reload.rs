//! Integration tests for the change-token reload protocol.

use std::fs;

use layerconf::sources::FileSource;
use layerconf::{Config, ConfigBuilder};
use tempfile::tempdir;

// ============================================================================
// Selective Reload
// ============================================================================

#[test]
fn reload_only_touches_providers_whose_token_fired() {
    let dir = tempdir().unwrap();
    let base_path = dir.path().join("base.json");
    let over_path = dir.path().join("override.json");
    fs::write(&base_path, r#"{"base": 1}"#).unwrap();
    fs::write(&over_path, r#"{"over": 1}"#).unwrap();

    let root = ConfigBuilder::new()
        .add(FileSource::new(&base_path))
        .add(FileSource::new(&over_path))
        .build()
        .unwrap();

    // Both files change on disk, but no token has fired yet.
    fs::write(&base_path, r#"{"base": 2}"#).unwrap();
    fs::write(&over_path, r#"{"over": 2}"#).unwrap();

    root.reload().unwrap();

    // Neither provider was signaled, so neither may be reloaded.
    assert_eq!(root.get_int("/base").unwrap(), 1);
    assert_eq!(root.get_int("/over").unwrap(), 1);

    // Last-added source sits at index 0; signal only that provider.
    let over_provider = &root.providers()[0];
    assert_eq!(over_provider.source_name(), format!("file:{}", over_path.display()));
    over_provider.change_token().mark_changed();

    root.reload().unwrap();

    // The signaled provider picked up the new content...
    assert_eq!(root.get_int("/over").unwrap(), 2);
    // ...the unsignaled one kept its data despite the on-disk change.
    assert_eq!(root.get_int("/base").unwrap(), 1);
}

#[test]
fn successful_reload_resets_the_token() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"a": 1}"#).unwrap();

    let root = ConfigBuilder::new().add(FileSource::new(&path)).build().unwrap();
    let token = root.providers()[0].change_token();

    token.mark_changed();
    root.reload().unwrap();

    assert!(!token.has_changed());

    // With the token consumed, a further sweep is a no-op again.
    fs::write(&path, r#"{"a": 2}"#).unwrap();
    root.reload().unwrap();
    assert_eq!(root.get_int("/a").unwrap(), 1);
}

// ============================================================================
// Graceful Degradation
// ============================================================================

#[test]
fn failed_reload_keeps_last_good_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"a": 1}"#).unwrap();

    let root = ConfigBuilder::new().add(FileSource::new(&path)).build().unwrap();

    fs::write(&path, "{ definitely not json").unwrap();
    root.providers()[0].change_token().mark_changed();

    // The sweep reports the failure but the previous data survives.
    assert!(root.reload().is_err());
    assert_eq!(root.get_int("/a").unwrap(), 1);
}

#[test]
fn failed_reload_leaves_other_providers_reloaded() {
    let dir = tempdir().unwrap();
    let good_path = dir.path().join("good.json");
    let bad_path = dir.path().join("bad.json");
    fs::write(&good_path, r#"{"good": 1}"#).unwrap();
    fs::write(&bad_path, r#"{"bad": 1}"#).unwrap();

    let root = ConfigBuilder::new()
        .add(FileSource::new(&bad_path))
        .add(FileSource::new(&good_path))
        .build()
        .unwrap();

    fs::write(&good_path, r#"{"good": 2}"#).unwrap();
    fs::write(&bad_path, "oops").unwrap();

    for provider in root.providers() {
        provider.change_token().mark_changed();
    }

    // The sweep visits every signaled provider before reporting the failure.
    assert!(root.reload().is_err());
    assert_eq!(root.get_int("/good").unwrap(), 2);
    assert_eq!(root.get_int("/bad").unwrap(), 1);
}

// ============================================================================
// Direct Provider Reload
// ============================================================================

#[test]
fn provider_reload_is_wholesale_replacement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"a": 1, "b": 2}"#).unwrap();

    let root = ConfigBuilder::new().add(FileSource::new(&path)).build().unwrap();

    fs::write(&path, r#"{"a": 10}"#).unwrap();
    root.providers()[0].reload().unwrap();

    assert_eq!(root.get_int("/a").unwrap(), 10);
    // `/b` vanished with the replacement; reload never merges.
    assert_eq!(root.get("/b"), None);
}
