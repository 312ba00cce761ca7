//! Integration tests for provider precedence and the merge engine.

use layerconf::sources::{JsonSource, MemorySource};
use layerconf::{Config, ConfigBuilder, ConfigValue, Error};

// ============================================================================
// Disjoint Key Sets
// ============================================================================

#[test]
fn disjoint_providers_each_own_their_keys() {
    let root = ConfigBuilder::new()
        .add(MemorySource::new().with("db/host", "localhost"))
        .add(MemorySource::new().with("log/level", "info"))
        .build()
        .unwrap();

    assert_eq!(root.get_string("/db/host").unwrap(), "localhost");
    assert_eq!(root.get_string("/log/level").unwrap(), "info");
    assert_eq!(root.get("/neither"), None);
}

// ============================================================================
// Overlapping Key Sets
// ============================================================================

#[test]
fn override_layer_wins_for_shared_keys() {
    let root = ConfigBuilder::new()
        .add(
            MemorySource::new()
                .with("port", 8080u16)
                .with("host", "base-host"),
        )
        .add(MemorySource::new().with("port", 9090u16))
        .build()
        .unwrap();

    // The shared key resolves to the override layer.
    assert_eq!(root.get_int("/port").unwrap(), 9090);

    // The untouched key still resolves to the base layer.
    assert_eq!(root.get_string("/host").unwrap(), "base-host");
}

#[test]
fn three_layers_resolve_in_reverse_registration_order() {
    let root = ConfigBuilder::new()
        .add(MemorySource::new().with("k", "defaults"))
        .add(MemorySource::new().with("k", "file"))
        .add(MemorySource::new().with("k", "env"))
        .build()
        .unwrap();

    assert_eq!(root.get_string("/k").unwrap(), "env");
}

#[test]
fn formats_layer_over_each_other() {
    let root = ConfigBuilder::new()
        .add(JsonSource::new(
            r#"{"db": {"host": "json-host", "port": 5432}}"#,
        ))
        .add(MemorySource::new().with("db/host", "override-host"))
        .build()
        .unwrap();

    assert_eq!(root.get_string("/db/host").unwrap(), "override-host");
    assert_eq!(root.get_int("/db/port").unwrap(), 5432);
}

// ============================================================================
// Combined Map Semantics
// ============================================================================

#[test]
fn bulk_export_collapses_duplicates_to_highest_precedence() {
    let root = ConfigBuilder::new()
        .add(
            MemorySource::new()
                .with("shared", "low")
                .with("low_only", 1u32),
        )
        .add(
            MemorySource::new()
                .with("shared", "high")
                .with("high_only", 2u32),
        )
        .build()
        .unwrap();

    let pairs = root.to_key_value_pairs();
    assert_eq!(pairs.len(), 3);

    let shared = pairs.iter().find(|p| p.key == "/shared").unwrap();
    assert_eq!(shared.value, ConfigValue::from("high"));

    // The combined map must produce identical results to per-key get.
    for pair in &pairs {
        assert_eq!(root.get(&pair.key).as_ref(), Some(&pair.value));
    }

    assert_eq!(root.keys().len(), root.values().len());
}

// ============================================================================
// Typed Access Through the Root
// ============================================================================

#[test]
fn try_getters_default_on_missing_keys() {
    let root = ConfigBuilder::new()
        .add(MemorySource::new().with("present", 1u32))
        .build()
        .unwrap();

    assert_eq!(root.try_get_int("/missing", 7), 7);
    assert_eq!(root.try_get_string("/missing", "d".into()), "d");
    assert!(root.try_get_bool("/missing", true));
}

#[test]
fn typed_getter_errors_carry_the_failure_kind() {
    let root = ConfigBuilder::new()
        .add(
            MemorySource::new()
                .with("name", "service")
                .with("port", 8080u16),
        )
        .build()
        .unwrap();

    assert!(matches!(
        root.get_int("/missing"),
        Err(Error::KeyNotFound { .. })
    ));
    assert!(matches!(root.get_int(""), Err(Error::InvalidArgument { .. })));
    assert!(matches!(
        root.get_int("/name"),
        Err(Error::Conversion { .. })
    ));
    // 8080 does not fit a byte; narrowing out of range is a conversion error.
    assert!(root.get_byte("/port").unwrap_err().to_string().contains("u8"));
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn set_prefers_the_owning_layer_over_the_top_layer() {
    let base = MemorySource::new().with("tuning/depth", 3u32);
    let root = ConfigBuilder::new()
        .add(base)
        .add(MemorySource::new().with("other", 1u32))
        .build()
        .unwrap();

    root.set("/tuning/depth", ConfigValue::UnsignedInteger(5))
        .unwrap();

    assert_eq!(root.get_uint("/tuning/depth").unwrap(), 5);

    // New keys land in the highest-precedence provider and win lookups.
    root.set("/fresh", ConfigValue::from("x")).unwrap();
    assert_eq!(root.get_string("/fresh").unwrap(), "x");
}
