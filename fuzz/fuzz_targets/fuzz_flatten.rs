#![no_main]

use layerconf::flatten::flatten;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only well-formed documents reach the flattener in production, but it
    // must stay total over anything serde_json accepts.
    let Ok(document) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let flat = flatten(&document);

    // Every produced key is canonical.
    for key in flat.keys() {
        assert!(key.starts_with('/'));
    }
});
