#![no_main]

use layerconf::ConfigSource;
use layerconf::sources::TomlSource;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (lossy to handle invalid UTF-8)
    let content = String::from_utf8_lossy(data);

    // === Loading may error but should never crash ===
    let _ = TomlSource::new(content.as_ref()).load();

    // === Test with valid UTF-8 substrings ===
    if let Ok(valid_str) = std::str::from_utf8(data) {
        let _ = TomlSource::new(valid_str).load();
    }
});
