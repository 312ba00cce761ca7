#![no_main]

use layerconf::ConfigSource;
use layerconf::sources::YamlSource;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let content = String::from_utf8_lossy(data);

    // === Loading may error but should never crash ===
    let _ = YamlSource::new(content.as_ref()).load();
});
