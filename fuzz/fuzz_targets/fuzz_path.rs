#![no_main]

use arbitrary::Arbitrary;
use layerconf::path;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    segments: Vec<String>,
    prefix: String,
    key: String,
    keys: Vec<String>,
    idx: u16,
}

fuzz_target!(|input: FuzzInput| {
    // === Path algebra should be total: no panics on any input ===
    let combined = path::combine(&input.segments);
    assert!(combined.starts_with('/'));

    let _ = path::section_key(&combined);
    let _ = path::parent_path(&combined);
    let _ = path::section_key(&input.key);
    let _ = path::parent_path(&input.key);

    // === Prefix matching must never slice inside a UTF-8 boundary ===
    let _ = path::has_path_in_key(&input.prefix, &input.key);
    let _ = path::child_keys(&input.prefix, &input.keys);

    // === Array helpers over arbitrary key sets ===
    let _ = path::is_array_index(&input.key);
    let _ = path::is_array_path(&input.prefix, &input.keys);
    let len = path::array_len(&input.prefix, &input.keys);
    assert!(len >= -1);

    let segment = path::array_index(input.idx as usize);
    assert!(path::is_array_index(&segment));
    let _ = path::array_index_path(&combined, input.idx as usize);
});
