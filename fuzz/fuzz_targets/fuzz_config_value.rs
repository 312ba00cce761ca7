#![no_main]

use layerconf::ConfigValue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Test from_str_infer - should never panic ===
    let value = ConfigValue::from_str_infer(data);

    // === Test Display/Debug - should never panic ===
    let _ = format!("{}", value);
    let _ = format!("{:?}", value);

    // === Test all conversions - should never panic ===
    let _ = value.to_i32();
    let _ = value.to_i64();
    let _ = value.to_u8();
    let _ = value.to_u32();
    let _ = value.to_u64();
    let _ = value.to_f32();
    let _ = value.to_f64();
    let _ = value.to_bool();
    let _ = value.to_string_strict();
    let _ = value.kind_name();
    let _ = value.describe();
});
