#![no_main]
#![forbid(unsafe_code)]
use deskmate::providers::sanitize_api_error;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Sanitation must never panic on arbitrary provider error bodies
        let _ = sanitize_api_error(s);
    }
});
