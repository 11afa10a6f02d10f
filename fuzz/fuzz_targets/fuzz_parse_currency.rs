#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // None is fine, panics are bugs.
        let _ = erstattung::parser::parse_currency(s);
    }
});
