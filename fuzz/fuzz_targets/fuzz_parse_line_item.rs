#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut item = erstattung::parser::line_item_from_text(s);
        let outcome = item.apply_refundability();
        assert_eq!(outcome.is_refundable, outcome.eu_sub_code.is_some());
    }
});
