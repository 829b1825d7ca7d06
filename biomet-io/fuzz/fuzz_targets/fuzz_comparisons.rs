#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = biomet_io::parse_comparisons_str(text);
        let _ = biomet_io::parse_true_pairs_str(text);
    }
});
