#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(name) = summon::QualifiedName::parse(raw) {
            // Accepted names never contain empty segments
            assert!(name.segments().all(|s| !s.is_empty()));
            assert_eq!(name.as_str(), raw);
        }
    }
});
