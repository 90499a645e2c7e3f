#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing, warning collection and validation must never panic
        if let Ok((config, _warnings)) =
            summon::Config::parse_with_warnings(content, Path::new("fuzz.toml"))
        {
            let _ = config.validate();
            let _ = config.limits();
            let _ = config.command_spec();
        }
    }
});
