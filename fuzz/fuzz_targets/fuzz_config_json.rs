//! Fuzz target for config.json parsing.

#![no_main]

use esg_config::DashboardConfig;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        // Should never panic, only return an error
        let _ = DashboardConfig::from_json(json, Path::new("fuzz.json"));
    }
});
