//! Fuzz target for dataset JSON.
//!
//! Any dataset that parses must validate and render without panicking,
//! however badly it matches the chart contract.

#![no_main]

use esg_common::Dataset;
use esg_report::ReportGenerator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(dataset) = Dataset::from_json(json) else {
        return;
    };

    let _ = esg_config::validate_dataset(&dataset);
    let _ = esg_common::derive_headlines(&dataset);
    let _ = ReportGenerator::default_config().generate(&dataset);
});
