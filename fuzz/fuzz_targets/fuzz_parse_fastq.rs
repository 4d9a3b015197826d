//! Fuzz target for the FASTQ byte-buffer parser.
//!
//! Quality lines beginning with `@`, missing separators, and truncated
//! trailing records must all be handled without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use swiftamr::fastq::FastqParser;
use swiftamr::MAX_NAME_BYTES;

fuzz_target!(|data: &[u8]| {
    for record in FastqParser::new(data) {
        assert!(
            record.name.chars().count() <= MAX_NAME_BYTES,
            "name longer than the cap"
        );
        assert!(
            !record.name.contains(|c: char| c.is_ascii_whitespace()),
            "whitespace in read name"
        );
        for &byte in record.seq.iter() {
            assert!(!byte.is_ascii_whitespace(), "whitespace in sequence");
            assert!(!byte.is_ascii_lowercase(), "lowercase byte in sequence");
        }
    }
});
