//! Fuzz target for the FASTA byte-buffer parser.
//!
//! Arbitrary bytes must parse without panicking, and every record that
//! comes out must satisfy the parser's own guarantees.

#![no_main]

use libfuzzer_sys::fuzz_target;
use swiftamr::fasta::FastaParser;
use swiftamr::MAX_NAME_BYTES;

fuzz_target!(|data: &[u8]| {
    for record in FastaParser::new(data) {
        assert!(
            record.name.chars().count() <= MAX_NAME_BYTES,
            "name longer than the cap"
        );
        assert!(!record.seq.is_empty(), "empty-sequence record emitted");
        for &byte in record.seq.iter() {
            assert!(!byte.is_ascii_whitespace(), "whitespace in sequence");
            assert!(!byte.is_ascii_lowercase(), "lowercase byte in sequence");
        }
    }
});
