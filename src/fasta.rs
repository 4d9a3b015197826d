//! FASTA parsing over an in-memory byte buffer.
//!
//! The reference database arrives as one contiguous byte range; records are
//! split at `>` headers and yielded in file order. A `>` opens a record only
//! at the start of the buffer or immediately after a newline, so a stray `>`
//! inside a header line never splits the record.

use bytes::Bytes;

use crate::MAX_NAME_BYTES;

/// One parsed FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Header text after `>`, verbatim, trimmed at the line end and
    /// truncated to [`MAX_NAME_BYTES`] bytes.
    pub name: String,
    /// Sequence bytes with all whitespace removed, uppercased.
    pub seq: Bytes,
}

/// Iterator over the records of a FASTA byte buffer.
///
/// Records with an empty sequence (a header followed by no bases) are
/// skipped entirely. Bytes before the first header are ignored.
#[derive(Debug)]
pub struct FastaParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> FastaParser<'a> {
    /// Creates a parser over `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }
}

impl Iterator for FastaParser<'_> {
    type Item = FastaRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = find_record_start(self.input, self.pos)?;

            let header_start = start + 1;
            let header_end = self.input[header_start..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(self.input.len(), |i| header_start + i);

            let mut name_bytes = &self.input[header_start..header_end];
            if name_bytes.last() == Some(&b'\r') {
                name_bytes = &name_bytes[..name_bytes.len() - 1];
            }
            if name_bytes.len() > MAX_NAME_BYTES {
                name_bytes = &name_bytes[..MAX_NAME_BYTES];
            }

            let body_start = self.input.len().min(header_end + 1);
            let body_end =
                find_record_start(self.input, body_start).unwrap_or(self.input.len());
            self.pos = body_end;

            let seq: Vec<u8> = self.input[body_start..body_end]
                .iter()
                .filter(|b| !b.is_ascii_whitespace())
                .map(u8::to_ascii_uppercase)
                .collect();

            // A header with no bases does not produce a record.
            if seq.is_empty() {
                continue;
            }

            return Some(FastaRecord {
                name: String::from_utf8_lossy(name_bytes).into_owned(),
                seq: Bytes::from(seq),
            });
        }
    }
}

/// Index of the next `>` found at the buffer start or just after a newline.
fn find_record_start(input: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < input.len() {
        if input[i] == b'>' && (i == 0 || input[i - 1] == b'\n') {
            return Some(i);
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Vec<FastaRecord> {
        FastaParser::new(input).collect()
    }

    #[test]
    fn parses_two_records() {
        let records = parse(b">geneA\nACGT\n>geneB\nTTTT\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "geneA");
        assert_eq!(records[0].seq.as_ref(), b"ACGT");
        assert_eq!(records[1].name, "geneB");
        assert_eq!(records[1].seq.as_ref(), b"TTTT");
    }

    #[test]
    fn joins_wrapped_sequence_lines() {
        let records = parse(b">g\nACGT\nacgt\n  TT GG\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq.as_ref(), b"ACGTACGTTTGG");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let records = parse(b">g\r\nACGT\r\nTTTT\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "g");
        assert_eq!(records[0].seq.as_ref(), b"ACGTTTTT");
    }

    #[test]
    fn gt_inside_header_does_not_split() {
        let records = parse(b">gene >alias\nACGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "gene >alias");
    }

    #[test]
    fn gt_mid_sequence_line_is_kept_as_a_byte() {
        // Not a record start; it lands in the sequence, where it can never
        // form a valid k-mer.
        let records = parse(b">g\nAC>GT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq.as_ref(), b"AC>GT");
    }

    #[test]
    fn empty_sequence_records_are_skipped() {
        let records = parse(b">empty\n>g\nACGT\n>also_empty\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "g");
    }

    #[test]
    fn header_at_end_of_input_yields_nothing() {
        assert!(parse(b">only_header").is_empty());
        assert!(parse(b">only_header\n").is_empty());
    }

    #[test]
    fn no_records_in_plain_text() {
        assert!(parse(b"this is not fasta\n").is_empty());
        assert!(parse(b"").is_empty());
    }

    #[test]
    fn leading_junk_before_first_header_is_ignored() {
        let records = parse(b"; comment line\n>g\nACGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "g");
    }

    #[test]
    fn name_is_truncated() {
        let long_name = "n".repeat(400);
        let input = format!(">{long_name}\nACGT\n");
        let records = parse(input.as_bytes());
        assert_eq!(records[0].name.len(), MAX_NAME_BYTES);
    }

    #[test]
    fn name_keeps_internal_whitespace() {
        let records = parse(b">blaTEM-1 beta-lactamase TEM-1\nACGT\n");
        assert_eq!(records[0].name, "blaTEM-1 beta-lactamase TEM-1");
    }
}
