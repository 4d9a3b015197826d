//! FASTQ parsing over an in-memory byte buffer.
//!
//! Records are strict four-line groups: an `@` header, one sequence line,
//! a `+` separator line, and one quality line. Quality values are not used
//! by the aligner and are discarded at parse time. Because the quality line
//! is consumed positionally, a quality string that happens to begin with
//! `@` is never mistaken for the next header.
//!
//! Malformed records (a header whose third line does not start with `+`,
//! or a group truncated by end of input) are skipped silently; parsing
//! resynchronizes at the next line beginning with `@`.

use bytes::Bytes;

use crate::MAX_NAME_BYTES;

/// One parsed FASTQ record, quality already discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// The run of non-whitespace bytes after `@`, truncated to
    /// [`MAX_NAME_BYTES`] bytes.
    pub name: String,
    /// Sequence bytes with internal whitespace removed, uppercased.
    pub seq: Bytes,
}

/// Iterator over the records of a FASTQ byte buffer.
#[derive(Debug)]
pub struct FastqParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> FastqParser<'a> {
    /// Creates a parser over `input`.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Yields the next line without its terminator, handling a final line
    /// that lacks a trailing newline. `\r\n` endings are trimmed.
    fn next_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.input.len() {
            return None;
        }
        let start = self.pos;
        let end = self.input[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.input.len(), |i| start + i);
        self.pos = self.input.len().min(end + 1);

        let mut line = &self.input[start..end];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        Some(line)
    }
}

impl Iterator for FastqParser<'_> {
    type Item = FastqRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let header = self.next_line()?;
            if header.first() != Some(&b'@') {
                continue;
            }
            let after_header = self.pos;

            let seq_line = self.next_line()?;
            let sep_line = self.next_line()?;
            if sep_line.first() != Some(&b'+') {
                // Malformed record: rescan for a header starting at the
                // line after the bad one.
                self.pos = after_header;
                continue;
            }
            // Quality line, discarded. A group truncated here is malformed.
            self.next_line()?;

            let mut name_bytes: &[u8] = &header[1..];
            if let Some(ws) = name_bytes.iter().position(u8::is_ascii_whitespace) {
                name_bytes = &name_bytes[..ws];
            }
            if name_bytes.len() > MAX_NAME_BYTES {
                name_bytes = &name_bytes[..MAX_NAME_BYTES];
            }

            let seq: Vec<u8> = seq_line
                .iter()
                .filter(|b| !b.is_ascii_whitespace())
                .map(u8::to_ascii_uppercase)
                .collect();

            return Some(FastqRecord {
                name: String::from_utf8_lossy(name_bytes).into_owned(),
                seq: Bytes::from(seq),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Vec<FastqRecord> {
        FastqParser::new(input).collect()
    }

    #[test]
    fn parses_single_record() {
        let records = parse(b"@r1\nACGT\n+\nIIII\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "r1");
        assert_eq!(records[0].seq.as_ref(), b"ACGT");
    }

    #[test]
    fn parses_multiple_records_in_order() {
        let records = parse(b"@r1\nACGT\n+\nIIII\n@r2\nTTTT\n+\nIIII\n@r3\nGGGG\n+\nIIII\n");
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["r1", "r2", "r3"]);
    }

    #[test]
    fn name_stops_at_first_whitespace() {
        let records = parse(b"@read1 length=100 run=7\nACGT\n+\nIIII\n");
        assert_eq!(records[0].name, "read1");
    }

    #[test]
    fn quality_line_starting_with_at_is_not_a_header() {
        let records = parse(b"@r1\nACGT\n+\n@@@@\n@r2\nTTTT\n+\nIIII\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "r1");
        assert_eq!(records[1].name, "r2");
    }

    #[test]
    fn missing_separator_skips_record_and_resyncs() {
        let records = parse(b"@bad\nACGT\nXXXX\n@good\nTTTT\n+\nIIII\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "good");
    }

    #[test]
    fn separator_may_repeat_the_name() {
        let records = parse(b"@r1\nACGT\n+r1\nIIII\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "r1");
    }

    #[test]
    fn truncated_trailing_record_is_dropped() {
        let records = parse(b"@r1\nACGT\n+\nIIII\n@r2\nTTTT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "r1");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let records = parse(b"@r1\r\nACGT\r\n+\r\nIIII\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "r1");
        assert_eq!(records[0].seq.as_ref(), b"ACGT");
    }

    #[test]
    fn sequence_is_uppercased_and_whitespace_stripped() {
        let records = parse(b"@r1\nac gt\t TT\n+\nIIIIII\n");
        assert_eq!(records[0].seq.as_ref(), b"ACGTTT");
    }

    #[test]
    fn junk_between_records_is_ignored() {
        let records = parse(b"\n\n@r1\nACGT\n+\nIIII\nnoise\n@r2\nTTTT\n+\nIIII\n");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse(b"").is_empty());
    }

    #[test]
    fn name_is_truncated() {
        let long_name = "r".repeat(300);
        let input = format!("@{long_name}\nACGT\n+\nIIII\n");
        let records = parse(input.as_bytes());
        assert_eq!(records[0].name.len(), MAX_NAME_BYTES);
    }
}
