//! Alignment report serialization.
//!
//! The reference format is TSV: one header row, then one row per aligned
//! read with the winning gene's name (or the `No_hit` token), the score,
//! and coverage/identity printed with four fractional digits. A JSON array
//! rendering of the same rows is available for downstream tooling.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::align::ReadAlignment;
use crate::error::SwiftAmrError;
use crate::index::AmrIndex;

/// Output format for alignment batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Tab-separated values (the reference format).
    #[default]
    Tsv,
    /// JSON array of row objects.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tsv => write!(f, "tsv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// TSV header row.
pub const TSV_HEADER: &str = "read_name\tgene\tscore\tcoverage\tidentity";

/// Token emitted in place of a gene name when a read matched nothing.
pub const NO_HIT: &str = "No_hit";

/// One report row with the gene name resolved.
#[derive(Serialize)]
struct ReportRow<'a> {
    read_name: &'a str,
    gene: Option<&'a str>,
    score: u32,
    coverage: f64,
    identity: f64,
}

impl<'a> ReportRow<'a> {
    fn new(alignment: &'a ReadAlignment, index: &'a AmrIndex) -> Self {
        Self {
            read_name: &alignment.read_name,
            gene: alignment
                .gene_id
                .and_then(|id| index.gene(id))
                .map(crate::index::Gene::name),
            score: alignment.score,
            coverage: alignment.coverage,
            identity: alignment.identity,
        }
    }
}

/// Writes a batch of alignments to `writer` in the requested format.
///
/// Rows appear in batch order, which the aligner guarantees is input
/// order.
///
/// # Errors
///
/// Fails when the writer fails or (for JSON) when serialization fails.
pub fn write_report<W: Write>(
    mut writer: W,
    alignments: &[ReadAlignment],
    index: &AmrIndex,
    format: ReportFormat,
) -> Result<(), SwiftAmrError> {
    match format {
        ReportFormat::Tsv => {
            writeln!(writer, "{TSV_HEADER}")?;
            for alignment in alignments {
                let row = ReportRow::new(alignment, index);
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{:.4}\t{:.4}",
                    row.read_name,
                    row.gene.unwrap_or(NO_HIT),
                    row.score,
                    row.coverage,
                    row.identity
                )?;
            }
        }
        ReportFormat::Json => {
            let rows: Vec<ReportRow<'_>> = alignments
                .iter()
                .map(|alignment| ReportRow::new(alignment, index))
                .collect();
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Renders a batch of alignments to a `String`.
///
/// # Errors
///
/// As for [`write_report`].
pub fn report_to_string(
    alignments: &[ReadAlignment],
    index: &AmrIndex,
    format: ReportFormat,
) -> Result<String, SwiftAmrError> {
    let mut buf = Vec::new();
    write_report(&mut buf, alignments, index, format)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::Aligner;

    fn batch() -> (AmrIndex, Vec<ReadAlignment>) {
        let index = AmrIndex::from_fasta_with_bucket_count(
            b">geneA\nACGTACGTACGTACGTACGT\n",
            1 << 12,
        )
        .unwrap();
        let fastq = concat!(
            "@r1\nACGTACGTACGTACGTACGT\n+\nIIIIIIIIIIIIIIIIIIII\n",
            "@r2\nTTTTTTTTTTTTTTTTTTTT\n+\nIIIIIIIIIIIIIIIIIIII\n"
        );
        let alignments = Aligner::new(&index).align_batch(fastq.as_bytes());
        (index, alignments)
    }

    #[test]
    fn tsv_rows_and_header() {
        let (index, alignments) = batch();
        let tsv = report_to_string(&alignments, &index, ReportFormat::Tsv).unwrap();
        let expected = "read_name\tgene\tscore\tcoverage\tidentity\n\
                        r1\tgeneA\t7\t0.2500\t1.0000\n\
                        r2\tNo_hit\t0\t0.0000\t0.0000\n";
        assert_eq!(tsv, expected);
    }

    #[test]
    fn json_rows_carry_gene_names() {
        let (index, alignments) = batch();
        let json = report_to_string(&alignments, &index, ReportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["read_name"], "r1");
        assert_eq!(rows[0]["gene"], "geneA");
        assert_eq!(rows[0]["score"], 7);
        assert_eq!(rows[1]["gene"], serde_json::Value::Null);
        assert_eq!(rows[1]["score"], 0);
    }

    #[test]
    fn empty_batch_is_header_only() {
        let (index, _) = batch();
        let tsv = report_to_string(&[], &index, ReportFormat::Tsv).unwrap();
        assert_eq!(tsv, format!("{TSV_HEADER}\n"));
    }

    #[test]
    fn format_display() {
        assert_eq!(ReportFormat::Tsv.to_string(), "tsv");
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }
}
