//! The external engine boundary.
//!
//! An [`Engine`] owns at most one live [`AmrIndex`] and exposes the four
//! operations a host embeds: build, align, stats, cleanup. Building a new
//! index replaces the prior one atomically from the caller's perspective;
//! a failed build leaves the engine with no index rather than a partial
//! one. The engine is single-threaded: each call runs to completion on the
//! calling thread, and callers must not overlap a build with an alignment.

use tracing::info;

use crate::align::{Aligner, ReadAlignment};
use crate::error::SwiftAmrError;
use crate::index::{AmrIndex, HASH_TABLE_SIZE};
use crate::report::{self, ReportFormat};

/// Literal status string returned before any index has been built.
pub const NO_INDEX_STATUS: &str = "No index loaded";

/// The alignment engine: one optional index plus the operations over it.
#[derive(Debug)]
pub struct Engine {
    index: Option<AmrIndex>,
    bucket_count: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with no index, using the default
    /// [`HASH_TABLE_SIZE`] bucket count for builds.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: None,
            bucket_count: HASH_TABLE_SIZE,
        }
    }

    /// Creates an engine whose builds use a caller-chosen bucket count,
    /// for hosts running under tight memory budgets.
    #[must_use]
    pub const fn with_bucket_count(bucket_count: usize) -> Self {
        Self {
            index: None,
            bucket_count,
        }
    }

    /// Builds a fresh index from a reference FASTA buffer and returns the
    /// number of genes added.
    ///
    /// Any previously built index is dropped first, whether or not the
    /// build succeeds.
    ///
    /// # Errors
    ///
    /// Fails on empty input, input without FASTA records, or an oversized
    /// gene; see [`AmrIndex::from_fasta`].
    pub fn build_index(&mut self, fasta: &[u8]) -> Result<usize, SwiftAmrError> {
        self.index = None;
        let index = AmrIndex::from_fasta_with_bucket_count(fasta, self.bucket_count)?;
        let genes = index.num_genes();
        info!(genes, "index ready");
        self.index = Some(index);
        Ok(genes)
    }

    /// Aligns a FASTQ buffer against the current index.
    ///
    /// # Errors
    ///
    /// Fails with [`SwiftAmrError::NoIndex`] when no index has been built.
    pub fn align_fastq(&self, fastq: &[u8]) -> Result<Vec<ReadAlignment>, SwiftAmrError> {
        let index = self.index.as_ref().ok_or(SwiftAmrError::NoIndex)?;
        Ok(Aligner::new(index).align_batch(fastq))
    }

    /// Aligns a FASTQ buffer and renders the batch as TSV.
    ///
    /// This is the string boundary for hosts that only move text: any
    /// failure is reported in-band as a report whose first row begins with
    /// `ERROR:`.
    #[must_use]
    pub fn align_fastq_tsv(&self, fastq: &[u8]) -> String {
        match self.align_fastq_report(fastq, ReportFormat::Tsv) {
            Ok(tsv) => tsv,
            Err(err) => format!("ERROR: {err}\n"),
        }
    }

    /// Aligns a FASTQ buffer and renders the batch in `format`.
    ///
    /// # Errors
    ///
    /// Fails when no index is loaded or when rendering fails.
    pub fn align_fastq_report(
        &self,
        fastq: &[u8],
        format: ReportFormat,
    ) -> Result<String, SwiftAmrError> {
        let index = self.index.as_ref().ok_or(SwiftAmrError::NoIndex)?;
        let alignments = Aligner::new(index).align_batch(fastq);
        report::report_to_string(&alignments, index, format)
    }

    /// One-line status: index counters, or [`NO_INDEX_STATUS`] when no
    /// index exists.
    #[must_use]
    pub fn get_stats(&self) -> String {
        self.index
            .as_ref()
            .map_or_else(|| NO_INDEX_STATUS.to_owned(), |index| index.stats().to_string())
    }

    /// Drops the current index, if any. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        self.index = None;
    }

    /// The current index, if one has been built.
    #[must_use]
    pub fn index(&self) -> Option<&AmrIndex> {
        self.index.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUCKETS: usize = 1 << 12;

    const FASTA: &[u8] = b">geneA\nACGTACGTACGTACGTACGT\n";
    const FASTQ: &[u8] = b"@r1\nACGTACGTACGTACGTACGT\n+\nIIIIIIIIIIIIIIIIIIII\n";

    #[test]
    fn build_then_align() {
        let mut engine = Engine::with_bucket_count(BUCKETS);
        assert_eq!(engine.build_index(FASTA).unwrap(), 1);

        let batch = engine.align_fastq(FASTQ).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].gene_id, Some(0));
    }

    #[test]
    fn align_without_index_is_an_error() {
        let engine = Engine::with_bucket_count(BUCKETS);
        assert!(matches!(
            engine.align_fastq(FASTQ),
            Err(SwiftAmrError::NoIndex)
        ));
    }

    #[test]
    fn tsv_boundary_reports_errors_in_band() {
        let engine = Engine::with_bucket_count(BUCKETS);
        let tsv = engine.align_fastq_tsv(FASTQ);
        assert!(tsv.starts_with("ERROR:"));
        assert!(tsv.contains("no index loaded"));
    }

    #[test]
    fn rebuild_replaces_prior_index() {
        let mut engine = Engine::with_bucket_count(BUCKETS);
        engine.build_index(FASTA).unwrap();
        engine
            .build_index(b">other\nTTTTTTTTTTTTTTTTTTTT\n")
            .unwrap();

        let index = engine.index().unwrap();
        assert_eq!(index.num_genes(), 1);
        assert_eq!(index.gene(0).map(crate::index::Gene::name), Some("other"));
    }

    #[test]
    fn failed_build_leaves_no_index() {
        let mut engine = Engine::with_bucket_count(BUCKETS);
        engine.build_index(FASTA).unwrap();
        assert!(engine.build_index(b"").is_err());
        assert!(engine.index().is_none());
        assert_eq!(engine.get_stats(), NO_INDEX_STATUS);
    }

    #[test]
    fn stats_before_and_after_build() {
        let mut engine = Engine::with_bucket_count(BUCKETS);
        assert_eq!(engine.get_stats(), NO_INDEX_STATUS);

        engine.build_index(FASTA).unwrap();
        let stats = engine.get_stats();
        assert!(stats.contains("1 genes"));
        assert!(stats.contains("longest gene 20 bases"));
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut engine = Engine::with_bucket_count(BUCKETS);
        engine.build_index(FASTA).unwrap();
        engine.cleanup();
        assert!(engine.index().is_none());
        engine.cleanup();
        assert_eq!(engine.get_stats(), NO_INDEX_STATUS);
    }
}
