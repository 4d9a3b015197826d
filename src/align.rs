//! Winner-takes-all read alignment against the k-mer index.
//!
//! Each read is scanned window by window; every `(gene, position)` hit of
//! every matching window adds one to that gene's score and marks the hit's
//! start position in that gene's covered set. After the scan the single
//! highest-scoring gene wins, with ties resolved to the smallest gene id.
//! Matching is forward-strand only; reads are never reverse-complemented.
//!
//! Score and coverage scratch is reused across reads and cleared between
//! them, so alignment allocates per distinct gene touched rather than per
//! gene in the database.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

use crate::fastq::FastqParser;
use crate::index::AmrIndex;
use crate::kmer::{KmerCode, KMER_SIZE};

/// Result of aligning one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadAlignment {
    /// Name parsed from the FASTQ header.
    pub read_name: String,
    /// Winning gene id, `None` when no k-mer matched.
    pub gene_id: Option<u32>,
    /// Sum over matched windows of the winning gene's hits.
    pub score: u32,
    /// Fraction of the winning gene's positions with at least one matching
    /// k-mer start, in `[0, 1]`.
    pub coverage: f64,
    /// Matched k-mers over the theoretical maximum, clamped to `[0, 1]`.
    pub identity: f64,
    /// Valid k-mer windows of the read that were looked up.
    pub kmers_scanned: u32,
}

impl ReadAlignment {
    /// Whether the read was assigned to a gene.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.gene_id.is_some()
    }

    const fn no_hit(read_name: String, kmers_scanned: u32) -> Self {
        Self {
            read_name,
            gene_id: None,
            score: 0,
            coverage: 0.0,
            identity: 0.0,
            kmers_scanned,
        }
    }
}

/// Aligns reads against one [`AmrIndex`].
///
/// The aligner borrows the index immutably, so any number of aligners may
/// run against the same index, each owning its own scratch.
#[derive(Debug)]
pub struct Aligner<'a> {
    index: &'a AmrIndex,
    scores: FxHashMap<u32, u32>,
    covered: FxHashMap<u32, FxHashSet<u32>>,
}

impl<'a> Aligner<'a> {
    /// Creates an aligner over `index`.
    #[must_use]
    pub fn new(index: &'a AmrIndex) -> Self {
        Self {
            index,
            scores: FxHashMap::default(),
            covered: FxHashMap::default(),
        }
    }

    /// Parses a FASTQ byte buffer and aligns every read, in input order.
    ///
    /// Reads shorter than [`KMER_SIZE`] bases are skipped entirely and do
    /// not appear in the returned batch; malformed records were already
    /// dropped by the parser.
    pub fn align_batch(&mut self, fastq: &[u8]) -> Vec<ReadAlignment> {
        let mut batch = Vec::new();
        for record in FastqParser::new(fastq) {
            if record.seq.len() < KMER_SIZE {
                debug!(read = %record.name, len = record.seq.len(), "read shorter than k, skipped");
                continue;
            }
            batch.push(self.align_read(record.name, &record.seq));
        }
        debug!(reads = batch.len(), "batch aligned");
        batch
    }

    /// Aligns a single read.
    ///
    /// Case is folded during window encoding, so `seq` may be in either
    /// case. A read shorter than [`KMER_SIZE`] yields a no-hit alignment.
    #[allow(clippy::cast_precision_loss)] // lengths are far below 2^52
    pub fn align_read(&mut self, read_name: String, seq: &[u8]) -> ReadAlignment {
        self.scores.clear();
        self.covered.clear();

        if seq.len() < KMER_SIZE {
            return ReadAlignment::no_hit(read_name, 0);
        }

        let index = self.index;
        let mut kmers_scanned = 0u32;
        for i in 0..=(seq.len() - KMER_SIZE) {
            let Some(code) = KmerCode::from_window(&seq[i..]) else {
                continue;
            };
            kmers_scanned += 1;
            let Some(entry) = index.lookup(code) else {
                continue;
            };
            for hit in entry.hits() {
                *self.scores.entry(hit.gene_id).or_insert(0) += 1;
                self.covered.entry(hit.gene_id).or_default().insert(hit.position);
            }
        }

        let mut winner: Option<(u32, u32)> = None;
        for (&gene_id, &score) in &self.scores {
            let better = match winner {
                None => true,
                Some((best_id, best_score)) => {
                    score > best_score || (score == best_score && gene_id < best_id)
                }
            };
            if better {
                winner = Some((gene_id, score));
            }
        }

        let Some((gene_id, score)) = winner else {
            return ReadAlignment::no_hit(read_name, kmers_scanned);
        };
        let Some(gene) = index.gene(gene_id) else {
            // Hits only ever reference genes present in the table.
            return ReadAlignment::no_hit(read_name, kmers_scanned);
        };

        let covered = self.covered.get(&gene_id).map_or(0, |set| set.len());
        let coverage = covered as f64 / gene.len() as f64;
        let window_budget = gene.len().min(seq.len()) - KMER_SIZE + 1;
        let identity = (f64::from(score) / window_budget as f64).min(1.0);

        ReadAlignment {
            read_name,
            gene_id: Some(gene_id),
            score,
            coverage,
            identity,
            kmers_scanned,
        }
    }
}
