//! The gene table and k-mer occurrence index.
//!
//! [`AmrIndex`] maps every valid k-mer of every reference gene to the list
//! of `(gene, position)` occurrences of that k-mer. The table is a fixed
//! array of buckets (`code mod bucket_count`) with separate chaining: each
//! bucket holds one [`KmerEntry`] per distinct code, and each entry holds
//! its hits in insertion order. Because genes are ingested sequentially,
//! hit lists are gene-id-major with positions ascending within a gene.
//!
//! Dropping the index frees everything it owns; there is no separate
//! teardown call.

use bytes::Bytes;
use tracing::info;

use crate::error::SwiftAmrError;
use crate::fasta::FastaParser;
use crate::kmer::{KmerCode, KMER_SIZE};

/// Number of buckets in the default k-mer hash table.
pub const HASH_TABLE_SIZE: usize = 1 << 24;

/// Ceiling on a single reference sequence, in bases.
pub const MAX_SEQUENCE_LENGTH: usize = 100 * (1 << 20);

/// Initial gene-table capacity; the table grows by doubling.
const GENE_TABLE_CAPACITY: usize = 1024;

/// Initial per-entry hit capacity; hit lists grow by doubling.
const HIT_LIST_CAPACITY: usize = 4;

/// One reference sequence loaded from FASTA.
#[derive(Debug, Clone)]
pub struct Gene {
    name: String,
    seq: Bytes,
}

impl Gene {
    /// Header-derived gene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored sequence, uppercase.
    #[must_use]
    pub fn seq(&self) -> &[u8] {
        &self.seq
    }

    /// Sequence length in bases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// One occurrence of a k-mer within a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerHit {
    /// Dense id of the gene the k-mer occurs in.
    pub gene_id: u32,
    /// 0-based start position of the k-mer within that gene.
    pub position: u32,
}

/// All hits for one distinct k-mer value, chained within a bucket.
///
/// The full code is stored so that a bucket traversal compares codes
/// directly instead of rehashing.
#[derive(Debug, Clone)]
pub struct KmerEntry {
    code: KmerCode,
    hits: Vec<KmerHit>,
}

impl KmerEntry {
    /// The k-mer this entry collects hits for.
    #[must_use]
    pub const fn code(&self) -> KmerCode {
        self.code
    }

    /// Hits in insertion order: gene-id-major, position-ascending.
    #[must_use]
    pub fn hits(&self) -> &[KmerHit] {
        &self.hits
    }
}

/// Summary counters for a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of genes in the table.
    pub num_genes: usize,
    /// Number of distinct k-mer values indexed.
    pub distinct_kmers: usize,
    /// Total `(gene, position)` occurrences stored.
    pub total_hits: u64,
    /// Length of the longest gene, in bases.
    pub max_gene_len: usize,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} genes, {} distinct k-mers, {} hits, longest gene {} bases",
            self.num_genes, self.distinct_kmers, self.total_hits, self.max_gene_len
        )
    }
}

/// The k-mer occurrence index over a reference database.
#[derive(Debug)]
pub struct AmrIndex {
    genes: Vec<Gene>,
    buckets: Vec<Vec<KmerEntry>>,
    distinct_kmers: usize,
    total_hits: u64,
    max_gene_len: usize,
}

impl Default for AmrIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl AmrIndex {
    /// Creates an empty index with [`HASH_TABLE_SIZE`] buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bucket_count(HASH_TABLE_SIZE)
    }

    /// Creates an empty index with a caller-chosen bucket count.
    ///
    /// The default table weighs in at hundreds of megabytes; embedders and
    /// tests that only ever index a handful of genes can run with far
    /// fewer buckets. Lookup semantics are unchanged, only the collision
    /// rate differs.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    #[must_use]
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "bucket count must be non-zero");
        Self {
            genes: Vec::with_capacity(GENE_TABLE_CAPACITY),
            buckets: vec![Vec::new(); bucket_count],
            distinct_kmers: 0,
            total_hits: 0,
            max_gene_len: 0,
        }
    }

    /// Builds an index from a FASTA byte buffer with the default bucket
    /// count.
    ///
    /// # Errors
    ///
    /// Fails on an empty buffer, on a buffer with no FASTA records, and on
    /// a gene longer than [`MAX_SEQUENCE_LENGTH`]. On failure the
    /// partially built index is dropped; the caller never observes it.
    pub fn from_fasta(input: &[u8]) -> Result<Self, SwiftAmrError> {
        Self::build(input, HASH_TABLE_SIZE)
    }

    /// Like [`AmrIndex::from_fasta`] with a caller-chosen bucket count.
    ///
    /// # Errors
    ///
    /// As for [`AmrIndex::from_fasta`].
    pub fn from_fasta_with_bucket_count(
        input: &[u8],
        bucket_count: usize,
    ) -> Result<Self, SwiftAmrError> {
        Self::build(input, bucket_count)
    }

    fn build(input: &[u8], bucket_count: usize) -> Result<Self, SwiftAmrError> {
        if input.is_empty() {
            return Err(SwiftAmrError::malformed("empty input buffer"));
        }
        let mut index = Self::with_bucket_count(bucket_count);
        for record in FastaParser::new(input) {
            index.add_gene(record.name, record.seq)?;
        }
        if index.genes.is_empty() {
            return Err(SwiftAmrError::malformed("no genes in FASTA input"));
        }
        info!(
            genes = index.genes.len(),
            distinct_kmers = index.distinct_kmers,
            total_hits = index.total_hits,
            "reference index built"
        );
        Ok(index)
    }

    /// Appends one gene and indexes every valid k-mer window of its
    /// sequence. Returns the dense id assigned to the gene.
    ///
    /// The sequence is stored uppercase; a lowercase input is folded here.
    ///
    /// # Errors
    ///
    /// Fails when the sequence exceeds [`MAX_SEQUENCE_LENGTH`].
    // Positions fit u32: sequences are capped far below u32::MAX bases.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_gene(&mut self, name: String, seq: Bytes) -> Result<u32, SwiftAmrError> {
        if seq.len() > MAX_SEQUENCE_LENGTH {
            return Err(SwiftAmrError::SequenceTooLong {
                name,
                length: seq.len(),
                limit: MAX_SEQUENCE_LENGTH,
            });
        }
        let seq = if seq.iter().any(u8::is_ascii_lowercase) {
            Bytes::from(seq.iter().map(u8::to_ascii_uppercase).collect::<Vec<_>>())
        } else {
            seq
        };

        let gene_id = self.genes.len() as u32;
        if seq.len() >= KMER_SIZE {
            for position in 0..=(seq.len() - KMER_SIZE) {
                if let Some(code) = KmerCode::from_window(&seq[position..]) {
                    self.insert(
                        code,
                        KmerHit {
                            gene_id,
                            position: position as u32,
                        },
                    );
                }
            }
        }
        self.max_gene_len = self.max_gene_len.max(seq.len());
        self.genes.push(Gene { name, seq });
        Ok(gene_id)
    }

    fn insert(&mut self, code: KmerCode, hit: KmerHit) {
        let bucket = code.packed() as usize % self.buckets.len();
        let chain = &mut self.buckets[bucket];
        if let Some(entry) = chain.iter_mut().find(|e| e.code == code) {
            entry.hits.push(hit);
        } else {
            let mut hits = Vec::with_capacity(HIT_LIST_CAPACITY);
            hits.push(hit);
            chain.push(KmerEntry { code, hits });
            self.distinct_kmers += 1;
        }
        self.total_hits += 1;
    }

    /// Returns the entry for `code`, or `None` when the k-mer was never
    /// indexed.
    #[must_use]
    pub fn lookup(&self, code: KmerCode) -> Option<&KmerEntry> {
        let bucket = code.packed() as usize % self.buckets.len();
        self.buckets[bucket].iter().find(|e| e.code == code)
    }

    /// The gene with the given dense id.
    #[must_use]
    pub fn gene(&self, gene_id: u32) -> Option<&Gene> {
        self.genes.get(gene_id as usize)
    }

    /// All genes, in insertion (= id) order.
    #[must_use]
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Number of genes in the table.
    #[must_use]
    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    /// Whether the gene table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of buckets in the hash table.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Summary counters.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_genes: self.genes.len(),
            distinct_kmers: self.distinct_kmers,
            total_hits: self.total_hits,
            max_gene_len: self.max_gene_len,
        }
    }
}
