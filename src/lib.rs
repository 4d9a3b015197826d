//! # SwiftAMR
//!
//! SwiftAMR is an in-memory engine for detecting antimicrobial-resistance
//! (AMR) genes in short-read sequencing data by k-mer alignment. Given a
//! reference FASTA of AMR gene sequences and a batch of FASTQ reads, it
//! assigns each read to at most one gene with a winner-takes-all rule over
//! fixed-length k-mer matches (k = 16) and reports per-read score,
//! coverage, and identity.
//!
//! The pipeline has three stages around one long-lived index:
//!
//! 1. [`index::AmrIndex`]: the gene table plus a chained hash table from
//!    encoded k-mers to `(gene, position)` occurrences.
//! 2. Building: [`fasta`] parses the reference buffer and every valid
//!    k-mer window of every gene is inserted.
//! 3. Alignment: [`fastq`] parses reads; [`align::Aligner`] accumulates
//!    per-gene scores and covered positions and picks the winner.
//!
//! Matching is forward-strand only and ungapped; reads are never
//! reverse-complemented. Quality scores are parsed past and discarded.
//!
//! # Example
//!
//! ```rust,no_run
//! use swiftamr::engine::Engine;
//!
//! let fasta = std::fs::read("card.fasta")?;
//! let fastq = std::fs::read("reads.fq")?;
//!
//! let mut engine = Engine::new();
//! let genes = engine.build_index(&fasta)?;
//! eprintln!("indexed {genes} genes");
//!
//! print!("{}", engine.align_fastq_tsv(&fastq));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod align;
pub mod cli;
pub mod engine;
pub mod error;
pub mod fasta;
pub mod fastq;
pub mod index;
pub mod input;
pub mod kmer;
pub mod report;

pub use align::{Aligner, ReadAlignment};
pub use engine::Engine;
pub use error::SwiftAmrError;
pub use index::{AmrIndex, IndexStats, HASH_TABLE_SIZE, MAX_SEQUENCE_LENGTH};
pub use kmer::{KmerCode, KMER_SIZE};

/// Record names (FASTA headers, FASTQ read names) longer than this many
/// bytes are truncated.
pub const MAX_NAME_BYTES: usize = 255;
