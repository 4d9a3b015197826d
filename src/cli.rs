//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::input::Input;
use crate::report::ReportFormat;

/// Detect antimicrobial-resistance genes in short reads by k-mer alignment.
///
/// Builds an in-memory index over a reference FASTA of AMR gene sequences,
/// assigns each FASTQ read to at most one gene (winner takes all), and
/// prints per-read score, coverage, and identity.
///
/// # Examples
///
/// ```bash
/// # Align reads against a reference database
/// swiftamr card.fasta reads.fq > hits.tsv
///
/// # Reads from stdin
/// cat reads.fq | swiftamr card.fasta - > hits.tsv
///
/// # JSON rows instead of TSV
/// swiftamr card.fasta reads.fq --format json
/// ```
#[derive(Parser, Debug)]
#[command(name = "swiftamr")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Reference FASTA of AMR gene sequences
    pub database: PathBuf,

    /// Reads as FASTQ (use '-' or omit for stdin)
    #[arg(default_value = "-")]
    pub reads: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: ReportFormat,

    /// Suppress the stderr summary (only emit the report)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Returns the reads source (file or stdin).
    #[must_use]
    pub fn reads_input(&self) -> Input {
        Input::from_path(&self.reads)
    }
}
