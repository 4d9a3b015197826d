use std::io::{stdout, BufWriter};
use std::process;

use clap::Parser;
use colored::Colorize;

use swiftamr::cli::Args;
use swiftamr::engine::Engine;
use swiftamr::report::ReportFormat;

/// Initialize the tracing subscriber with environment filter.
///
/// Set `RUST_LOG=swiftamr=debug` to see debug output.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if !args.database.exists() {
        eprintln!(
            "{}\n {}",
            "Problem with arguments:".blue().bold(),
            format!("File not found: {}", args.database.display())
                .blue()
                .bold()
        );
        process::exit(1);
    }

    let reads_input = args.reads_input();

    if !args.quiet {
        eprintln!(
            "{}: {}",
            "database".bold(),
            args.database.display().to_string().underline().bold().blue()
        );
        eprintln!(
            "{}: {}",
            "reads".bold(),
            reads_input.to_string().underline().bold().blue()
        );
        eprintln!(
            "{}: {}",
            "report-format".bold(),
            args.format.to_string().blue().bold()
        );
        eprintln!();
    }

    let fasta = match std::fs::read(&args.database) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!(
                "{}\n {}",
                "Problem reading database:".blue().bold(),
                err.to_string().blue()
            );
            process::exit(1);
        }
    };
    let fastq = match reads_input.read_to_bytes() {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!(
                "{}\n {}",
                "Problem reading reads:".blue().bold(),
                err.to_string().blue()
            );
            process::exit(1);
        }
    };

    let mut engine = Engine::new();
    if let Err(err) = engine.build_index(&fasta) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            err.to_string().blue()
        );
        process::exit(1);
    }

    if !args.quiet {
        eprintln!(
            "{}: {}",
            "indexed".bold(),
            engine.get_stats().green().bold()
        );
    }

    if let Err(err) = run_alignment(&engine, &fastq, args.format) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            err.to_string().blue()
        );
        process::exit(1);
    }
}

fn run_alignment(
    engine: &Engine,
    fastq: &[u8],
    format: ReportFormat,
) -> Result<(), swiftamr::SwiftAmrError> {
    let alignments = engine.align_fastq(fastq)?;
    let index = engine.index().ok_or(swiftamr::SwiftAmrError::NoIndex)?;
    let writer = BufWriter::new(stdout());
    swiftamr::report::write_report(writer, &alignments, index, format)
}
