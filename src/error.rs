//! Error types for swiftamr.
//!
//! Errors are never recovered inside the engine; partial state is dropped
//! and the error propagates to the caller. Allocation failure aborts the
//! process, as is conventional in Rust, so there is no recoverable
//! resource-exhaustion variant here.

use thiserror::Error;

/// Errors surfaced by the alignment engine.
#[derive(Debug, Error)]
pub enum SwiftAmrError {
    /// Input buffer was empty or held no parseable records.
    #[error("malformed input: {details}")]
    MalformedInput {
        /// What was wrong with the buffer.
        details: String,
    },

    /// A reference sequence exceeded the per-gene length ceiling.
    #[error("gene '{name}' is {length} bases, over the {limit}-base ceiling")]
    SequenceTooLong {
        /// Gene name as parsed from the FASTA header.
        name: String,
        /// Observed sequence length in bases.
        length: usize,
        /// The configured ceiling.
        limit: usize,
    },

    /// An alignment operation was invoked before any index was built.
    #[error("no index loaded")]
    NoIndex,

    /// Failed to write a report.
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),

    /// Failed to serialize a JSON report.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl SwiftAmrError {
    /// Shorthand for a [`SwiftAmrError::MalformedInput`] with the given detail.
    pub(crate) fn malformed(details: impl Into<String>) -> Self {
        Self::MalformedInput {
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_display() {
        let err = SwiftAmrError::malformed("empty input buffer");
        assert_eq!(err.to_string(), "malformed input: empty input buffer");
    }

    #[test]
    fn sequence_too_long_display() {
        let err = SwiftAmrError::SequenceTooLong {
            name: "blaTEM-1".into(),
            length: 104_857_601,
            limit: 104_857_600,
        };
        assert_eq!(
            err.to_string(),
            "gene 'blaTEM-1' is 104857601 bases, over the 104857600-base ceiling"
        );
    }

    #[test]
    fn no_index_display() {
        assert_eq!(SwiftAmrError::NoIndex.to_string(), "no index loaded");
    }
}
