//! Input source abstraction for file and stdin.
//!
//! The engine consumes whole byte buffers, so both sources are read to the
//! end up front. Reads can be piped in (`-`); the reference database is
//! always a file.

use std::io::Read;
use std::path::{Path, PathBuf};

/// Where a byte buffer comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Input {
    /// Read from a file at the specified path.
    File(PathBuf),
    /// Read from standard input.
    #[default]
    Stdin,
}

impl Input {
    /// Creates an `Input` from a path; `-` means stdin.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Returns `true` if this input is stdin.
    #[must_use]
    pub const fn is_stdin(&self) -> bool {
        matches!(self, Self::Stdin)
    }

    /// Reads the whole source into memory.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying file or stream.
    pub fn read_to_bytes(&self) -> std::io::Result<Vec<u8>> {
        match self {
            Self::File(path) => std::fs::read(path),
            Self::Stdin => {
                let mut buf = Vec::new();
                std::io::stdin().lock().read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn dash_means_stdin() {
        let input = Input::from_path(Path::new("-"));
        assert!(input.is_stdin());
        assert_eq!(input.to_string(), "<stdin>");
    }

    #[test]
    fn path_means_file() {
        let input = Input::from_path(Path::new("reads.fq"));
        assert!(!input.is_stdin());
        assert_eq!(input.to_string(), "reads.fq");
    }

    #[test]
    fn reads_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"@r1\nACGT\n+\nIIII\n").unwrap();
        file.flush().unwrap();

        let input = Input::from_path(file.path());
        assert_eq!(input.read_to_bytes().unwrap(), b"@r1\nACGT\n+\nIIII\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let input = Input::from_path(Path::new("/nonexistent/reads.fq"));
        assert!(input.read_to_bytes().is_err());
    }

    #[test]
    fn default_is_stdin() {
        assert!(Input::default().is_stdin());
    }
}
