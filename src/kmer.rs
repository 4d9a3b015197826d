//! K-mer encoding and decoding.
//!
//! The engine works on k-mers of fixed length [`KMER_SIZE`] packed into a
//! `u32`, two bits per base: A=00, C=01, G=10, T=11, with the first base in
//! the most significant bit pair. A window qualifies for encoding only when
//! every base is one of `{A, C, G, T}` in either case; anything else (N,
//! IUPAC ambiguity codes, whitespace, digits) invalidates the whole window,
//! which is then skipped rather than indexed or queried.

/// K-mer length used throughout the engine.
pub const KMER_SIZE: usize = 16;

/// A [`KMER_SIZE`]-base DNA k-mer packed into 32 bits.
///
/// Constructed with [`KmerCode::from_window`], which returns `None` for
/// windows that cannot be encoded. Two codes compare equal exactly when the
/// underlying uppercase base strings are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KmerCode(u32);

impl KmerCode {
    /// Encodes the first [`KMER_SIZE`] bases of `window`.
    ///
    /// Returns `None` when the window holds fewer than [`KMER_SIZE`] bytes
    /// or when any base in it is not one of `{A, C, G, T, a, c, g, t}`.
    #[must_use]
    pub fn from_window(window: &[u8]) -> Option<Self> {
        if window.len() < KMER_SIZE {
            return None;
        }
        let mut code = 0u32;
        for &base in &window[..KMER_SIZE] {
            code = (code << 2) | u32::from(base_code(base)?);
        }
        Some(Self(code))
    }

    /// The packed 32-bit value.
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    /// Decodes the code back into its uppercase base string.
    #[must_use]
    pub fn decode(self) -> String {
        (0..KMER_SIZE)
            .map(|i| {
                let pair = (self.0 >> (2 * (KMER_SIZE - 1 - i))) & 0b11;
                char::from(base_byte(pair))
            })
            .collect()
    }
}

impl std::fmt::Display for KmerCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.decode())
    }
}

/// Two-bit value for a single base, `None` for anything outside ACGT.
const fn base_code(base: u8) -> Option<u8> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}

const fn base_byte(pair: u32) -> u8 {
    match pair & 0b11 {
        0 => b'A',
        1 => b'C',
        2 => b'G',
        _ => b'T',
    }
}
