//! Content hashing for cache-busting filenames, using blake3.
//!
//! The digest is truncated to a short hex fingerprint. 8 hex chars is 32 bits:
//! collisions are tolerable for cache busting, which is the only use here.

use std::fmt;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a byte buffer.
    #[inline]
    pub fn of(data: impl AsRef<[u8]>) -> Self {
        Self(*blake3::hash(data.as_ref()).as_bytes())
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to full hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// First `len` hex chars of the digest (clamped to 64).
    pub fn short(self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len.min(hex.len()));
        hex
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Computes fixed-length fingerprints of byte buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentHasher {
    len: usize,
}

impl ContentHasher {
    pub const DEFAULT_LEN: usize = 8;
    pub const MAX_LEN: usize = 64;

    /// Create a hasher producing `len` hex chars (clamped to `1..=64`).
    pub fn new(len: usize) -> Self {
        Self {
            len: len.clamp(1, Self::MAX_LEN),
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    /// Compute the fingerprint of `data`.
    #[inline]
    pub fn fingerprint(&self, data: impl AsRef<[u8]>) -> String {
        ContentHash::of(data).short(self.len)
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEN)
    }
}
