//! Mapping of words to bitmap positions.
//!
//! Three fixed hash algorithms are available, addressed by their ordinal. A
//! filter using `k` hashes always uses the first `k` variants in ordinal order,
//! so the same [`HashCount`] must be used to build and to query a bitmap.

use std::convert::TryFrom;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// One of the supported hash algorithms.
///
/// The ordinal of each variant is fixed, and selects the position of the
/// algorithm in the sequence used by a [`SpellFilter`](crate::SpellFilter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HashVariant {
    /// MD5, truncated to the filter's digit count.
    Md5 = 0,
    /// SHA-256, truncated to the filter's digit count.
    Sha256 = 1,
    /// CRC-32 (IEEE). Always yields the full 32 bit checksum.
    Crc32 = 2,
}

impl HashVariant {
    /// All variants, in ordinal order.
    pub const ALL: [HashVariant; 3] = [
        HashVariant::Md5,
        HashVariant::Sha256,
        HashVariant::Crc32,
    ];

    /// Return the ordinal of this variant.
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Compute the digest of the UTF-8 encoding of `word`.
    ///
    /// For [`HashVariant::Md5`] and [`HashVariant::Sha256`] only the lowest
    /// `digit_count` hexadecimal digits of the hash are kept, producing a value
    /// in `0..16^digit_count`. [`HashVariant::Crc32`] ignores `digit_count`.
    pub fn digest(self, word: &str, digit_count: usize) -> u64 {
        let data = word.as_bytes();
        match self {
            HashVariant::Md5 => truncate_hex(&md5::compute(data).0, digit_count),
            HashVariant::Sha256 => truncate_hex(&Sha256::digest(data), digit_count),
            HashVariant::Crc32 => u64::from(crc32fast::hash(data)),
        }
    }
}

impl TryFrom<usize> for HashVariant {
    type Error = Error;

    fn try_from(ordinal: usize) -> Result<Self> {
        HashVariant::ALL
            .get(ordinal)
            .copied()
            .ok_or(Error::UnsupportedHashVariant(ordinal))
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashVariant::Md5 => f.write_str("md5"),
            HashVariant::Sha256 => f.write_str("sha256"),
            HashVariant::Crc32 => f.write_str("crc32"),
        }
    }
}

/// Compute the digest of `word` using the hash variant with the given
/// `ordinal`.
///
/// Returns [`Error::UnsupportedHashVariant`] if `ordinal` is not 0, 1 or 2.
///
/// ```rust
/// use spellbloom::hash::digest;
///
/// // The last 3 hex digits of md5("apple") are "57f".
/// assert_eq!(digest("apple", 3, 0).unwrap(), 0x57f);
/// assert!(digest("apple", 3, 3).is_err());
/// ```
pub fn digest(word: &str, digit_count: usize, ordinal: usize) -> Result<u64> {
    HashVariant::try_from(ordinal).map(|v| v.digest(word, digit_count))
}

/// Return the number of hexadecimal digits needed to write `num_bits`.
///
/// ```rust
/// use spellbloom::hash::digit_count_for;
///
/// assert_eq!(digit_count_for(1024), 3); // 0x400
/// assert_eq!(digit_count_for(524288), 5); // 0x80000
/// ```
pub fn digit_count_for(num_bits: usize) -> usize {
    let bits = (usize::BITS - num_bits.leading_zeros()) as usize;
    // 0 still takes one digit to write.
    ((bits + 3) / 4).max(1)
}

/// Keep the lowest `digit_count` hex digits of the big-endian `hash`.
fn truncate_hex(hash: &[u8], digit_count: usize) -> u64 {
    // Any usize bit count fits in 16 hex digits.
    let digit_count = digit_count.min(16);
    let tail = hash.len().saturating_sub((digit_count + 1) / 2);

    let value = hash[tail..]
        .iter()
        .fold(0_u64, |acc, &b| (acc << 8) | u64::from(b));

    match digit_count {
        16 => value,
        n => value & ((1_u64 << (4 * n)) - 1),
    }
}

static VARIANTS: [HashVariant; 3] = HashVariant::ALL;

/// The number of hash variants used to derive bit positions for a word.
///
/// A `HashCount` is always between 1 and 3 (inclusive); the same count must be
/// used to build and to check a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub struct HashCount(u8);

impl HashCount {
    /// Use only [`HashVariant::Md5`].
    pub const ONE: HashCount = HashCount(1);
    /// Use [`HashVariant::Md5`] and [`HashVariant::Sha256`].
    pub const TWO: HashCount = HashCount(2);
    /// Use all supported variants.
    pub const MAX: HashCount = HashCount(HashVariant::ALL.len() as u8);

    /// Construct a `HashCount`, clamping values above the number of supported
    /// variants.
    ///
    /// Returns [`Error::InvalidHashCount`] if `n` is 0.
    pub fn new(n: usize) -> Result<Self> {
        match n {
            0 => Err(Error::InvalidHashCount(n)),
            n => Ok(HashCount(n.min(HashVariant::ALL.len()) as u8)),
        }
    }

    /// Return the count as a `usize`.
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// The variants selected by this count, in ordinal order.
    pub fn variants(self) -> &'static [HashVariant] {
        &VARIANTS[..self.get()]
    }
}

impl Default for HashCount {
    fn default() -> Self {
        HashCount::ONE
    }
}

impl TryFrom<usize> for HashCount {
    type Error = Error;

    fn try_from(n: usize) -> Result<Self> {
        HashCount::new(n)
    }
}

impl From<HashCount> for usize {
    fn from(v: HashCount) -> Self {
        v.get()
    }
}

impl fmt::Display for HashCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
