use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::hash::{digit_count_for, HashCount, HashVariant};
use crate::{Bitmap, ByteBitmap, Result};

/// Construct [`SpellFilter`] instances with varying parameters.
///
/// ```rust
/// use spellbloom::{FilterBuilder, HashCount};
///
/// let mut filter = FilterBuilder::with_size(64 * 1024)?
///     .hash_limit(HashCount::TWO)
///     .build();
///
/// filter.insert("success", HashCount::TWO);
/// assert!(filter.check("success", HashCount::TWO));
/// # Ok::<(), spellbloom::Error>(())
/// ```
#[derive(Debug)]
pub struct FilterBuilder<B>
where
    B: Bitmap,
{
    bitmap: B,
    hash_limit: HashCount,
}

impl FilterBuilder<ByteBitmap> {
    /// Use a new, empty bitmap of `size_bytes` bytes.
    pub fn with_size(size_bytes: usize) -> Result<Self> {
        ByteBitmap::new(size_bytes).map(Self::with_bitmap)
    }

    /// Use a bitmap read from `path`, as written by [`SpellFilter::save()`].
    ///
    /// The file does not record the [`HashCount`] it was built with, so the
    /// caller must check it with the same count.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ByteBitmap::load(path).map(Self::with_bitmap)
    }

    /// Use a bitmap restored from raw bytes.
    pub fn from_bytes(bitmap: impl Into<Bytes>) -> Result<Self> {
        ByteBitmap::from_bytes(bitmap).map(Self::with_bitmap)
    }
}

impl<B> FilterBuilder<B>
where
    B: Bitmap,
{
    /// Use `bitmap` as the bit storage for the filter.
    ///
    /// Providing a `bitmap` instance that is non-empty restores the state of a
    /// previously built [`SpellFilter`].
    pub fn with_bitmap(bitmap: B) -> Self {
        Self {
            bitmap,
            hash_limit: HashCount::MAX,
        }
    }

    /// Bound the number of hash variants any call may use.
    ///
    /// Requests for more hashes than `limit` use only the first `limit`
    /// variants. Defaults to [`HashCount::MAX`].
    pub fn hash_limit(self, limit: HashCount) -> Self {
        Self {
            hash_limit: limit,
            ..self
        }
    }

    /// Initialise the [`SpellFilter`] instance with the provided parameters.
    pub fn build(self) -> SpellFilter<B> {
        SpellFilter {
            digit_count: digit_count_for(self.bitmap.num_bits()),
            bitmap: self.bitmap,
            hash_limit: self.hash_limit,
        }
    }
}

/// A bloom filter of dictionary words.
///
/// Each word sets (at build time) or tests (at check time) one bit per hash
/// variant. A word is reported present only if all of its bits are set, so
/// [`check`](SpellFilter::check) never reports a built word as missing, but
/// may report an unknown word as present.
///
/// ```rust
/// use spellbloom::{FilterBuilder, HashCount};
///
/// let mut filter = FilterBuilder::with_size(128)?.build();
/// filter.build(["apple\n", "banana\n"].iter(), HashCount::ONE);
///
/// assert!(filter.check("apple", HashCount::ONE));
/// # Ok::<(), spellbloom::Error>(())
/// ```
///
/// The filter must be queried with the same [`HashCount`] and the same bitmap
/// size used to build it; neither is validated.
///
/// A built filter is never mutated by [`check`](SpellFilter::check) and can be
/// shared between threads for concurrent lookups.
///
/// With the `serde` feature the bitmap and hash limit are serialised; the digit
/// count is always derived from the bitmap size when deserialising.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "FilterParts<B>")
)]
pub struct SpellFilter<B = ByteBitmap>
where
    B: Bitmap,
{
    bitmap: B,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    digit_count: usize,
    hash_limit: HashCount,
}

/// The serialised fields of a [`SpellFilter`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FilterParts<B> {
    bitmap: B,
    hash_limit: HashCount,
}

#[cfg(feature = "serde")]
impl<B> From<FilterParts<B>> for SpellFilter<B>
where
    B: Bitmap,
{
    fn from(parts: FilterParts<B>) -> Self {
        FilterBuilder::with_bitmap(parts.bitmap)
            .hash_limit(parts.hash_limit)
            .build()
    }
}

impl<B> SpellFilter<B>
where
    B: Bitmap,
{
    /// Insert every word yielded by `words`.
    ///
    /// A trailing line terminator (`\n` or `\r\n`) is removed from each word
    /// before it is hashed. Inserting a word more than once has no further
    /// effect.
    pub fn build<I, S>(&mut self, words: I, hashes: HashCount)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut n = 0_usize;
        for word in words {
            self.insert(strip_line_terminator(word.as_ref()), hashes);
            n += 1;
        }

        debug!(words = n, %hashes, "built filter");
    }

    /// Insert a single `word`.
    ///
    /// Any subsequent calls to [`check`](SpellFilter::check) for the same
    /// `word` and `hashes` will always return true.
    pub fn insert(&mut self, word: &str, hashes: HashCount) {
        let num_bits = self.bitmap.num_bits();
        for &variant in self.variants(hashes) {
            let key = bit_for_digest(variant.digest(word, self.digit_count), num_bits);
            self.bitmap.set(key);
        }
    }

    /// Checks if `word` exists in the filter.
    ///
    /// If `check` returns true, `word` has **probably** been inserted
    /// previously. If `check` returns false, `word` has **definitely not** been
    /// inserted into the filter using `hashes`.
    pub fn check(&self, word: &str, hashes: HashCount) -> bool {
        self.bit_positions(word, hashes).all(|key| self.bitmap.get(key))
    }

    /// Return the zero-based bit positions `word` maps to, one per hash
    /// variant in use.
    pub fn bit_positions<'a>(
        &'a self,
        word: &'a str,
        hashes: HashCount,
    ) -> impl Iterator<Item = usize> + 'a {
        let num_bits = self.bitmap.num_bits();
        self.variants(hashes)
            .iter()
            .map(move |v| bit_for_digest(v.digest(word, self.digit_count), num_bits))
    }

    /// Return the number of hex digits kept from each truncated digest.
    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// Return the configured upper bound on hash variants per word.
    pub fn hash_limit(&self) -> HashCount {
        self.hash_limit
    }

    /// Return the number of bits in the filter.
    pub fn num_bits(&self) -> usize {
        self.bitmap.num_bits()
    }

    /// Return the byte size of this filter.
    pub fn byte_size(&self) -> usize {
        self.bitmap.byte_size()
    }

    /// Borrow the underlying bitmap.
    pub fn bitmap(&self) -> &B {
        &self.bitmap
    }

    /// Consume the filter, returning the underlying bitmap.
    pub fn into_bitmap(self) -> B {
        self.bitmap
    }

    fn variants(&self, hashes: HashCount) -> &'static [HashVariant] {
        hashes.min(self.hash_limit).variants()
    }
}

impl SpellFilter<ByteBitmap> {
    /// Write the filter bitmap to `path`.
    ///
    /// Only the raw bits are stored; see [`ByteBitmap::save()`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.bitmap.save(path)
    }

    /// Return the proportion of bits that are set, between 0 and 1.
    pub fn fill_ratio(&self) -> f64 {
        self.bitmap.count_ones() as f64 / self.bitmap.num_bits() as f64
    }
}

/// Reduce `digest` to a zero-based bit position in a bitmap of `num_bits` bits.
///
/// The residue `digest % num_bits` is a 1-indexed bit position, with a residue
/// of 0 wrapping around to the last bit. This matches the layout of bitmap
/// files produced by earlier versions of the tool.
fn bit_for_digest(digest: u64, num_bits: usize) -> usize {
    let residue = (digest % num_bits as u64) as usize;
    match residue {
        0 => num_bits - 1,
        n => n - 1,
    }
}

fn strip_line_terminator(word: &str) -> &str {
    match word.strip_suffix('\n') {
        Some(w) => w.strip_suffix('\r').unwrap_or(w),
        None => word,
    }
}
