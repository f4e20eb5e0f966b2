//! Bit storage for the backing bitmap of a [`SpellFilter`](crate::SpellFilter).

mod bytes;
pub use self::bytes::*;

/// A trait to abstract bit storage for use in a
/// [`SpellFilter`](crate::SpellFilter).
///
/// Keys are zero-based bit positions in `0..num_bits()`. Bits are only ever
/// set, never cleared.
pub trait Bitmap {
    /// Set the bit indexed by `key`.
    fn set(&mut self, key: usize);

    /// Return `true` if the bit indexed by `key` was previously set.
    fn get(&self, key: usize) -> bool;

    /// Return the number of addressable bits.
    fn num_bits(&self) -> usize;

    /// Return the size of the bitmap in bytes.
    fn byte_size(&self) -> usize;
}

/// Map the 1-indexed bit position `n` to the byte holding it, and the mask
/// selecting it within that byte.
///
/// Bits are packed least-significant first:
///
/// ```text
///            byte 0                      byte 1
///   ┌───┬───┬───┬───┬───┬───┬───┬───┐ ┌───┬───┬──
///   │ 8 │ 7 │ 6 │ 5 │ 4 │ 3 │ 2 │ 1 │ │16 │15 │ …
///   └───┴───┴───┴───┴───┴───┴───┴───┘ └───┴───┴──
/// ```
///
/// ```rust
/// use spellbloom::index_to_byte_and_mask;
///
/// assert_eq!(index_to_byte_and_mask(1), (0, 0b0000_0001));
/// assert_eq!(index_to_byte_and_mask(8), (0, 0b1000_0000));
/// assert_eq!(index_to_byte_and_mask(9), (1, 0b0000_0001));
/// ```
///
/// # Panics
///
/// Panics if `n` is 0.
#[inline]
pub fn index_to_byte_and_mask(n: usize) -> (usize, u8) {
    assert!(n > 0, "bit positions are 1-indexed");

    let n = n - 1;
    (n / 8, 1 << (n % 8))
}
