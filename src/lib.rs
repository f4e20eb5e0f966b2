//! spellbloom implements a bloom filter spell checker: a dictionary of words is
//! reduced to a flat bitmap that answers "is this word spelt correctly?"
//! without storing the dictionary itself.
//!
//! Each word is hashed by up to three fixed algorithms (MD5, SHA-256 and
//! CRC-32, always in that order) and each digest selects one bit in the bitmap.
//! Building a filter sets those bits, checking a word tests them. A correctly
//! spelt word is never reported as wrong; a misspelt word is occasionally
//! reported as correct, with a probability that depends on the bitmap size,
//! the number of words and the number of hashes used.
//!
//! ```rust
//! use spellbloom::{FilterBuilder, HashCount};
//!
//! let mut filter = FilterBuilder::with_size(64 * 1024)?.build();
//! filter.build(["apple", "banana", "cherry"].iter(), HashCount::TWO);
//!
//! assert!(filter.check("banana", HashCount::TWO));
//! # Ok::<(), spellbloom::Error>(())
//! ```
//!
//! The bitmap is persisted as raw bytes (see [`ByteBitmap::save()`]). Neither
//! the [`HashCount`] nor any other parameter is stored with it; a filter must
//! be checked with the same [`HashCount`] it was built with.
//!
//! ## Features
//!
//! * `serde` - enable serialisation with [serde], disabled by default
//! * `cli` - build the `spellbloom` command line tool, enabled by default
//!
//! [serde]: (https://github.com/serde-rs/serde)

pub mod accuracy;
mod bitmap;
mod error;
mod filter;
pub mod hash;
pub mod words;

pub use accuracy::{expected_false_positive_rate, random_word};
pub use bitmap::*;
pub use error::*;
pub use filter::*;
pub use hash::{HashCount, HashVariant};
