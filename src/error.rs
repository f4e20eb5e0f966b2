use std::{io, path::PathBuf};

use thiserror::Error;

/// A specialised [`Result`](std::result::Result) for filter operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned when constructing, persisting or measuring a
/// [`SpellFilter`](crate::SpellFilter).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The bitmap file could not be read.
    #[error("unable to read bitmap from {}: {source}", .path.display())]
    BitmapUnreadable {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },

    /// The bitmap file could not be written.
    #[error("unable to write bitmap to {}: {source}", .path.display())]
    BitmapUnwritable {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },

    /// A bitmap must hold at least one byte.
    #[error("bitmap size must be positive, got {0} bytes")]
    InvalidSize(usize),

    /// The hash variant ordinal does not name a supported algorithm.
    #[error("unsupported hash variant {0}, expected 0, 1 or 2")]
    UnsupportedHashVariant(usize),

    /// At least one hash variant must be used.
    #[error("hash count must be at least 1, got {0}")]
    InvalidHashCount(usize),

    /// An accuracy estimate needs at least one probe word.
    #[error("probe count must be positive")]
    EmptyProbeCount,

    /// The dictionary of words could not be read.
    #[error("unable to read words from {}: {source}", .path.display())]
    WordSourceUnreadable {
        /// The dictionary file.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
}
