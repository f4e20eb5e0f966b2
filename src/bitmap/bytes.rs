use std::convert::TryFrom;
use std::{fs, path::Path};

use bytes::{Bytes, BytesMut};
use tracing::info;

use crate::bitmap::index_to_byte_and_mask;
use crate::{Bitmap, Error, Result};

/// A plain, heap-allocated, `O(1)` indexed bitmap using `bytes::BytesMut` for
/// storage.
///
/// This type provides fast `O(1)` read and write operations, trading `O(n)`
/// space for the additional performance.
///
/// The [`ByteBitmap`] representation is suitable for persistence without the
/// need for serialisation: [`ByteBitmap::save()`] writes the raw bytes with no
/// header, length prefix or checksum, and [`ByteBitmap::load()`] restores it.
/// The number of bits is always `8 * byte_size()`; the hash configuration used
/// to populate the bitmap is not recorded and must be known by the reader.
///
/// With the `serde` feature a `ByteBitmap` serialises as its raw bytes, and
/// deserialising applies the same checks as [`ByteBitmap::from_bytes()`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Bytes", into = "Bytes")
)]
pub struct ByteBitmap {
    bitmap: BytesMut,
}

impl ByteBitmap {
    /// Allocate a zero-filled bitmap of `size_bytes * 8` bits.
    ///
    /// Returns [`Error::InvalidSize`] if `size_bytes` is 0.
    pub fn new(size_bytes: usize) -> Result<Self> {
        if size_bytes == 0 {
            return Err(Error::InvalidSize(size_bytes));
        }

        Ok(Self {
            bitmap: BytesMut::zeroed(size_bytes),
        })
    }

    /// Wrap an existing byte sequence, such as the contents of a bitmap file.
    ///
    /// Returns [`Error::InvalidSize`] if `bitmap` is empty.
    pub fn from_bytes(bitmap: impl Into<Bytes>) -> Result<Self> {
        let bitmap = bitmap.into();
        if bitmap.is_empty() {
            return Err(Error::InvalidSize(0));
        }

        Ok(Self {
            bitmap: BytesMut::from(bitmap),
        })
    }

    /// Read a bitmap previously written by [`ByteBitmap::save()`].
    ///
    /// The file is read in a single operation and its length determines the
    /// size of the bitmap.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::BitmapUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), bytes = data.len(), "loaded bitmap");

        Self::from_bytes(data)
    }

    /// Write the raw bitmap bytes to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.bitmap).map_err(|source| Error::BitmapUnwritable {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), bytes = self.bitmap.len(), "saved bitmap");

        Ok(())
    }

    /// Borrow the raw bitmap bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn freeze(self) -> Bytes {
        self.bitmap.freeze()
    }

    /// Return the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bitmap.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl TryFrom<Bytes> for ByteBitmap {
    type Error = Error;

    fn try_from(bitmap: Bytes) -> Result<Self> {
        Self::from_bytes(bitmap)
    }
}

impl From<ByteBitmap> for Bytes {
    fn from(v: ByteBitmap) -> Self {
        v.freeze()
    }
}

impl Bitmap for ByteBitmap {
    fn set(&mut self, key: usize) {
        let (offset, mask) = index_to_byte_and_mask(key + 1);
        self.bitmap[offset] |= mask;
    }

    fn get(&self, key: usize) -> bool {
        let (offset, mask) = index_to_byte_and_mask(key + 1);
        self.bitmap[offset] & mask != 0
    }

    fn num_bits(&self) -> usize {
        self.bitmap.len() * 8
    }

    fn byte_size(&self) -> usize {
        self.bitmap.len()
    }
}
