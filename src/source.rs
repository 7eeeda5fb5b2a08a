//! Ownership of the input bytes.

use std::fs::File;
use std::io;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;

/// Owns the document bytes for as long as any `Raw` borrowed from them.
///
/// The buffer is immutable after construction, so any number of cursors may
/// scan it concurrently.
pub struct Source {
    bytes: Bytes,
}

enum Bytes {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Source {
    /// Wrap an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Bytes::Owned(bytes.into()),
        }
    }

    /// Memory-map a file. The mapping is read-only and never written through.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the map is private and read-only; we never hand out
        // mutable access to the underlying pages.
        let map = unsafe { Mmap::map(&file)? };
        Ok(Self {
            bytes: Bytes::Mapped(map),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.bytes {
            Bytes::Owned(v) => v,
            Bytes::Mapped(m) => m,
        }
    }
}

impl Deref for Source {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Source {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
