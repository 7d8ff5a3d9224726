//! Byte-source capability and stream buffering
//!
//! The host pipeline hands the adapter an opaque byte source; the engine
//! needs the whole stream in one contiguous buffer before it can parse
//! anything. This module defines the minimal capability the adapter
//! consumes from the source ([`ByteSource`]) and the loader that drains it
//! into a bounded, exactly-sized buffer ([`load_fully`]).

pub mod loader;

pub use loader::{load_fully, MAX_MODULE_BYTES};

use std::io::{self, Read, Seek, SeekFrom};

/// Minimal capability the adapter consumes from the host's byte source
///
/// No write or source-level seek capability is required: once loaded, the
/// engine seeks internally against its own copy of the data.
pub trait ByteSource {
    /// Total length of the source in bytes, or `None` when unknown
    fn size(&mut self) -> Option<i64>;

    /// Read up to `buf.len()` bytes; may deliver fewer than requested
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Any seekable reader is a usable byte source
///
/// The length is measured by seeking to the end and back; a source whose
/// cursor cannot be restored reports its size as unknown.
impl<T: Read + Seek> ByteSource for T {
    fn size(&mut self) -> Option<i64> {
        let here = self.stream_position().ok()?;
        let end = self.seek(SeekFrom::End(0)).ok()?;
        self.seek(SeekFrom::Start(here)).ok()?;
        i64::try_from(end.saturating_sub(here)).ok()
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }
}
