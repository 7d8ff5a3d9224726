//! Stream buffer loader
//!
//! Drains a byte source of declared length into one exactly-sized buffer.
//! This is the single place the adapter departs from pipelined I/O: the
//! synthesis engine has no incremental-parse API, so the whole stream must
//! be resident before load. Sizes outside (0, 2^31-1] are refused up front —
//! no real module file is that large, and the engine's length argument is a
//! 32-bit int.

use super::ByteSource;
use crate::{DecodeError, Result};

/// Largest stream the loader will buffer (2^31 - 1 bytes)
pub const MAX_MODULE_BYTES: i64 = i32::MAX as i64;

/// Drain `source` fully into an exactly-sized buffer
///
/// Fails with [`DecodeError::SizeUnavailable`] when the source cannot report
/// a positive in-range length, [`DecodeError::OutOfMemory`] when the buffer
/// cannot be allocated, and [`DecodeError::ShortRead`] when the source ends
/// before delivering its declared length. A hard I/O failure from the source
/// propagates as [`DecodeError::Io`]. Nothing is allocated on the failure
/// paths except the buffer itself, which is dropped with the error.
pub fn load_fully<S: ByteSource + ?Sized>(source: &mut S) -> Result<Vec<u8>> {
    let declared = source.size().unwrap_or(-1);
    if declared <= 0 || declared > MAX_MODULE_BYTES {
        return Err(DecodeError::SizeUnavailable(declared));
    }
    let expected = declared as usize;

    let mut data = Vec::new();
    data.try_reserve_exact(expected)
        .map_err(|_| DecodeError::OutOfMemory(expected))?;
    data.resize(expected, 0);

    let mut filled = 0;
    while filled < expected {
        match source.read(&mut data[filled..])? {
            0 => {
                return Err(DecodeError::ShortRead {
                    got: filled,
                    expected,
                })
            }
            n => filled += n,
        }
    }

    Ok(data)
}
