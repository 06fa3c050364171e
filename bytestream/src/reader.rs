//! Little-endian reader over any [`Read`] source.

use std::io::{self, Read};

use crate::error::{ByteError, ByteResult};

/// A sequential little-endian reader.
///
/// The reader never seeks and never reads ahead: every call consumes exactly
/// the bytes of the value it returns. The position counts bytes consumed by
/// successful reads and is reported in errors.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    /// Creates a new `ByteReader` positioned at byte 0.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Consumes the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> ByteResult<[u8; N]> {
        let mut out = [0u8; N];
        self.inner
            .read_exact(&mut out)
            .map_err(|source| ByteError::Io {
                offset: self.position,
                source,
            })?;
        self.position += N as u64;
        Ok(out)
    }

    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    /// Reads a one-byte boolean. Any non-zero value is `true`.
    pub fn read_bool(&mut self) -> ByteResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> ByteResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> ByteResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian IEEE-754 `f32`, preserving the exact bit pattern.
    pub fn read_f32(&mut self) -> ByteResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Reads a NUL-terminated byte string. The terminator is consumed but not
    /// returned.
    pub fn read_cstring(&mut self) -> ByteResult<Vec<u8>> {
        let start = self.position;
        let mut out = Vec::with_capacity(64);
        loop {
            let mut byte = [0u8; 1];
            match self.inner.read_exact(&mut byte) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(ByteError::UnterminatedString {
                        start,
                        read: out.len(),
                    });
                }
                Err(source) => {
                    return Err(ByteError::Io {
                        offset: self.position,
                        source,
                    });
                }
            }
            self.position += 1;
            if byte[0] == 0 {
                return Ok(out);
            }
            out.push(byte[0]);
        }
    }
}
