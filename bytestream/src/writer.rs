//! Little-endian writer over any [`Write`] sink.

use std::io::Write;

use crate::error::{ByteError, ByteResult};

/// A sequential little-endian writer.
///
/// Every call writes exactly the bytes of its value; nothing is padded or
/// buffered beyond what the underlying sink does.
#[derive(Debug)]
pub struct ByteWriter<W> {
    inner: W,
    position: u64,
}

impl<W: Write> ByteWriter<W> {
    /// Creates a new `ByteWriter` positioned at byte 0.
    #[must_use]
    pub const fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Consumes the writer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ByteResult<()> {
        self.inner
            .write_all(bytes)
            .map_err(|source| ByteError::Io {
                offset: self.position,
                source,
            })?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Writes a `u8`.
    pub fn write_u8(&mut self, value: u8) -> ByteResult<()> {
        self.write_bytes(&[value])
    }

    /// Writes a one-byte boolean as `0` or `1`.
    pub fn write_bool(&mut self, value: bool) -> ByteResult<()> {
        self.write_u8(u8::from(value))
    }

    /// Writes a little-endian `u16`.
    pub fn write_u16(&mut self, value: u16) -> ByteResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) -> ByteResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a little-endian IEEE-754 `f32` with its exact bit pattern.
    pub fn write_f32(&mut self, value: f32) -> ByteResult<()> {
        self.write_u32(value.to_bits())
    }

    /// Writes `bytes` followed by a NUL terminator.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::InteriorNul`] without writing anything if `bytes`
    /// contains a NUL.
    pub fn write_cstring(&mut self, bytes: &[u8]) -> ByteResult<()> {
        if let Some(index) = bytes.iter().position(|&b| b == 0) {
            return Err(ByteError::InteriorNul { index });
        }
        self.write_bytes(bytes)?;
        self.write_u8(0)
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> ByteResult<()> {
        self.inner.flush().map_err(|source| ByteError::Io {
            offset: self.position,
            source,
        })
    }
}
