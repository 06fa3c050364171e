//! Decoding of texHeaders files.

use std::io::{self, Read};

use bytestream::{ByteError, ByteReader};

use crate::error::{DecodeError, Location};
use crate::header::{MAGIC, VERSION};
use crate::model::{File, MipMap, TextureEntry, TexturePath};

/// Upper bound on capacity reserved from an untrusted texture count.
const MAX_PREALLOC_TEXTURES: usize = 4096;
/// Upper bound on capacity reserved from an untrusted mip count.
const MAX_PREALLOC_MIPS: usize = 16;

/// Decodes a complete file from `reader`.
///
/// The reader is consumed sequentially; bytes after the last entry are not
/// read. The magic and version are checked before any entry is decoded.
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered. No partial file is
/// returned.
pub fn decode_file<R: Read>(reader: R) -> Result<File, DecodeError> {
    Decoder::new(reader).file()
}

/// Decodes a complete file from an in-memory buffer.
///
/// # Errors
///
/// See [`decode_file`].
pub fn decode_slice(bytes: &[u8]) -> Result<File, DecodeError> {
    decode_file(bytes)
}

struct Decoder<R> {
    reader: ByteReader<R>,
}

impl<R: Read> Decoder<R> {
    const fn new(inner: R) -> Self {
        Self {
            reader: ByteReader::new(inner),
        }
    }

    fn file(mut self) -> Result<File, DecodeError> {
        let at = Location::File;

        let magic = self
            .reader
            .read_array::<4>()
            .map_err(|err| read_error(err, at, "magic"))?;
        if magic != MAGIC {
            return Err(DecodeError::InvalidMagic { found: magic });
        }

        let version = self.u32(at, "version")?;
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion { found: version });
        }

        let count = self.u32(at, "texture_count")? as usize;
        let mut textures = Vec::with_capacity(count.min(MAX_PREALLOC_TEXTURES));
        for entry in 0..count {
            textures.push(self.entry(entry)?);
        }

        Ok(File {
            magic: Some(magic),
            version,
            textures,
        })
    }

    fn entry(&mut self, entry: usize) -> Result<TextureEntry, DecodeError> {
        let at = Location::Entry { entry };

        let palette_count = self.u32(at, "palette_count")?;
        let palette_ptr = self.u32(at, "palette_ptr")?;
        let average_color_f = [
            self.f32(at, "average_color_f")?,
            self.f32(at, "average_color_f")?,
            self.f32(at, "average_color_f")?,
            self.f32(at, "average_color_f")?,
        ];
        let average_color = self.color(at, "average_color")?;
        let max_color = self.color(at, "max_color")?;
        let clamp_flags = self.u32(at, "clamp_flags")?;
        let transparent_color = self.u32(at, "transparent_color")?;
        let has_max_color = self.bool(at, "has_max_color")?;
        let is_alpha = self.bool(at, "is_alpha")?;
        let is_transparent = self.bool(at, "is_transparent")?;
        let is_alpha_non_opaque = self.bool(at, "is_alpha_non_opaque")?;
        let mip_count = self.u32(at, "mip_count")?;
        let format = self.u32(at, "format")?;
        let little_endian = self.bool(at, "little_endian")?;
        let is_primary_format = self.bool(at, "is_primary_format")?;
        let path = self
            .reader
            .read_cstring()
            .map(TexturePath::from_bytes)
            .map_err(|err| read_error(err, at, "path"))?;
        let suffix_type = self.u32(at, "suffix_type")?;
        let mip_count_copy = self.u32(at, "mip_count_copy")?;

        let mip_total = mip_count_copy as usize;
        let mut mips = Vec::with_capacity(mip_total.min(MAX_PREALLOC_MIPS));
        for mip in 0..mip_total {
            mips.push(self.mip(Location::Mip { entry, mip })?);
        }

        let file_size = self.u32(at, "file_size")?;

        Ok(TextureEntry {
            path,
            palette_count,
            palette_ptr,
            average_color_f,
            average_color,
            max_color,
            clamp_flags,
            transparent_color,
            has_max_color,
            is_alpha,
            is_transparent,
            is_alpha_non_opaque,
            mip_count,
            format,
            little_endian,
            is_primary_format,
            suffix_type,
            mip_count_copy,
            file_size,
            mips,
        })
    }

    fn mip(&mut self, at: Location) -> Result<MipMap, DecodeError> {
        Ok(MipMap {
            width: self.u16(at, "width")?,
            height: self.u16(at, "height")?,
            reserved_zero: self.u16(at, "reserved_zero")?,
            format: self.u8(at, "format")?,
            reserved_three: self.u8(at, "reserved_three")?,
            data_offset: self.u32(at, "data_offset")?,
        })
    }

    fn u8(&mut self, at: Location, field: &'static str) -> Result<u8, DecodeError> {
        self.reader.read_u8().map_err(|err| read_error(err, at, field))
    }

    fn bool(&mut self, at: Location, field: &'static str) -> Result<bool, DecodeError> {
        self.reader
            .read_bool()
            .map_err(|err| read_error(err, at, field))
    }

    fn u16(&mut self, at: Location, field: &'static str) -> Result<u16, DecodeError> {
        self.reader
            .read_u16()
            .map_err(|err| read_error(err, at, field))
    }

    fn u32(&mut self, at: Location, field: &'static str) -> Result<u32, DecodeError> {
        self.reader
            .read_u32()
            .map_err(|err| read_error(err, at, field))
    }

    fn f32(&mut self, at: Location, field: &'static str) -> Result<f32, DecodeError> {
        self.reader
            .read_f32()
            .map_err(|err| read_error(err, at, field))
    }

    fn color(&mut self, at: Location, field: &'static str) -> Result<[u8; 4], DecodeError> {
        self.reader
            .read_array::<4>()
            .map_err(|err| read_error(err, at, field))
    }
}

fn read_error(err: ByteError, location: Location, field: &'static str) -> DecodeError {
    match err {
        ByteError::Io { offset, source } => DecodeError::Read {
            location,
            field,
            offset,
            source,
        },
        ByteError::UnterminatedString { start, .. } => DecodeError::InvalidAsciiz {
            location,
            field,
            start,
        },
        other @ ByteError::InteriorNul { .. } => DecodeError::Read {
            location,
            field,
            offset: 0,
            source: io::Error::new(io::ErrorKind::InvalidData, other),
        },
    }
}
