//! Encoding of texHeaders files.

use std::io::Write;

use bytestream::{ByteError, ByteWriter};

use crate::bounds::u32_from_usize;
use crate::error::{EncodeError, Location};
use crate::header::{ENTRY_FIXED_SIZE, HEADER_SIZE, MAGIC, MIP_SIZE, VERSION};
use crate::model::{File, MipMap, TextureEntry};

/// Encodes `file` into `writer`.
///
/// `magic == None` and `version == 0` are written as the supported values.
/// The texture count and each entry's `mip_count_copy` are derived from the
/// list lengths; every other field is written as stored.
///
/// # Errors
///
/// Header problems are reported before any byte is written. Other errors may
/// leave a partial file in `writer`.
pub fn encode_file<W: Write>(writer: W, file: &File) -> Result<(), EncodeError> {
    let version = check_header(file)?;
    let count = u32_from_usize(file.textures.len(), Location::File, "texture_count")?;

    let mut enc = Encoder {
        writer: ByteWriter::new(writer),
    };
    let at = Location::File;
    enc.put(at, "magic", |w| w.write_bytes(&MAGIC))?;
    enc.put(at, "version", |w| w.write_u32(version))?;
    enc.put(at, "texture_count", |w| w.write_u32(count))?;
    for (entry, texture) in file.textures.iter().enumerate() {
        enc.entry(entry, texture)?;
    }
    enc.put(at, "flush", ByteWriter::flush)
}

/// Encodes `file` into a new buffer.
///
/// # Errors
///
/// See [`encode_file`].
pub fn encode_to_vec(file: &File) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(encoded_len(file));
    encode_file(&mut out, file)?;
    Ok(out)
}

/// Number of bytes [`encode_file`] writes for `file`.
#[must_use]
pub fn encoded_len(file: &File) -> usize {
    HEADER_SIZE
        + file
            .textures
            .iter()
            .map(|t| ENTRY_FIXED_SIZE + t.path.len() + t.mips.len() * MIP_SIZE)
            .sum::<usize>()
}

fn check_header(file: &File) -> Result<u32, EncodeError> {
    if let Some(found) = file.magic {
        if found != MAGIC {
            return Err(EncodeError::InvalidMagic { found });
        }
    }
    match file.version {
        0 | VERSION => Ok(VERSION),
        found => Err(EncodeError::UnsupportedVersion { found }),
    }
}

struct Encoder<W> {
    writer: ByteWriter<W>,
}

impl<W: Write> Encoder<W> {
    fn put(
        &mut self,
        location: Location,
        field: &'static str,
        op: impl FnOnce(&mut ByteWriter<W>) -> Result<(), ByteError>,
    ) -> Result<(), EncodeError> {
        op(&mut self.writer).map_err(|err| match err {
            ByteError::InteriorNul { index } => EncodeError::InteriorNul { location, index },
            ByteError::Io { offset, source } => EncodeError::Write {
                location,
                field,
                offset,
                source,
            },
            ByteError::UnterminatedString { start, .. } => EncodeError::Write {
                location,
                field,
                offset: start,
                source: std::io::Error::from(std::io::ErrorKind::InvalidData),
            },
        })
    }

    fn entry(&mut self, entry: usize, t: &TextureEntry) -> Result<(), EncodeError> {
        let at = Location::Entry { entry };
        // Checked before any byte of the entry is written.
        let mip_count_copy = u32_from_usize(t.mips.len(), at, "mip_count_copy")?;
        if let Some(index) = t.path.as_bytes().iter().position(|&b| b == 0) {
            return Err(EncodeError::InteriorNul {
                location: at,
                index,
            });
        }

        self.put(at, "palette_count", |w| w.write_u32(t.palette_count))?;
        self.put(at, "palette_ptr", |w| w.write_u32(t.palette_ptr))?;
        for value in t.average_color_f {
            self.put(at, "average_color_f", |w| w.write_f32(value))?;
        }
        self.put(at, "average_color", |w| w.write_bytes(&t.average_color))?;
        self.put(at, "max_color", |w| w.write_bytes(&t.max_color))?;
        self.put(at, "clamp_flags", |w| w.write_u32(t.clamp_flags))?;
        self.put(at, "transparent_color", |w| {
            w.write_u32(t.transparent_color)
        })?;
        self.put(at, "has_max_color", |w| w.write_bool(t.has_max_color))?;
        self.put(at, "is_alpha", |w| w.write_bool(t.is_alpha))?;
        self.put(at, "is_transparent", |w| w.write_bool(t.is_transparent))?;
        self.put(at, "is_alpha_non_opaque", |w| {
            w.write_bool(t.is_alpha_non_opaque)
        })?;
        self.put(at, "mip_count", |w| w.write_u32(t.mip_count))?;
        self.put(at, "format", |w| w.write_u32(t.format))?;
        self.put(at, "little_endian", |w| w.write_bool(t.little_endian))?;
        self.put(at, "is_primary_format", |w| {
            w.write_bool(t.is_primary_format)
        })?;
        self.put(at, "path", |w| w.write_cstring(t.path.as_bytes()))?;
        self.put(at, "suffix_type", |w| w.write_u32(t.suffix_type))?;
        self.put(at, "mip_count_copy", |w| w.write_u32(mip_count_copy))?;
        for (mip, m) in t.mips.iter().enumerate() {
            self.mip(Location::Mip { entry, mip }, m)?;
        }
        self.put(at, "file_size", |w| w.write_u32(t.file_size))
    }

    fn mip(&mut self, at: Location, m: &MipMap) -> Result<(), EncodeError> {
        self.put(at, "width", |w| w.write_u16(m.width))?;
        self.put(at, "height", |w| w.write_u16(m.height))?;
        self.put(at, "reserved_zero", |w| w.write_u16(m.reserved_zero))?;
        self.put(at, "format", |w| w.write_u8(m.format))?;
        self.put(at, "reserved_three", |w| w.write_u8(m.reserved_three))?;
        self.put(at, "data_offset", |w| w.write_u32(m.data_offset))
    }
}
