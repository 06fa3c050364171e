//! Decoder, encoder and validator for `texHeaders.bin` texture index files.
//!
//! A texHeaders file is a flat little-endian table of texture metadata: one
//! entry per texture with its path, colors, flags, storage format and mip
//! descriptors. This crate reads and writes that table byte for byte and
//! checks the cross-field rules the format relies on.
//!
//! # Features
//!
//! - Byte-exact decode and encode: `encode(decode(bytes)) == bytes`
//! - Collect-all validation with field locations
//! - Suffix classification of texture paths
//! - Optional `serde` support for the model (`serde` feature)
//!
//! # Design Principles
//!
//! - **Lossless** - Every on-disk field has a slot in the model, float bit patterns included.
//! - **Fail-fast codec, collect-all validator** - Framing errors stop decoding; semantic
//!   problems are reported together by [`validate_file`].
//! - **No panics on input** - Counts and sizes are narrowed with checked conversions.

mod bounds;
mod decode;
mod encode;
mod error;
mod file;
mod header;
mod model;
mod suffix;
mod validate;

pub use bounds::{u32_from_u64, u32_from_usize, BoundsError};
pub use decode::{decode_file, decode_slice};
pub use encode::{encode_file, encode_to_vec, encoded_len};
pub use error::{
    CodecResult, DecodeError, EncodeError, Error, Location, ValidationError, Violation,
    ViolationKind,
};
pub use file::{read_file, write_file};
pub use header::{ENTRY_FIXED_SIZE, HEADER_SIZE, MAGIC, MIP_SIZE, VERSION};
pub use model::{File, MipMap, TextureEntry, TexturePath};
pub use suffix::{classify_suffix, suffix_class, SuffixClass};
pub use validate::{validate_entry, validate_file};
