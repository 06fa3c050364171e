//! Little-endian byte stream primitives for the texheaders codec.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for sequential,
//! fixed-width little-endian encoding and decoding over `std::io` streams.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Single pass** - No seeking and no lookahead; a reader consumes exactly what it returns.
//! - **No domain knowledge** - This crate knows nothing about textures or index files.
//! - **Explicit errors** - All failures return structured errors carrying the stream offset.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new(Vec::new());
//! writer.write_u32(42).unwrap();
//! writer.write_cstring(b"tex_co.paa").unwrap();
//!
//! let bytes = writer.into_inner();
//!
//! let mut reader = ByteReader::new(bytes.as_slice());
//! assert_eq!(reader.read_u32().unwrap(), 42);
//! assert_eq!(reader.read_cstring().unwrap(), b"tex_co.paa");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
