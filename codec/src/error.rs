//! Error types for codec operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::bounds::BoundsError;
use crate::header::display_tag;

/// Result type for file-level codec helpers.
pub type CodecResult<T> = Result<T, Error>;

/// Position of a field within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// The file header.
    File,
    /// A texture entry.
    Entry { entry: usize },
    /// A mip descriptor inside a texture entry.
    Mip { entry: usize, mip: usize },
}

impl Location {
    /// Returns the dotted path of `field` at this location.
    #[must_use]
    pub fn join(&self, field: &str) -> String {
        match self {
            Self::File => field.to_owned(),
            _ => format!("{self}.{field}"),
        }
    }

    /// Entry index, if the location is inside an entry.
    #[must_use]
    pub const fn entry(&self) -> Option<usize> {
        match self {
            Self::File => None,
            Self::Entry { entry } | Self::Mip { entry, .. } => Some(*entry),
        }
    }

    /// Mip index, if the location is a mip descriptor.
    #[must_use]
    pub const fn mip(&self) -> Option<usize> {
        match self {
            Self::Mip { mip, .. } => Some(*mip),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Entry { entry } => write!(f, "texture[{entry}]"),
            Self::Mip { entry, mip } => write!(f, "texture[{entry}].mipmaps[{mip}]"),
        }
    }
}

pub(crate) fn field_path(location: &Location, field: &str) -> String {
    location.join(field)
}

/// Errors that can occur while decoding a file.
///
/// Decoding is fail-fast: the first error aborts and no partial file is
/// returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The leading tag is not `0DHT`.
    #[error("invalid magic \"{}\", expected \"0DHT\"", display_tag(.found))]
    InvalidMagic { found: [u8; 4] },

    /// The version is not the supported one.
    #[error("unsupported version {found}, expected 1")]
    UnsupportedVersion { found: u32 },

    /// The stream failed or ended while reading a field.
    #[error("cannot read {} at byte {offset}: {source}", field_path(.location, .field))]
    Read {
        location: Location,
        field: &'static str,
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The stream ended before a string terminator.
    #[error("{} starting at byte {start} is not NUL-terminated", field_path(.location, .field))]
    InvalidAsciiz {
        location: Location,
        field: &'static str,
        start: u64,
    },
}

impl DecodeError {
    /// Location of the failing field, if the error is tied to one.
    #[must_use]
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::InvalidMagic { .. } | Self::UnsupportedVersion { .. } => Some(Location::File),
            Self::Read { location, .. } | Self::InvalidAsciiz { location, .. } => Some(*location),
        }
    }

    /// Returns `true` if the input ended early.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        match self {
            Self::Read { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
            Self::InvalidAsciiz { .. } => true,
            Self::InvalidMagic { .. } | Self::UnsupportedVersion { .. } => false,
        }
    }
}

/// Errors that can occur while encoding a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// The file carries a magic other than `0DHT`.
    #[error("cannot encode magic \"{}\", expected \"0DHT\"", display_tag(.found))]
    InvalidMagic { found: [u8; 4] },

    /// The file carries a version other than 1.
    #[error("cannot encode version {found}, expected 1")]
    UnsupportedVersion { found: u32 },

    /// A count or length does not fit its on-disk field.
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    /// An entry path contains a NUL byte.
    #[error("{location}.path contains NUL at index {index}")]
    InteriorNul { location: Location, index: usize },

    /// The sink failed while writing a field.
    #[error("cannot write {} at byte {offset}: {source}", field_path(.location, .field))]
    Write {
        location: Location,
        field: &'static str,
        offset: u64,
        #[source]
        source: io::Error,
    },
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub location: Location,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

/// What a [`Violation`] is about.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViolationKind {
    MagicMismatch { found: [u8; 4] },
    VersionMismatch { found: u32 },
    TooManyTextures { count: usize },
    EmptyPath,
    FormatOutOfRange { format: u32 },
    TooManyMipMaps { count: usize },
    /// `mip_count` differs from the number of mip descriptors.
    MipCountMismatch { mip_count: u32, actual: usize },
    /// `mip_count_copy` differs from the number of mip descriptors.
    MipCountCopyMismatch { mip_count_copy: u32, actual: usize },
    MipCountFieldsDiffer { mip_count: u32, mip_count_copy: u32 },
    ZeroDimension { width: u16, height: u16 },
    ReservedZero { found: u16 },
    ReservedThree { found: u8 },
    MipFormatMismatch { mip_format: u8, entry_format: u32 },
    /// A mip offset is smaller than the previous one.
    DecreasingOffset { offset: u32, previous: u32 },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MagicMismatch { found } => {
                write!(f, "magic \"{}\" is not \"0DHT\"", display_tag(found))
            }
            Self::VersionMismatch { found } => write!(f, "version {found} is not 1"),
            Self::TooManyTextures { count } => {
                write!(f, "{count} textures do not fit a u32 count")
            }
            Self::EmptyPath => write!(f, "path is empty"),
            Self::FormatOutOfRange { format } => {
                write!(f, "format {format} does not fit in a byte")
            }
            Self::TooManyMipMaps { count } => {
                write!(f, "{count} mipmaps do not fit a u32 count")
            }
            Self::MipCountMismatch { mip_count, actual } => {
                write!(f, "mip_count {mip_count} but {actual} mipmaps present")
            }
            Self::MipCountCopyMismatch {
                mip_count_copy,
                actual,
            } => write!(
                f,
                "mip_count_copy {mip_count_copy} but {actual} mipmaps present"
            ),
            Self::MipCountFieldsDiffer {
                mip_count,
                mip_count_copy,
            } => write!(
                f,
                "mip_count {mip_count} differs from mip_count_copy {mip_count_copy}"
            ),
            Self::ZeroDimension { width, height } => {
                write!(f, "zero dimension {width}x{height}")
            }
            Self::ReservedZero { found } => write!(f, "reserved field is {found}, expected 0"),
            Self::ReservedThree { found } => write!(f, "reserved field is {found}, expected 3"),
            Self::MipFormatMismatch {
                mip_format,
                entry_format,
            } => write!(
                f,
                "format {mip_format} differs from texture format {entry_format}"
            ),
            Self::DecreasingOffset { offset, previous } => write!(
                f,
                "data offset {offset} is below previous offset {previous}"
            ),
        }
    }
}

/// Every violation found in a file or entry.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    let details = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} violation(s): {details}", violations.len())
}

impl ValidationError {
    /// All violations in discovery order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Number of violations. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always `false`; provided for API symmetry with [`Self::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Append-only accumulator used by the validator.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) fn push(&mut self, location: Location, kind: ViolationKind) {
        self.0.push(Violation { location, kind });
    }

    pub(crate) fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations: self.0 })
        }
    }
}

/// Umbrella error for the file-level helpers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("encode: {0}")]
    Encode(#[from] EncodeError),

    #[error("validate: {0}")]
    Validation(#[from] ValidationError),

    /// Opening, reading or writing a file failed.
    #[error("cannot {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        assert_eq!(Location::File.to_string(), "file");
        assert_eq!(Location::Entry { entry: 3 }.to_string(), "texture[3]");
        assert_eq!(
            Location::Mip { entry: 1, mip: 2 }.to_string(),
            "texture[1].mipmaps[2]"
        );
    }

    #[test]
    fn location_join() {
        assert_eq!(Location::File.join("version"), "version");
        assert_eq!(
            Location::Mip { entry: 0, mip: 4 }.join("width"),
            "texture[0].mipmaps[4].width"
        );
    }

    #[test]
    fn location_indices() {
        assert_eq!(Location::File.entry(), None);
        assert_eq!(Location::Entry { entry: 5 }.entry(), Some(5));
        assert_eq!(Location::Mip { entry: 5, mip: 1 }.mip(), Some(1));
        assert_eq!(Location::Entry { entry: 5 }.mip(), None);
    }

    #[test]
    fn decode_error_display() {
        let err = DecodeError::InvalidMagic { found: *b"XDHT" };
        assert!(err.to_string().contains("XDHT"));

        let err = DecodeError::Read {
            location: Location::Entry { entry: 2 },
            field: "format",
            offset: 77,
            source: io::Error::from(io::ErrorKind::UnexpectedEof),
        };
        let msg = err.to_string();
        assert!(msg.contains("texture[2].format"), "{msg}");
        assert!(msg.contains("77"), "{msg}");
        assert!(err.is_truncated());
        assert_eq!(err.location(), Some(Location::Entry { entry: 2 }));
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::InteriorNul {
            location: Location::Entry { entry: 0 },
            index: 4,
        };
        assert_eq!(err.to_string(), "texture[0].path contains NUL at index 4");
    }

    #[test]
    fn violations_finish() {
        assert!(Violations::default().finish().is_ok());

        let mut v = Violations::default();
        v.push(Location::Entry { entry: 0 }, ViolationKind::EmptyPath);
        v.push(
            Location::Mip { entry: 0, mip: 1 },
            ViolationKind::ReservedThree { found: 4 },
        );
        let err = v.finish().unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(!err.is_empty());
        let msg = err.to_string();
        assert!(msg.starts_with("2 violation(s)"), "{msg}");
        assert!(msg.contains("texture[0]: path is empty"), "{msg}");
        assert!(msg.contains("texture[0].mipmaps[1]"), "{msg}");
    }

    #[test]
    fn umbrella_prefixes_stage() {
        let err = Error::from(DecodeError::UnsupportedVersion { found: 2 });
        assert!(err.to_string().starts_with("decode: "));

        let err = Error::from(EncodeError::UnsupportedVersion { found: 2 });
        assert!(err.to_string().starts_with("encode: "));
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<DecodeError>();
        assert_error::<EncodeError>();
        assert_error::<ValidationError>();
        assert_error::<Error>();
    }
}
