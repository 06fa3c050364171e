//! In-memory model of a texHeaders file.
//!
//! The model is plain data: every on-disk field has a slot, nothing is
//! derived on access, and nothing is normalized on decode. Re-encoding a
//! decoded [`File`] therefore reproduces the input bytes.

use std::borrow::Cow;
use std::fmt;

use crate::header::{MAGIC, VERSION};

/// A decoded or built texHeaders file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct File {
    /// File tag. `None` is the empty default and encodes as [`MAGIC`].
    pub magic: Option<[u8; 4]>,
    /// File version. `0` is the empty default and encodes as [`VERSION`].
    pub version: u32,
    /// Texture entries in file order.
    pub textures: Vec<TextureEntry>,
}

impl File {
    /// Creates an empty file carrying the supported magic and version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: Some(MAGIC),
            version: VERSION,
            textures: Vec::new(),
        }
    }

    /// Creates a file carrying the supported magic and version.
    #[must_use]
    pub fn with_textures(textures: Vec<TextureEntry>) -> Self {
        Self {
            textures,
            ..Self::new()
        }
    }

    /// Returns the entry stored under `path`, if any.
    #[must_use]
    pub fn find(&self, path: &[u8]) -> Option<&TextureEntry> {
        self.textures.iter().find(|t| t.path.as_bytes() == path)
    }
}

/// Metadata for one texture.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextureEntry {
    /// Texture path relative to the index file.
    pub path: TexturePath,
    /// Usually 1.
    pub palette_count: u32,
    /// Usually 0.
    pub palette_ptr: u32,
    /// Average color as R,G,B,A floats in `0.0..=1.0`.
    pub average_color_f: [f32; 4],
    /// Average color as B,G,R,A bytes.
    pub average_color: [u8; 4],
    /// Max color as B,G,R,A bytes.
    pub max_color: [u8; 4],
    /// Usually 0.
    pub clamp_flags: u32,
    /// Usually `0xFFFF_FFFF`.
    pub transparent_color: u32,
    /// `max_color` was provided by the source asset.
    pub has_max_color: bool,
    /// Basic alpha transparency.
    pub is_alpha: bool,
    /// Non-interpolated alpha.
    pub is_transparent: bool,
    /// `is_alpha` and average alpha below `0x80`.
    pub is_alpha_non_opaque: bool,
    /// Declared mip count. Expected to equal `mips.len()`.
    pub mip_count: u32,
    /// Storage format code. Only the `u8` range is meaningful.
    pub format: u32,
    /// Expected to be `true`.
    pub little_endian: bool,
    /// Source asset is a `.paa` file.
    pub is_primary_format: bool,
    /// Suffix class code, see [`crate::suffix`].
    pub suffix_type: u32,
    /// Second copy of the mip count; this one frames the mip list on disk.
    pub mip_count_copy: u32,
    /// Source asset size in bytes.
    pub file_size: u32,
    /// Mip descriptors, largest first.
    pub mips: Vec<MipMap>,
}

impl TextureEntry {
    /// Average alpha byte.
    #[must_use]
    pub const fn average_alpha(&self) -> u8 {
        self.average_color[3]
    }

    /// Returns `true` if the stored format code fits the `u8` mip field.
    #[must_use]
    pub const fn format_fits_u8(&self) -> bool {
        self.format <= u8::MAX as u32
    }
}

/// One mip level descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MipMap {
    pub width: u16,
    pub height: u16,
    /// Expected to be 0.
    pub reserved_zero: u16,
    /// Expected to equal the entry format.
    pub format: u8,
    /// Expected to be 3.
    pub reserved_three: u8,
    /// Offset of the mip payload inside the source asset.
    pub data_offset: u32,
}

impl MipMap {
    /// Value of [`MipMap::reserved_three`] in well-formed files.
    pub const RESERVED_THREE: u8 = 3;

    /// Creates a descriptor with the reserved fields set to their sentinels.
    #[must_use]
    pub const fn new(width: u16, height: u16, format: u8, data_offset: u32) -> Self {
        Self {
            width,
            height,
            reserved_zero: 0,
            format,
            reserved_three: Self::RESERVED_THREE,
            data_offset,
        }
    }
}

/// Raw bytes of an entry path.
///
/// Paths are stored without any text decoding so that arbitrary bytes survive
/// a decode/encode round trip. The path must not contain NUL.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TexturePath(Vec<u8>);

impl TexturePath {
    /// Creates a path from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the path as UTF-8 if it is valid.
    #[must_use]
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Returns the path as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Debug for TexturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for TexturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for TexturePath {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for TexturePath {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for TexturePath {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for TexturePath {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TexturePath;

    impl Serialize for TexturePath {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self.to_str() {
                Some(text) => serializer.serialize_str(text),
                None => serializer.serialize_bytes(self.as_bytes()),
            }
        }
    }

    struct PathVisitor;

    impl<'de> Visitor<'de> for PathVisitor {
        type Value = TexturePath;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a texture path string or byte sequence")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(TexturePath::from(v))
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(TexturePath::from_bytes(v.to_vec()))
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
            while let Some(byte) = seq.next_element::<u8>()? {
                bytes.push(byte);
            }
            Ok(TexturePath::from_bytes(bytes))
        }
    }

    impl<'de> Deserialize<'de> for TexturePath {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(PathVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_file_has_supported_header() {
        let file = File::new();
        assert_eq!(file.magic, Some(MAGIC));
        assert_eq!(file.version, VERSION);
        assert!(file.textures.is_empty());
    }

    #[test]
    fn default_file_is_empty_default() {
        let file = File::default();
        assert_eq!(file.magic, None);
        assert_eq!(file.version, 0);
    }

    #[test]
    fn mip_new_sets_sentinels() {
        let mip = MipMap::new(256, 128, 6, 40);
        assert_eq!(mip.reserved_zero, 0);
        assert_eq!(mip.reserved_three, 3);
        assert_eq!(mip.format, 6);
    }

    #[test]
    fn texture_path_preserves_non_utf8() {
        let path = TexturePath::from_bytes(vec![b'a', 0xFF, b'b']);
        assert_eq!(path.as_bytes(), &[b'a', 0xFF, b'b']);
        assert!(path.to_str().is_none());
        assert_eq!(path.to_string_lossy(), "a\u{FFFD}b");
    }

    #[test]
    fn texture_path_display() {
        let path = TexturePath::from("data\\tex_co.paa");
        assert_eq!(path.to_string(), "data\\tex_co.paa");
        assert_eq!(path.len(), 15);
        assert!(!path.is_empty());
    }

    #[test]
    fn find_by_path() {
        let file = File::with_textures(vec![
            TextureEntry {
                path: "a_co.paa".into(),
                ..TextureEntry::default()
            },
            TextureEntry {
                path: "b_nohq.paa".into(),
                suffix_type: 3,
                ..TextureEntry::default()
            },
        ]);
        assert_eq!(file.find(b"b_nohq.paa").map(|t| t.suffix_type), Some(3));
        assert!(file.find(b"missing.paa").is_none());
    }

    #[test]
    fn format_fits_u8() {
        let mut entry = TextureEntry {
            format: 255,
            ..TextureEntry::default()
        };
        assert!(entry.format_fits_u8());
        entry.format = 256;
        assert!(!entry.format_fits_u8());
    }
}
