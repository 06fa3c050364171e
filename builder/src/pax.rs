//! Source asset storage types and their on-disk format codes.

use std::fmt;

/// Storage type of a `.paa` asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaxType {
    GrayA,
    Argb1555,
    Argb4444,
    Argb8888,
    Dxt1,
    Dxt2,
    Dxt3,
    Dxt4,
    Dxt5,
}

impl PaxType {
    pub const ALL: [Self; 9] = [
        Self::GrayA,
        Self::Argb1555,
        Self::Argb4444,
        Self::Argb8888,
        Self::Dxt1,
        Self::Dxt2,
        Self::Dxt3,
        Self::Dxt4,
        Self::Dxt5,
    ];

    /// Returns the type for an asset type tag.
    #[must_use]
    pub const fn from_tag(tag: u16) -> Option<Self> {
        Some(match tag {
            0x8080 => Self::GrayA,
            0x1555 => Self::Argb1555,
            0x4444 => Self::Argb4444,
            0x8888 => Self::Argb8888,
            0xFF01 => Self::Dxt1,
            0xFF02 => Self::Dxt2,
            0xFF03 => Self::Dxt3,
            0xFF04 => Self::Dxt4,
            0xFF05 => Self::Dxt5,
            _ => return None,
        })
    }

    /// Returns the type stored under an on-disk format code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| u32::from(t.code()) == code)
    }

    /// Type tag inside the asset.
    #[must_use]
    pub const fn tag(self) -> u16 {
        match self {
            Self::GrayA => 0x8080,
            Self::Argb1555 => 0x1555,
            Self::Argb4444 => 0x4444,
            Self::Argb8888 => 0x8888,
            Self::Dxt1 => 0xFF01,
            Self::Dxt2 => 0xFF02,
            Self::Dxt3 => 0xFF03,
            Self::Dxt4 => 0xFF04,
            Self::Dxt5 => 0xFF05,
        }
    }

    /// Format code stored in texture entries and mip descriptors.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::GrayA => 1,
            Self::Argb1555 => 3,
            Self::Argb4444 => 4,
            Self::Argb8888 => 5,
            Self::Dxt1 => 6,
            Self::Dxt2 => 7,
            Self::Dxt3 => 8,
            Self::Dxt4 => 9,
            Self::Dxt5 => 10,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GrayA => "GRAYA",
            Self::Argb1555 => "ARGB1555",
            Self::Argb4444 => "ARGB4444",
            Self::Argb8888 => "ARGB8888",
            Self::Dxt1 => "DXT1",
            Self::Dxt2 => "DXT2",
            Self::Dxt3 => "DXT3",
            Self::Dxt4 => "DXT4",
            Self::Dxt5 => "DXT5",
        }
    }
}

impl fmt::Display for PaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
