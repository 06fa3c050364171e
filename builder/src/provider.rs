//! The asset metadata provider seam.
//!
//! Parsing source texture assets is not part of this crate. A
//! [`MetadataProvider`] reads the header-level metadata of one asset and the
//! builder maps it into a texture entry.

use std::io::{Read, Seek};

/// A readable, seekable asset stream.
pub trait AssetSource: Read + Seek {}

impl<T: Read + Seek + ?Sized> AssetSource for T {}

/// Error returned by a provider.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reads texture metadata from a source asset.
///
/// Providers are shared by every build worker, so they must be `Sync`.
pub trait MetadataProvider: Sync {
    /// Reads the metadata headers of the asset in `source`.
    ///
    /// `source` is positioned at the start of the asset.
    fn read_metadata(&self, source: &mut dyn AssetSource) -> Result<AssetMetadata, ProviderError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn read_metadata(&self, source: &mut dyn AssetSource) -> Result<AssetMetadata, ProviderError> {
        (**self).read_metadata(source)
    }
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    fn read_metadata(&self, source: &mut dyn AssetSource) -> Result<AssetMetadata, ProviderError> {
        (**self).read_metadata(source)
    }
}

/// Header-level metadata of one source asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMetadata {
    /// Storage type tag of the asset, see [`crate::PaxType`].
    pub format: u16,
    /// Average color as B,G,R,A, if the asset records one.
    pub average_color: Option<[u8; 4]>,
    /// Max color as B,G,R,A, if the asset records one.
    pub max_color: Option<[u8; 4]>,
    /// Alpha flag bits, if the asset records them.
    pub alpha_flags: Option<u32>,
    /// Mip levels, largest first.
    pub mips: Vec<MipHeader>,
}

/// One mip level of a source asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MipHeader {
    pub width: u16,
    pub height: u16,
    /// Offset of the mip payload inside the asset.
    pub offset: u32,
}
