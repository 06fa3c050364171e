#![allow(dead_code)]

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use builder::{AssetMetadata, AssetSource, MetadataProvider, MipHeader, ProviderError};

/// Reads the tiny asset layout written by [`write_asset`].
///
/// Layout: tag u16, mip count u8, presence bits u8 (average, max, alpha),
/// average color, max color, alpha flags u8.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetadataProvider for FakeProvider {
    fn read_metadata(&self, source: &mut dyn AssetSource) -> Result<AssetMetadata, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        if bytes.len() < 13 {
            return Err(format!("asset too short: {} bytes", bytes.len()).into());
        }

        let present = bytes[3];
        let mips = (0..bytes[2])
            .map(|i| MipHeader {
                width: 256 >> i,
                height: 128 >> i,
                offset: 32 + u32::from(i) * 64,
            })
            .collect();
        Ok(AssetMetadata {
            format: u16::from_le_bytes([bytes[0], bytes[1]]),
            average_color: (present & 1 != 0).then(|| [bytes[4], bytes[5], bytes[6], bytes[7]]),
            max_color: (present & 2 != 0).then(|| [bytes[8], bytes[9], bytes[10], bytes[11]]),
            alpha_flags: (present & 4 != 0).then(|| u32::from(bytes[12])),
            mips,
        })
    }
}

/// Asset description for [`write_asset`].
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    pub tag: u16,
    pub mips: u8,
    pub average: Option<[u8; 4]>,
    pub max: Option<[u8; 4]>,
    pub alpha: Option<u8>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            tag: 0xFF05,
            mips: 3,
            average: Some([10, 20, 30, 255]),
            max: None,
            alpha: None,
        }
    }
}

/// Writes `asset` at `root/rel`, creating parent directories.
pub fn write_asset(root: &Path, rel: &str, asset: Asset) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let mut present = 0u8;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&asset.tag.to_le_bytes());
    bytes.push(asset.mips);
    bytes.push(0);
    bytes.extend_from_slice(&asset.average.unwrap_or_default());
    bytes.extend_from_slice(&asset.max.unwrap_or_default());
    bytes.push(asset.alpha.unwrap_or_default());
    if asset.average.is_some() {
        present |= 1;
    }
    if asset.max.is_some() {
        present |= 2;
    }
    if asset.alpha.is_some() {
        present |= 4;
    }
    bytes[3] = present;
    // Padding so file sizes differ between assets.
    bytes.extend(std::iter::repeat(0xAB).take(rel.len()));

    fs::write(&path, bytes).unwrap();
    path
}

pub fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_owned()
}

/// Reads a whole asset back, for size checks.
pub fn file_len(path: &Path) -> u64 {
    let mut bytes = Vec::new();
    fs::File::open(path).unwrap().read_to_end(&mut bytes).unwrap();
    bytes.len() as u64
}
