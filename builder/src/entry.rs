//! Building one texture entry from one source asset.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use codec::{classify_suffix, u32_from_u64, u32_from_usize, Location, MipMap, TextureEntry};

use crate::error::{BuildInputError, EntryError};
use crate::options::BuildOptions;
use crate::path::PathNormalizer;
use crate::pax::PaxType;
use crate::provider::{AssetMetadata, MetadataProvider, MipHeader};

const TRANSPARENT_COLOR: u32 = 0xFFFF_FFFF;
const NO_MAX_COLOR: [u8; 4] = [0xFF; 4];

/// Everything needed to turn an input path into an entry. Shared read-only by
/// all build workers.
pub(crate) struct EntryContext<'a, P> {
    provider: &'a P,
    normalizer: PathNormalizer,
    overrides: &'a HashMap<String, u32>,
    lowercase: bool,
}

impl<'a, P: MetadataProvider> EntryContext<'a, P> {
    pub(crate) fn new(provider: &'a P, opts: &'a BuildOptions) -> Self {
        Self {
            provider,
            normalizer: PathNormalizer::new(opts),
            overrides: &opts.suffix_overrides,
            lowercase: opts.lowercase_paths,
        }
    }

    /// Builds the entry for `input`. `index` is the entry's sorted position.
    pub(crate) fn build(&self, input: &str, index: usize) -> Result<TextureEntry, EntryError> {
        let at = Location::Entry { entry: index };
        check_extension(input)?;

        let mut source = fs::File::open(input).map_err(EntryError::Open)?;
        let size = source.metadata().map_err(EntryError::Stat)?.len();
        let meta = self
            .provider
            .read_metadata(&mut source)
            .map_err(EntryError::Provider)?;
        let pax = PaxType::from_tag(meta.format)
            .ok_or(EntryError::UnsupportedPaxFormat { code: meta.format })?;

        let path = self.normalizer.normalize(input);
        let suffix_type = self.suffix_type(&path);
        let file_size = u32_from_u64(size, at, "file_size")?;

        let mut entry = TextureEntry {
            palette_count: 1,
            palette_ptr: 0,
            clamp_flags: 0,
            transparent_color: TRANSPARENT_COLOR,
            little_endian: true,
            is_primary_format: true,
            format: u32::from(pax.code()),
            suffix_type,
            file_size,
            path: path.into(),
            ..TextureEntry::default()
        };
        assign_colors(&mut entry, &meta);
        assign_alpha(&mut entry, meta.alpha_flags);
        assign_mips(&mut entry, &meta.mips, pax.code(), at)?;

        log::trace!(
            "built {input} as {} ({pax}, {} mips)",
            entry.path,
            entry.mips.len()
        );
        Ok(entry)
    }

    /// Override for the normalized path first, classifier second.
    fn suffix_type(&self, path: &str) -> u32 {
        let key = if self.lowercase {
            path.to_lowercase()
        } else {
            path.to_owned()
        };
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or_else(|| classify_suffix(path).0)
    }
}

/// Accepts `.paa` inputs, case-insensitively.
pub(crate) fn check_extension(input: &str) -> Result<(), BuildInputError> {
    let ext = Path::new(input)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    match ext.as_deref() {
        Some("paa") => Ok(()),
        Some("pac") => Err(BuildInputError::PacUnsupported {
            path: input.to_owned(),
        }),
        _ => Err(BuildInputError::UnsupportedInputFormat {
            path: input.to_owned(),
        }),
    }
}

/// Average color as stored; max color or the all-ones default; the float
/// tuple is the average color reordered from B,G,R,A to R,G,B,A.
fn assign_colors(entry: &mut TextureEntry, meta: &AssetMetadata) {
    entry.average_color = meta.average_color.unwrap_or_default();
    match meta.max_color {
        Some(color) => {
            entry.max_color = color;
            entry.has_max_color = true;
        }
        None => {
            entry.max_color = NO_MAX_COLOR;
            entry.has_max_color = false;
        }
    }

    let [b, g, r, a] = entry.average_color;
    entry.average_color_f = [r, g, b, a].map(|c| f32::from(c) / 255.0);
}

fn assign_alpha(entry: &mut TextureEntry, flags: Option<u32>) {
    let Some(flags) = flags else {
        entry.is_alpha = false;
        entry.is_transparent = false;
        entry.is_alpha_non_opaque = false;
        return;
    };
    entry.is_alpha = flags & 1 != 0;
    entry.is_transparent = flags & 2 != 0;
    entry.is_alpha_non_opaque = entry.is_alpha && entry.average_alpha() < 0x80;
}

fn assign_mips(
    entry: &mut TextureEntry,
    mips: &[MipHeader],
    format: u8,
    at: Location,
) -> Result<(), EntryError> {
    entry.mips = mips
        .iter()
        .map(|m| MipMap::new(m.width, m.height, format, m.offset))
        .collect();
    let count = u32_from_usize(entry.mips.len(), at, "mip_count")?;
    entry.mip_count = count;
    entry.mip_count_copy = count;
    Ok(())
}
