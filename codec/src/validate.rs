//! Cross-field validation of decoded or built files.
//!
//! The decoder only checks what it needs to frame the stream. Everything
//! else is checked here, and every violation is collected rather than
//! stopping at the first one.

use crate::error::{Location, ValidationError, ViolationKind, Violations};
use crate::header::{MAGIC, VERSION};
use crate::model::{File, MipMap, TextureEntry};

/// Validates the header and every entry of `file`.
///
/// A `None` magic and a zero version are the empty defaults and are not
/// reported.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation in file order.
pub fn validate_file(file: &File) -> Result<(), ValidationError> {
    let mut out = Violations::default();

    if let Some(found) = file.magic {
        if found != MAGIC {
            out.push(Location::File, ViolationKind::MagicMismatch { found });
        }
    }
    if file.version != 0 && file.version != VERSION {
        out.push(
            Location::File,
            ViolationKind::VersionMismatch {
                found: file.version,
            },
        );
    }
    if u32::try_from(file.textures.len()).is_err() {
        out.push(
            Location::File,
            ViolationKind::TooManyTextures {
                count: file.textures.len(),
            },
        );
    }

    for (index, entry) in file.textures.iter().enumerate() {
        out.extend(check_entry(entry, index));
    }

    out.finish()
}

/// Validates a single entry as if it were stored at `index`.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation in the entry.
pub fn validate_entry(entry: &TextureEntry, index: usize) -> Result<(), ValidationError> {
    check_entry(entry, index).finish()
}

fn check_entry(entry: &TextureEntry, index: usize) -> Violations {
    let mut out = Violations::default();
    let at = Location::Entry { entry: index };
    let actual = entry.mips.len();

    if entry.path.is_empty() {
        out.push(at, ViolationKind::EmptyPath);
    }
    if !entry.format_fits_u8() {
        out.push(
            at,
            ViolationKind::FormatOutOfRange {
                format: entry.format,
            },
        );
    }
    if entry.mip_count as usize != actual {
        out.push(
            at,
            ViolationKind::MipCountMismatch {
                mip_count: entry.mip_count,
                actual,
            },
        );
    }
    if entry.mip_count_copy as usize != actual {
        out.push(
            at,
            ViolationKind::MipCountCopyMismatch {
                mip_count_copy: entry.mip_count_copy,
                actual,
            },
        );
    }
    if entry.mip_count != entry.mip_count_copy {
        out.push(
            at,
            ViolationKind::MipCountFieldsDiffer {
                mip_count: entry.mip_count,
                mip_count_copy: entry.mip_count_copy,
            },
        );
    }
    if u32::try_from(actual).is_err() {
        out.push(at, ViolationKind::TooManyMipMaps { count: actual });
    }

    let entry_format = u8::try_from(entry.format).ok();
    let mut previous: Option<u32> = None;
    for (mip, m) in entry.mips.iter().enumerate() {
        check_mip(
            &mut out,
            Location::Mip { entry: index, mip },
            m,
            entry_format,
            previous,
        );
        previous = Some(m.data_offset);
    }

    out
}

fn check_mip(
    out: &mut Violations,
    at: Location,
    m: &MipMap,
    entry_format: Option<u8>,
    previous: Option<u32>,
) {
    if m.width == 0 || m.height == 0 {
        out.push(
            at,
            ViolationKind::ZeroDimension {
                width: m.width,
                height: m.height,
            },
        );
    }
    if m.reserved_zero != 0 {
        out.push(
            at,
            ViolationKind::ReservedZero {
                found: m.reserved_zero,
            },
        );
    }
    if m.reserved_three != MipMap::RESERVED_THREE {
        out.push(
            at,
            ViolationKind::ReservedThree {
                found: m.reserved_three,
            },
        );
    }
    // An out-of-range entry format is already reported on the entry.
    if let Some(format) = entry_format {
        if m.format != format {
            out.push(
                at,
                ViolationKind::MipFormatMismatch {
                    mip_format: m.format,
                    entry_format: u32::from(format),
                },
            );
        }
    }
    if let Some(previous) = previous {
        if m.data_offset < previous {
            out.push(
                at,
                ViolationKind::DecreasingOffset {
                    offset: m.data_offset,
                    previous,
                },
            );
        }
    }
}
