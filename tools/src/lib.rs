//! Inspection and maintenance tools for texHeaders index files.
//!
//! This crate backs the `texheaders` binary:
//!
//! - Summarize an index entry by entry
//! - Explain format codes and texture suffix classes
//! - Re-encode an index and check it is byte-identical
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what an index contains.

use std::fmt::Write as _;

use builder::PaxType;
use codec::{
    decode_slice, encode_to_vec, suffix_class, CodecResult, File, SuffixClass, TextureEntry,
};

/// Summary of a whole index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub magic: String,
    pub version: u32,
    pub entries: Vec<EntrySummary>,
}

/// One line of an [`InspectReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub path: String,
    pub format: String,
    pub suffix: String,
    pub file_size: u32,
    pub mip_count: usize,
    /// Dimensions of the first mip level.
    pub top_level: Option<(u16, u16)>,
    pub flags: String,
}

#[must_use]
pub fn inspect_file(file: &File) -> InspectReport {
    InspectReport {
        magic: file
            .magic
            .map_or_else(|| "(none)".to_owned(), |m| m.escape_ascii().to_string()),
        version: file.version,
        entries: file.textures.iter().map(summarize_entry).collect(),
    }
}

fn summarize_entry(entry: &TextureEntry) -> EntrySummary {
    EntrySummary {
        path: entry.path.to_string(),
        format: format_name(entry.format),
        suffix: suffix_name(entry.suffix_type),
        file_size: entry.file_size,
        mip_count: entry.mips.len(),
        top_level: entry.mips.first().map(|m| (m.width, m.height)),
        flags: entry_flags(entry),
    }
}

/// Name of an on-disk format code, e.g. `DXT5`.
#[must_use]
pub fn format_name(code: u32) -> String {
    PaxType::from_code(code).map_or_else(|| format!("unknown({code})"), |p| p.name().to_owned())
}

/// Identifier of a suffix class code, e.g. `NormalMap`.
#[must_use]
pub fn suffix_name(code: u32) -> String {
    SuffixClass::from_code(code).map_or_else(|| format!("unknown({code})"), |s| format!("{s:?}"))
}

fn entry_flags(entry: &TextureEntry) -> String {
    let flags = [
        (entry.is_alpha, "alpha"),
        (entry.is_transparent, "transparent"),
        (entry.is_alpha_non_opaque, "non-opaque"),
        (entry.has_max_color, "max-color"),
    ];
    let set: Vec<_> = flags
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();
    if set.is_empty() {
        "-".to_owned()
    } else {
        set.join(",")
    }
}

/// Renders a report as plain text, one line per entry.
#[must_use]
pub fn format_inspect(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "magic: {} version: {} textures: {}",
        report.magic,
        report.version,
        report.entries.len()
    );
    for (index, entry) in report.entries.iter().enumerate() {
        let size = entry
            .top_level
            .map_or_else(|| "-".to_owned(), |(w, h)| format!("{w}x{h}"));
        let _ = writeln!(
            out,
            "  [{index}] {} format={} suffix={} size={} mips={} top={size} flags={}",
            entry.path, entry.format, entry.suffix, entry.file_size, entry.mip_count, entry.flags
        );
    }
    out
}

/// One `classify` output line: the path, its class identifier, code and
/// description.
#[must_use]
pub fn classify_line(path: &str) -> String {
    match suffix_class(path) {
        Some(class) => format!("{path}\t{class:?} ({}): {class}", class.code()),
        None => format!("{path}\t- (0)"),
    }
}

/// Result of decoding and re-encoding an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub bytes: Vec<u8>,
    /// True when the re-encoded bytes equal the input.
    pub identical: bool,
}

/// Decodes `input` and encodes it again.
///
/// # Errors
///
/// Returns the decode or encode failure.
pub fn rewrite_bytes(input: &[u8]) -> CodecResult<Rewrite> {
    let file = decode_slice(input)?;
    let bytes = encode_to_vec(&file)?;
    let identical = bytes == input;
    Ok(Rewrite { bytes, identical })
}
