//! File header constants.

/// Magic tag identifying texHeaders files.
///
/// This value is fixed and must never change across versions.
pub const MAGIC: [u8; 4] = *b"0DHT";

/// The only supported file version.
pub const VERSION: u32 = 1;

/// Header size in bytes: magic, version and texture count.
pub const HEADER_SIZE: usize = 4 + 4 + 4;

/// Size of one mip descriptor in bytes.
pub const MIP_SIZE: usize = 2 + 2 + 2 + 1 + 1 + 4;

/// Size of a texture entry in bytes, excluding the path and mip descriptors.
///
/// Counts the path terminator.
pub const ENTRY_FIXED_SIZE: usize = 4 // palette_count
    + 4 // palette_ptr
    + 16 // average_color_f
    + 4 // average_color
    + 4 // max_color
    + 4 // clamp_flags
    + 4 // transparent_color
    + 4 // alpha booleans
    + 4 // mip_count
    + 4 // format
    + 2 // little_endian, is_primary_format
    + 1 // path terminator
    + 4 // suffix_type
    + 4 // mip_count_copy
    + 4; // file_size

/// Renders a 4-byte tag for diagnostics, escaping non-printable bytes.
pub(crate) fn display_tag(tag: &[u8; 4]) -> String {
    tag.escape_ascii().to_string()
}
