//! Whole-file helpers.

use std::fs;
use std::path::Path;

use crate::decode::decode_slice;
use crate::encode::encode_to_vec;
use crate::error::{CodecResult, Error};
use crate::model::File;

/// Reads and decodes the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Decode`] if
/// its contents are not a valid texHeaders file.
pub fn read_file(path: impl AsRef<Path>) -> CodecResult<File> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_slice(&bytes)?)
}

/// Encodes `file` and writes it to `path`.
///
/// The file is encoded in memory first, so an encoding error never leaves a
/// partial file behind.
///
/// # Errors
///
/// Returns [`Error::Encode`] if `file` cannot be encoded and [`Error::Io`] if
/// the destination cannot be written.
pub fn write_file(path: impl AsRef<Path>, file: &File) -> CodecResult<()> {
    let path = path.as_ref();
    let bytes = encode_to_vec(file)?;
    fs::write(path, bytes).map_err(|source| Error::Io {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MipMap, TextureEntry};

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texHeaders.bin");
        let file = File::with_textures(vec![TextureEntry {
            path: "a_co.paa".into(),
            mip_count: 1,
            mip_count_copy: 1,
            mips: vec![MipMap::new(4, 4, 1, 0)],
            ..TextureEntry::default()
        }]);

        write_file(&path, &file).unwrap();
        assert_eq!(read_file(&path).unwrap(), file);
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, Error::Io { operation: "read", .. }));
        assert!(err.to_string().contains("missing.bin"));
    }

    #[test]
    fn encode_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let file = File {
            version: 9,
            ..File::new()
        };
        assert!(matches!(write_file(&path, &file), Err(Error::Encode(_))));
        assert!(!path.exists());
    }
}
