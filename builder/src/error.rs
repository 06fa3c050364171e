//! Error types for build operations.

use std::io;
use std::path::PathBuf;

use codec::{BoundsError, EncodeError};
use thiserror::Error;

use crate::provider::ProviderError;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// An input path is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildInputError {
    #[error("input path is empty")]
    EmptyInputPath,

    /// The extension is neither `.paa` nor `.pac`.
    #[error("unsupported input texture format: {path}")]
    UnsupportedInputFormat { path: String },

    /// `.pac` sources are recognized but not supported.
    #[error(".pac source is not supported: {path}")]
    PacUnsupported { path: String },
}

/// Failure to build the entry for one input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EntryError {
    #[error(transparent)]
    Input(#[from] BuildInputError),

    #[error("open source: {0}")]
    Open(#[source] io::Error),

    #[error("stat source: {0}")]
    Stat(#[source] io::Error),

    /// The metadata provider rejected the asset.
    #[error("read metadata: {0}")]
    Provider(#[source] ProviderError),

    /// The asset type tag has no on-disk format code.
    #[error("unsupported pax format {code:#06x}")]
    UnsupportedPaxFormat { code: u16 },

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

impl EntryError {
    /// The input error, if this failure is about the path itself.
    #[must_use]
    pub const fn as_input(&self) -> Option<&BuildInputError> {
        match self {
            Self::Input(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors that can occur while building or writing a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// An input failed in strict mode.
    #[error("build {path:?}: {source}")]
    Entry {
        path: String,
        #[source]
        source: EntryError,
    },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The output file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// The failing input path, for [`BuildError::Entry`].
    #[must_use]
    pub fn input_path(&self) -> Option<&str> {
        match self {
            Self::Entry { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// The input error behind a strict-mode failure, if any.
    #[must_use]
    pub const fn input_error(&self) -> Option<&BuildInputError> {
        match self {
            Self::Entry { source, .. } => source.as_input(),
            _ => None,
        }
    }
}
