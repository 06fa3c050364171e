//! Error types for byte stream operations.

use std::io;

use thiserror::Error;

/// Result type for byte stream operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading or writing a byte stream.
#[derive(Debug, Error)]
pub enum ByteError {
    /// The underlying reader or writer failed, including short reads.
    #[error("i/o failure at byte {offset}: {source}")]
    Io {
        /// Stream position where the failing operation started.
        offset: u64,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The stream ended before a NUL terminator was found.
    #[error("string at byte {start} is not NUL-terminated ({read} bytes before end of stream)")]
    UnterminatedString {
        /// Stream position where the string started.
        start: u64,
        /// Number of string bytes read before the stream ended.
        read: usize,
    },

    /// A string passed to the writer contains a NUL byte.
    #[error("string contains an interior NUL at index {index}")]
    InteriorNul {
        /// Index of the first NUL byte.
        index: usize,
    },
}

impl ByteError {
    /// Returns `true` if the error was caused by the stream ending early.
    #[must_use]
    pub fn is_unexpected_eof(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == io::ErrorKind::UnexpectedEof,
            Self::UnterminatedString { .. } => true,
            Self::InteriorNul { .. } => false,
        }
    }
}
