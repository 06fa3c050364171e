//! Builder configuration.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options controlling how a [`Builder`](crate::Builder) turns inputs into entries.
///
/// Missing fields take their [`Default`] values when deserialized.
///
/// ```
/// use builder::{BuildOptions, Workers};
///
/// let opts = BuildOptions {
///     skip_invalid: true,
///     workers: Workers::Auto,
///     ..BuildOptions::default()
/// };
/// assert!(opts.lowercase_paths);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Forced suffix class per normalized path. Keys are matched lowercased
    /// when `lowercase_paths` is on.
    pub suffix_overrides: HashMap<String, u32>,
    /// Stored paths are made relative to this directory.
    pub base_dir: Option<PathBuf>,
    /// Record failing inputs as issues instead of aborting the build.
    pub skip_invalid: bool,
    pub lowercase_paths: bool,
    /// Store paths with `\` separators.
    pub backslash_paths: bool,
    /// Remove one leading `.\` from stored paths.
    pub strip_dot_prefix: bool,
    pub workers: Workers,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            suffix_overrides: HashMap::new(),
            base_dir: None,
            skip_invalid: false,
            lowercase_paths: true,
            backslash_paths: true,
            strip_dot_prefix: true,
            workers: Workers::default(),
        }
    }
}

/// Requested build parallelism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workers {
    /// Pick a worker count from the host's available parallelism.
    Auto,
    /// Use at most this many workers. `0` and `1` build serially.
    Fixed(usize),
}

impl Default for Workers {
    fn default() -> Self {
        Self::Fixed(1)
    }
}
