//! Builds `texHeaders.bin` index files from batches of source texture assets.
//!
//! A [`Builder`] takes a list of `.paa` paths, reads each asset's metadata
//! through a [`MetadataProvider`], and assembles a [`codec::File`]. Building
//! can run on a worker pool; the result is identical to a serial build.
//!
//! # Example
//!
//! ```no_run
//! use builder::{
//!     AssetMetadata, AssetSource, BuildOptions, Builder, MetadataProvider, ProviderError,
//! };
//!
//! struct MyPaaReader;
//!
//! impl MetadataProvider for MyPaaReader {
//!     fn read_metadata(&self, source: &mut dyn AssetSource) -> Result<AssetMetadata, ProviderError> {
//!         // Parse the asset headers here.
//!         Err("not implemented".into())
//!     }
//! }
//!
//! let mut builder = Builder::new(MyPaaReader, BuildOptions::default());
//! builder.append("data/wall_co.paa")?;
//! builder.write_file("texHeaders.bin")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design Principles
//!
//! - **Deterministic** - Inputs are sorted; results are collected by index.
//! - **Lexical paths** - Stored paths never depend on the filesystem layout beyond the inputs.
//! - **Explicit failure policy** - Strict builds fail, lenient builds report [`BuildIssue`]s.

mod builder;
mod entry;
mod error;
mod options;
mod path;
mod pax;
mod pool;
mod provider;

pub use builder::{BuildIssue, Builder};
pub use error::{BuildError, BuildInputError, BuildResult, EntryError};
pub use options::{BuildOptions, Workers};
pub use path::{clean, relative_to, PathNormalizer};
pub use pax::PaxType;
pub use pool::{resolve_workers, resolve_workers_for_host, run_indexed};
pub use provider::{AssetMetadata, AssetSource, MetadataProvider, MipHeader, ProviderError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = BuildOptions::default();
        let _ = Workers::Auto;
        let _ = AssetMetadata::default();
        let _ = MipHeader::default();
        let _ = PaxType::Dxt5;
        let _: BuildResult<()> = Ok(());
        let _ = resolve_workers_for_host(Workers::Auto, 10, 8);
    }
}
