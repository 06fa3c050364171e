//! Batch builder.

use std::fs;
use std::io::Write;
use std::path::Path;

use codec::{encode_file, encode_to_vec, File, TextureEntry};
use serde::{Deserialize, Serialize};

use crate::entry::EntryContext;
use crate::error::{BuildError, BuildInputError, BuildResult, EntryError};
use crate::options::BuildOptions;
use crate::pool::{resolve_workers, run_indexed};
use crate::provider::MetadataProvider;

/// An input skipped by a lenient build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildIssue {
    /// The input path as appended.
    pub path: String,
    /// Why the input was skipped.
    pub message: String,
}

/// Builds a texHeaders file from a batch of source assets.
///
/// Inputs are built in lexicographic order of their appended paths, so the
/// output does not depend on append order or on the worker count.
#[derive(Debug)]
pub struct Builder<P> {
    provider: P,
    options: BuildOptions,
    inputs: Vec<String>,
    sorted: bool,
    issues: Vec<BuildIssue>,
}

impl<P: MetadataProvider> Builder<P> {
    /// Creates a builder with no inputs.
    #[must_use]
    pub const fn new(provider: P, options: BuildOptions) -> Self {
        Self {
            provider,
            options,
            inputs: Vec::new(),
            sorted: true,
            issues: Vec::new(),
        }
    }

    #[must_use]
    pub const fn options(&self) -> &BuildOptions {
        &self.options
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Registers one source asset path.
    ///
    /// # Errors
    ///
    /// Returns [`BuildInputError::EmptyInputPath`] if `path` is blank.
    pub fn append(&mut self, path: impl Into<String>) -> Result<(), BuildInputError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(BuildInputError::EmptyInputPath);
        }
        if self.sorted && self.inputs.last().is_some_and(|last| *last > path) {
            self.sorted = false;
        }
        self.inputs.push(path);
        Ok(())
    }

    /// Registers several paths, stopping at the first blank one. Paths before
    /// it stay registered.
    ///
    /// # Errors
    ///
    /// See [`Builder::append`].
    pub fn append_many<I, S>(&mut self, paths: I) -> Result<(), BuildInputError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().try_for_each(|path| self.append(path))
    }

    /// Registered paths. Append order until a build sorts them.
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Inputs skipped by the last build.
    #[must_use]
    pub fn issues(&self) -> &[BuildIssue] {
        &self.issues
    }

    /// Builds every registered input into a file.
    ///
    /// With `skip_invalid` set, failing inputs are recorded in
    /// [`Builder::issues`] and left out. Otherwise the first failure in sorted
    /// order aborts the build. A parallel build runs every input before
    /// reporting; a serial build stops at the failing input.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Entry`] for the first failing input in strict
    /// mode.
    pub fn build(&mut self) -> BuildResult<File> {
        if !self.sorted {
            self.inputs.sort_unstable();
            self.sorted = true;
        }
        self.issues.clear();

        let workers = resolve_workers(self.options.workers, self.inputs.len());
        log::debug!(
            "building {} inputs with {workers} worker(s)",
            self.inputs.len()
        );

        let ctx = EntryContext::new(&self.provider, &self.options);
        let mut textures = Vec::with_capacity(self.inputs.len());

        if workers <= 1 {
            for (index, input) in self.inputs.iter().enumerate() {
                let result = ctx.build(input, index);
                Self::collect(
                    self.options.skip_invalid,
                    &mut self.issues,
                    &mut textures,
                    input,
                    result,
                )?;
            }
        } else {
            let inputs = &self.inputs;
            let results = run_indexed(inputs.len(), workers, |index| {
                ctx.build(&inputs[index], index)
            });
            for (input, result) in self.inputs.iter().zip(results) {
                Self::collect(
                    self.options.skip_invalid,
                    &mut self.issues,
                    &mut textures,
                    input,
                    result,
                )?;
            }
        }

        Ok(File::with_textures(textures))
    }

    fn collect(
        skip_invalid: bool,
        issues: &mut Vec<BuildIssue>,
        textures: &mut Vec<TextureEntry>,
        input: &str,
        result: Result<TextureEntry, EntryError>,
    ) -> BuildResult<()> {
        match result {
            Ok(entry) => textures.push(entry),
            Err(err) if skip_invalid => {
                log::warn!("skipping {input}: {err}");
                issues.push(BuildIssue {
                    path: input.to_owned(),
                    message: err.to_string(),
                });
            }
            Err(source) => {
                return Err(BuildError::Entry {
                    path: input.to_owned(),
                    source,
                })
            }
        }
        Ok(())
    }

    /// Builds and encodes into `writer`.
    ///
    /// # Errors
    ///
    /// Returns the build or encode failure.
    pub fn write_to<W: Write>(&mut self, writer: W) -> BuildResult<()> {
        let file = self.build()?;
        encode_file(writer, &file)?;
        Ok(())
    }

    /// Builds, encodes and writes the file at `path`.
    ///
    /// Nothing is written if the build or the encoding fails.
    ///
    /// # Errors
    ///
    /// Returns the build, encode or write failure.
    pub fn write_file(&mut self, path: impl AsRef<Path>) -> BuildResult<()> {
        let path = path.as_ref();
        let file = self.build()?;
        let bytes = encode_to_vec(&file)?;
        fs::write(path, bytes).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
