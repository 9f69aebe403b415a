//! Run orchestration: parse, transform, serialize, write.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use stencil_core::{ConfigError, ExpandError, MappingTable, PlaceholderMatcher, UnderscoreMatcher};
use stencil_expand::{compute_output_name, transform};

/// Driver-level errors. Every variant is terminal for the whole run;
/// files already written for earlier inputs are not rolled back.
#[derive(Debug, Error)]
pub enum StencilError {
    /// Malformed mapping input, surfaced before any file is touched.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input is not valid Rust syntax.
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: syn::Error,
    },

    /// A placeholder could not be expanded.
    #[error("{}: {source}", path.display())]
    Expand {
        path: PathBuf,
        source: ExpandError,
    },

    /// A file could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An argument resolved to no source files.
    #[error("no source files found for {arg:?}")]
    NoSources { arg: String },
}

/// Orchestrates one run.
///
/// Owns the read-only mapping table and the placeholder matcher; each
/// input file is parsed, transformed, and written to completion before
/// the next begins. There is no cross-file state beyond the table.
pub struct Driver {
    mapping: MappingTable,
    matcher: Box<dyn PlaceholderMatcher>,
    out_dir: PathBuf,
}

impl Driver {
    /// Create a driver with the default underscore matcher, writing
    /// generated files into the current working directory.
    pub fn new(mapping: MappingTable) -> Self {
        Self {
            mapping,
            matcher: Box::new(UnderscoreMatcher::new()),
            out_dir: PathBuf::from("."),
        }
    }

    /// Write generated files into `dir` instead of the working directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Swap the placeholder matching convention.
    pub fn with_matcher(mut self, matcher: Box<dyn PlaceholderMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Process one template file: read, parse, transform, pretty-print,
    /// write under the computed output name.
    ///
    /// Returns the path of the generated file.
    ///
    /// # Errors
    /// Any failure aborts without writing output for this file.
    pub fn process_file(&self, path: &Path) -> Result<PathBuf, StencilError> {
        let source = fs::read_to_string(path).map_err(|source| StencilError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tree = syn::parse_file(&source).map_err(|source| StencilError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let replaced =
            transform(&mut tree, &self.mapping, self.matcher.as_ref()).map_err(|source| {
                StencilError::Expand {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        debug!(
            "{}: replaced {} placeholder(s)",
            path.display(),
            replaced.len()
        );

        let out_path = self
            .out_dir
            .join(compute_output_name(path, &replaced, self.mapping.keys()));
        let rendered = prettyplease::unparse(&tree);
        fs::write(&out_path, rendered).map_err(|source| StencilError::Io {
            path: out_path.clone(),
            source,
        })?;
        info!("{} -> {}", path.display(), out_path.display());

        Ok(out_path)
    }

    /// Process files in order; the first failure aborts the run.
    pub fn process_all(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>, StencilError> {
        files.iter().map(|file| self.process_file(file)).collect()
    }
}
