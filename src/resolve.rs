//! Resolution of command-line arguments to source file lists.

use std::fs;
use std::path::{Path, PathBuf};

use crate::driver::StencilError;

/// Capability: turn one command-line argument into the list of source
/// files it names.
///
/// Kept behind a trait so the driver embeds no module-system knowledge;
/// a build-system-aware resolver can be swapped in without touching the
/// pipeline.
pub trait SourceResolver {
    fn resolve(&self, arg: &str) -> Result<Vec<PathBuf>, StencilError>;
}

/// Filesystem resolver.
///
/// An argument ending in `.rs` is taken as a literal file; anything else
/// names a directory whose top-level `.rs` files are resolved, sorted
/// for a deterministic processing order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResolver;

impl SourceResolver for FsResolver {
    fn resolve(&self, arg: &str) -> Result<Vec<PathBuf>, StencilError> {
        if arg.ends_with(".rs") {
            return Ok(vec![PathBuf::from(arg)]);
        }

        let dir = Path::new(arg);
        let entries = fs::read_dir(dir).map_err(|source| StencilError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StencilError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "rs") && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(StencilError::NoSources {
                arg: arg.to_string(),
            });
        }
        Ok(files)
    }
}
