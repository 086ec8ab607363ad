//! Ties discovery, import extraction, and size computation together into
//! the `(package, imports)` tuples the checker consumes.

use crate::discovery::{discover_packages, DiscoveryError};
use crate::imports::{extract_imports, ImportError};
use crate::resolve::resolve_import_path;
use crate::size::size_of_file;
use arch_guard_core::checker::{ImportInput, PackageInput};
use std::path::Path;
use thiserror::Error;

/// Errors encountered while collecting a project's packages.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Directory discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// Parsing a source file failed.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// Reading a source file failed.
    #[error("unable to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A discovered package along with its computed size, handed back
/// alongside the [`PackageInput`] the core consumes (the core only wants
/// the opaque size number, not how it was derived).
#[derive(Debug, Clone)]
pub struct CollectedPackage {
    /// The checker-facing package and its imports.
    pub input: PackageInput,
    /// The package's computed size (statements + declarations).
    pub size: u32,
}

/// Walks `root`, treating `src_root` as the crate's `crate::`-root
/// directory, and returns one [`CollectedPackage`] per discovered
/// directory.
///
/// # Errors
///
/// Returns [`CollectError`] if directory discovery, file reading, or
/// parsing fails for any file.
pub fn collect_packages(root: &Path, src_root: &Path) -> Result<Vec<CollectedPackage>, CollectError> {
    let discovered = discover_packages(root)?;
    let mut out = Vec::with_capacity(discovered.len());

    for pkg in &discovered {
        let mut imports = Vec::new();
        let mut size = 0u32;
        let mut is_main = false;

        for file in &pkg.files {
            let src = std::fs::read_to_string(file).map_err(|source| CollectError::Read {
                path: file.display().to_string(),
                source,
            })?;

            if file.file_name().and_then(|n| n.to_str()) == Some("main.rs") {
                is_main = true;
            }

            let parsed = syn::parse_file(&src).map_err(|source| ImportError::Parse {
                path: file.display().to_string(),
                source,
            })?;
            size += size_of_file(&parsed);

            for import in extract_imports(&src, file)? {
                let resolved_dir = resolve_import_path(&import.path, &pkg.path, src_root);
                let display_name = resolved_dir
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                imports.push(ImportInput {
                    path: resolved_dir.display().to_string(),
                    display_name,
                });
            }
        }

        let display_name = if is_main {
            "main".to_string()
        } else {
            pkg.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string()
        };

        out.push(CollectedPackage {
            input: PackageInput {
                path: pkg.path.display().to_string(),
                display_name,
                imports,
            },
            size,
        });
    }

    Ok(out)
}
