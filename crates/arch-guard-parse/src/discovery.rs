//! Directory-tree package discovery: one package per directory containing
//! at least one `.rs` file, mirroring how the Go original groups files by
//! directory into packages.

use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors encountered while discovering packages under a project root.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Walking the directory tree failed (permissions, broken symlink, …).
    #[error("unable to walk directory tree at {root}: {source}")]
    Walk {
        /// The root path being walked.
        root: String,
        /// The underlying walk error.
        #[source]
        source: ignore::Error,
    },
    /// Reading a source file's contents failed.
    #[error("unable to read source file {path}: {source}")]
    ReadFile {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A discovered package: its directory and the `.rs` files directly in it.
///
/// Sub-directories are discovered as separate packages in their own right
/// (this tool does not merge nested modules into their parent's package,
/// matching the original's one-directory-one-package model).
#[derive(Debug, Clone)]
pub struct DiscoveredPackage {
    /// Absolute path to the package's directory.
    pub path: PathBuf,
    /// Absolute paths to the `.rs` files directly inside this directory.
    pub files: Vec<PathBuf>,
}

/// Walks `root`, honoring `.gitignore`/`.ignore` files via the `ignore`
/// crate, and groups `.rs` files by containing directory. Directories
/// named `target` are always excluded (the Cargo build output directory
/// has no package-tree meaning).
///
/// # Errors
///
/// Returns [`DiscoveryError::Walk`] if the walk itself fails.
pub fn discover_packages(root: &Path) -> Result<Vec<DiscoveredPackage>, DiscoveryError> {
    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

    let walker = WalkBuilder::new(root)
        .filter_entry(|e| e.file_name() != "target")
        .build();

    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            root: root.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("rs") {
            let dir = path.parent().unwrap_or(root).to_path_buf();
            by_dir.entry(dir).or_default().push(path.to_path_buf());
        }
    }

    Ok(by_dir
        .into_iter()
        .map(|(path, mut files)| {
            files.sort();
            DiscoveredPackage { path, files }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn groups_rs_files_by_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("lib.rs"), "").unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/mod.rs"), "").unwrap();
        fs::write(root.join("sub/other.rs"), "").unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::write(root.join("target/debug/build.rs"), "").unwrap();

        let packages = discover_packages(root).unwrap();
        let sub = packages
            .iter()
            .find(|p| p.path == root.join("sub"))
            .unwrap();
        assert_eq!(sub.files.len(), 2);
        assert!(packages.iter().all(|p| !p.path.starts_with(root.join("target"))));
    }
}
