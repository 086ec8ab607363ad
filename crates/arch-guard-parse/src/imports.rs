//! Extraction of import paths from a package's source files.

use std::path::Path;
use thiserror::Error;

/// Errors encountered while extracting imports from a source file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading the file failed.
    #[error("unable to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Parsing the file as Rust source failed.
    #[error("unable to parse {path}: {source}")]
    Parse {
        /// The file that could not be parsed.
        path: String,
        /// The underlying `syn` error.
        #[source]
        source: syn::Error,
    },
}

/// A flattened `use` path, e.g. `crate::domain::widgets::Widget` becomes
/// `crate::domain::widgets::Widget`; a glob import (`use foo::*`) becomes
/// `foo::*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    /// The fully-qualified, `::`-joined path.
    pub path: String,
}

/// Parses `src` as a Rust source file and returns every `use` import it
/// declares, flattened from nested [`syn::UseTree`] groups.
///
/// # Errors
///
/// Returns [`ImportError::Parse`] if `src` is not syntactically valid Rust.
pub fn extract_imports(src: &str, path_for_errors: &Path) -> Result<Vec<ResolvedImport>, ImportError> {
    let file = syn::parse_file(src).map_err(|source| ImportError::Parse {
        path: path_for_errors.display().to_string(),
        source,
    })?;

    let mut imports = Vec::new();
    for item in &file.items {
        if let syn::Item::Use(item_use) = item {
            imports.extend(expand_use_tree(&item_use.tree, "").into_iter().map(|path| ResolvedImport { path }));
        }
    }
    Ok(imports)
}

/// Reads `path` and extracts its `use` imports.
///
/// # Errors
///
/// Returns [`ImportError::Read`] if the file cannot be read, or
/// [`ImportError::Parse`] if it cannot be parsed.
pub fn extract_imports_from_file(path: &Path) -> Result<Vec<ResolvedImport>, ImportError> {
    let src = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    extract_imports(&src, path)
}

/// Flattens a `use` tree into fully-qualified, `::`-joined paths.
///
/// Grouped imports (`use a::{b, c::d}`) expand to one entry per leaf;
/// renames (`use a::b as c`) keep the original path, not the alias; globs
/// (`use a::*`) resolve to `a::*`.
fn expand_use_tree(tree: &syn::UseTree, prefix: &str) -> Vec<String> {
    match tree {
        syn::UseTree::Path(p) => {
            let new_prefix = join(prefix, &p.ident.to_string());
            expand_use_tree(&p.tree, &new_prefix)
        }
        syn::UseTree::Name(n) => vec![join(prefix, &n.ident.to_string())],
        syn::UseTree::Rename(r) => vec![join(prefix, &r.ident.to_string())],
        syn::UseTree::Glob(_) => vec![join(prefix, "*")],
        syn::UseTree::Group(g) => g
            .items
            .iter()
            .flat_map(|item| expand_use_tree(item, prefix))
            .collect(),
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}::{segment}")
    }
}
