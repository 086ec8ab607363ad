//! Best-effort mapping from a `use` path to the filesystem package
//! directory it most likely names.
//!
//! This is deliberately a heuristic, not a resolver: the core's own
//! Non-goals rule out AST identity resolution, and this crate is the
//! external collaborator responsible for handing the core plausible
//! `(package, imports)` tuples, not a borrow checker. Only
//! `crate`/`self`/`super`-rooted paths are treated as internal; anything
//! else (`std::`, a third-party crate name, …) resolves to a synthetic,
//! non-filesystem path that can never share the project root's prefix,
//! so the core classifies it as external by construction.

use std::path::{Path, PathBuf};

/// Resolves `path` (a `::`-joined `use` import, without its leading
/// `use`/trailing alias) to the directory it names, relative to
/// `current_dir` (the importing package's directory) and `crate_src_root`
/// (the crate's `src/` directory, standing in for the `crate::` root).
///
/// The final segment of `path` is dropped before resolution: by
/// convention it names an item (a type, function, trait, or glob),
/// not a further nested module directory.
#[must_use]
pub fn resolve_import_path(path: &str, current_dir: &Path, crate_src_root: &Path) -> PathBuf {
    let mut segments: Vec<&str> = path.split("::").collect();
    segments.pop();

    let mut base = match segments.first().copied() {
        Some("crate") => {
            segments.remove(0);
            crate_src_root.to_path_buf()
        }
        Some("self") => {
            segments.remove(0);
            current_dir.to_path_buf()
        }
        Some("super") => {
            segments.remove(0);
            current_dir.parent().unwrap_or(current_dir).to_path_buf()
        }
        _ => return PathBuf::from(format!("external::{path}")),
    };

    for seg in segments {
        base = base.join(seg);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_rooted_path_resolves_under_src_root() {
        let resolved = resolve_import_path(
            "crate::domain::widgets::Widget",
            Path::new("/proj/src/other"),
            Path::new("/proj/src"),
        );
        assert_eq!(resolved, Path::new("/proj/src/domain/widgets"));
    }

    #[test]
    fn self_rooted_path_resolves_relative_to_current_dir() {
        let resolved = resolve_import_path("self::helpers::Thing", Path::new("/proj/src/mod1"), Path::new("/proj/src"));
        assert_eq!(resolved, Path::new("/proj/src/mod1/helpers"));
    }

    #[test]
    fn super_rooted_path_resolves_to_parent_dir() {
        let resolved = resolve_import_path(
            "super::sibling::Thing",
            Path::new("/proj/src/mod1/sub"),
            Path::new("/proj/src"),
        );
        assert_eq!(resolved, Path::new("/proj/src/mod1/sibling"));
    }

    #[test]
    fn external_path_never_collides_with_a_filesystem_root() {
        let resolved = resolve_import_path("serde::Deserialize", Path::new("/proj/src/mod1"), Path::new("/proj/src"));
        assert!(!resolved.starts_with("/proj"));
    }
}
