//! ASCII directory-tree rendering with per-package role annotations.

use arch_guard_core::types::{DependencyMap, PackageRole};
use ignore::WalkBuilder;
use std::path::Path;

const MIDDLE_ITEM: &str = "├── ";
const CONTINUE_ITEM: &str = "│   ";
const LAST_ITEM: &str = "└── ";
const EMPTY_ITEM: &str = "    ";

/// Renders an ASCII tree of the directories under `root`, annotating each
/// with its resolved role letter when it appears in `dep_map` (or the
/// literal package name otherwise).
///
/// `exclude` names directories to skip entirely (e.g. `target`), matching
/// the original's glob-based directory exclusion.
#[must_use]
pub fn generate(root: &Path, name: &str, exclude: &[&str], dep_map: &DependencyMap) -> String {
    let mut out = String::new();
    generate_tree(root, name, &mut out, "", exclude, "", dep_map);
    out
}

fn generate_tree(
    root: &Path,
    name: &str,
    out: &mut String,
    prefix: &str,
    exclude: &[&str],
    pkg: &str,
    dep_map: &DependencyMap,
) {
    out.push_str(name);
    out.push_str(" -\t");
    out.push_str(&doc_for_pkg(pkg, dep_map));
    out.push('\n');

    let mut entries: Vec<_> = WalkBuilder::new(root)
        .max_depth(Some(1))
        .build()
        .filter_map(Result::ok)
        .filter(|e| e.path() != root && e.file_type().is_some_and(|t| t.is_dir()))
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| !exclude.contains(&n))
        })
        .collect();
    entries.sort_by_key(ignore::DirEntry::file_name);

    let last_idx = entries.len().saturating_sub(1);
    for (i, entry) in entries.iter().enumerate() {
        let child_name = entry.file_name().to_string_lossy().to_string();
        let child_pkg = if pkg.is_empty() {
            child_name.clone()
        } else {
            format!("{pkg}/{child_name}")
        };
        if i == last_idx {
            out.push_str(prefix);
            out.push_str(LAST_ITEM);
            generate_tree(
                entry.path(),
                &child_name,
                out,
                &format!("{prefix}{EMPTY_ITEM}"),
                exclude,
                &child_pkg,
                dep_map,
            );
        } else {
            out.push_str(prefix);
            out.push_str(MIDDLE_ITEM);
            generate_tree(
                entry.path(),
                &child_name,
                out,
                &format!("{prefix}{CONTINUE_ITEM}"),
                exclude,
                &child_pkg,
                dep_map,
            );
        }
    }
}

fn doc_for_pkg(pkg: &str, dep_map: &DependencyMap) -> String {
    dep_map
        .get(pkg)
        .and_then(|imports| imports.role)
        .map(|role| format!("[{}]", role_tag(role)))
        .unwrap_or_default()
}

fn role_tag(role: PackageRole) -> char {
    role.letter()
}
