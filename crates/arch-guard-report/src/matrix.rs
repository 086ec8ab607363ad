//! Markdown dependency-matrix generation: one table per package scope,
//! rows are importers, columns are importees.

use arch_guard_core::types::{DependencyMap, PackageRole};
use std::collections::BTreeSet;

/// Restricts `dep_map` to the importer entries whose key is `scope` itself
/// or a sub-package of it (`scope/...`), mirroring the original's
/// `FilterDepMap` scoping of a dependency table to one subtree.
#[must_use]
pub fn filter_dep_map(dep_map: &DependencyMap, scope: &str) -> DependencyMap {
    let prefix = format!("{scope}/");
    dep_map
        .iter()
        .filter(|(pkg, _)| pkg.as_str() == scope || pkg.starts_with(&prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Generates the Markdown dependency matrix for `scope`, or `None` if
/// nothing in `dep_map` falls under it (matching the original's decision
/// not to emit a table for scopes with no recorded dependencies).
#[must_use]
pub fn generate_table(dep_map: &DependencyMap, root_label: &str, scope: &str) -> Option<String> {
    let scoped = filter_dep_map(dep_map, scope);
    if scoped.is_empty() {
        return None;
    }

    let mut columns: BTreeSet<String> = BTreeSet::new();
    for imports in scoped.values() {
        for importee in imports.imports.keys() {
            columns.insert(importee.clone());
        }
    }
    let columns: Vec<String> = columns.into_iter().collect();

    let mut out = String::new();
    out.push_str(&format!("# Dependency Table For: {root_label}/{scope}\n\n| "));

    for col in &columns {
        let role = scoped
            .values()
            .find_map(|imps| imps.imports.get(col).and_then(|r| *r))
            .unwrap_or(PackageRole::Standard);
        out.push_str(&format!("| {} - {} ", spaced(col), role.letter()));
    }
    out.push_str("|\n| :- ");
    for _ in &columns {
        out.push_str("| :- ");
    }
    out.push_str("|\n");

    for (pkg, imports) in &scoped {
        let role = imports.role.unwrap_or(PackageRole::Standard);
        let emphasis = role.markdown_emphasis();
        out.push_str(&format!("| {emphasis}{pkg}{emphasis} "));
        for col in &columns {
            if let Some(Some(import_role)) = imports.imports.get(col) {
                out.push_str(&format!("| {emphasis}{}{emphasis} ", import_role.letter()));
            } else {
                out.push_str("| ");
            }
        }
        out.push_str("|\n");
    }

    out.push_str(LEGEND);
    Some(out)
}

fn spaced(s: &str) -> String {
    s.chars().map(|c| format!("{c} ")).collect()
}

const LEGEND: &str = "\n### Legend\n\n\
* Rows - Importing packages\n\
* columns - Imported packages\n\n\
#### Meaning Of Row And Row Header Formatting\n\n\
* **Bold** - God package (can use all packages)\n\
* `Code` - Database package (can only use tool and other database packages)\n\
* _Italic_ - Tool package (foundational, no dependencies)\n\
* no formatting - Standard package (can only use tool and database packages)\n\n\
#### Meaning Of Letters In Table Columns\n\n\
* G - God package (can use all packages)\n\
* D - Database package (can only use tool and other database packages)\n\
* T - Tool package (foundational, no dependencies)\n\
* S - Standard package (can only use tool and database packages)\n";

#[cfg(test)]
mod tests {
    use super::*;
    use arch_guard_core::types::PackageImports;
    use std::collections::BTreeMap;

    fn sample_map() -> DependencyMap {
        let mut dep_map = DependencyMap::new();
        let mut imports = BTreeMap::new();
        imports.insert("db/store".to_string(), Some(PackageRole::Db));
        dep_map.insert(
            "domain1".to_string(),
            PackageImports {
                role: Some(PackageRole::Standard),
                imports,
            },
        );
        dep_map
    }

    #[test]
    fn generates_table_for_scope_with_entries() {
        let dep_map = sample_map();
        let table = generate_table(&dep_map, "proj", "domain1").unwrap();
        assert!(table.contains("Dependency Table For: proj/domain1"));
        assert!(table.contains("domain1"));
        assert!(table.contains("db/store"));
    }

    #[test]
    fn returns_none_for_empty_scope() {
        let dep_map = sample_map();
        assert!(generate_table(&dep_map, "proj", "nothing-here").is_none());
    }

    #[test]
    fn filter_dep_map_includes_exact_and_sub_packages() {
        let mut dep_map = DependencyMap::new();
        dep_map.insert("a".to_string(), PackageImports::default());
        dep_map.insert("a/b".to_string(), PackageImports::default());
        dep_map.insert("ab".to_string(), PackageImports::default());
        let filtered = filter_dep_map(&dep_map, "a");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.contains_key("a"));
        assert!(filtered.contains_key("a/b"));
        assert!(!filtered.contains_key("ab"));
    }

    /// Exact-text regression for a package with no recorded imports: only
    /// the header, the empty column rule, and the legend should appear.
    /// A plain `assert_eq!` is used here rather than `insta::assert_snapshot!`
    /// so the expected text is verifiable by inspection (see DESIGN.md).
    #[test]
    fn full_text_for_single_importless_package() {
        let mut dep_map = DependencyMap::new();
        dep_map.insert("lonely".to_string(), PackageImports::default());

        let table = generate_table(&dep_map, "proj", "lonely").unwrap();
        let expected = format!(
            "# Dependency Table For: proj/lonely\n\n| |\n| :- |\n| lonely |\n{LEGEND}"
        );
        assert_eq!(table, expected);
    }
}
