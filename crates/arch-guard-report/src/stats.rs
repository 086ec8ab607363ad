//! Per-package statistics report: direct/transitive dependency counts,
//! usage counts, and the encapsulation-score metric from the original
//! (`stat/stat.go`).

use crate::matrix::filter_dep_map;
use arch_guard_core::types::DependencyMap;
use std::collections::BTreeSet;

/// One row of the statistics report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStats {
    /// The package's unique name.
    pub package: String,
    /// Single-letter role tag.
    pub role_letter: char,
    /// Number of packages this package imports directly.
    pub direct_deps: usize,
    /// Number of packages this package depends on, directly or
    /// transitively.
    pub all_deps: usize,
    /// Number of packages that import this one.
    pub usages: usize,
    /// Sum, over each user of this package, of how many of this
    /// package's dependencies that user does *not* already pull in
    /// through some other path — the most this package's removal could
    /// newly expose.
    pub max_score: i64,
    /// How many of this package's dependencies are not already pulled in
    /// by *any* of its users through some other path — the least this
    /// package's removal could newly expose.
    pub min_score: i64,
}

/// Builds statistics for every package in `dep_map` under `scope`.
/// Rows are sorted by package name, matching the original's
/// `sortPkgNames`.
#[must_use]
pub fn compute_stats(dep_map: &DependencyMap, scope: &str) -> Vec<PackageStats> {
    let scoped = filter_dep_map(dep_map, scope);
    let all_deps = all_dependencies(&scoped);

    let mut rows: Vec<PackageStats> = scoped
        .iter()
        .map(|(pkg, imports)| {
            let users = package_users(pkg, &scoped);
            let deps = all_deps.get(pkg).cloned().unwrap_or_default();
            PackageStats {
                package: pkg.clone(),
                role_letter: imports
                    .role
                    .map(arch_guard_core::types::PackageRole::letter)
                    .unwrap_or('S'),
                direct_deps: imports.imports.len(),
                all_deps: deps.len(),
                usages: users.len(),
                max_score: max_score(pkg, &deps, &users, &scoped),
                min_score: min_score(&deps, &users, pkg, &scoped),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.package.cmp(&b.package));
    rows
}

fn all_dependencies(dep_map: &DependencyMap) -> std::collections::BTreeMap<String, BTreeSet<String>> {
    let mut out = std::collections::BTreeMap::new();
    for pkg in dep_map.keys() {
        let mut seen = BTreeSet::new();
        add_recursive_deps(&mut seen, pkg, dep_map);
        out.insert(pkg.clone(), seen);
    }
    out
}

fn add_recursive_deps(seen: &mut BTreeSet<String>, pkg: &str, dep_map: &DependencyMap) {
    let Some(imports) = dep_map.get(pkg) else {
        return;
    };
    for dep in imports.imports.keys() {
        if seen.insert(dep.clone()) {
            add_recursive_deps(seen, dep, dep_map);
        }
    }
}

fn package_users(pkg: &str, dep_map: &DependencyMap) -> Vec<String> {
    dep_map
        .iter()
        .filter(|(_, imports)| imports.imports.contains_key(pkg))
        .map(|(p, _)| p.clone())
        .collect()
}

fn deps_without_pkg(user: &str, pkg: &str, dep_map: &DependencyMap) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    if let Some(imports) = dep_map.get(user) {
        for dep in imports.imports.keys() {
            if dep != pkg && out.insert(dep.clone()) {
                add_recursive_deps(&mut out, dep, dep_map);
            }
        }
    }
    out
}

fn overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> usize {
    a.intersection(b).count()
}

fn max_score(pkg: &str, imps: &BTreeSet<String>, users: &[String], dep_map: &DependencyMap) -> i64 {
    let mut score = 0i64;
    let is = imps.len() as i64;
    for user in users {
        let without = deps_without_pkg(user, pkg, dep_map);
        score += is - overlap(imps, &without) as i64;
    }
    score
}

fn min_score(imps: &BTreeSet<String>, users: &[String], pkg: &str, dep_map: &DependencyMap) -> i64 {
    if users.is_empty() {
        return 0;
    }
    let mut users_deps = BTreeSet::new();
    for user in users {
        users_deps.extend(deps_without_pkg(user, pkg, dep_map));
    }
    imps.len() as i64 - overlap(imps, &users_deps) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch_guard_core::types::{PackageImports, PackageRole};
    use std::collections::BTreeMap;

    fn map_with(edges: &[(&str, &str, PackageRole)]) -> DependencyMap {
        let mut dep_map = DependencyMap::new();
        for (from, to, role) in edges {
            let entry = dep_map.entry((*from).to_string()).or_insert_with(|| PackageImports {
                role: Some(PackageRole::Standard),
                imports: BTreeMap::new(),
            });
            entry.imports.insert((*to).to_string(), Some(*role));
        }
        dep_map
    }

    #[test]
    fn direct_and_transitive_dep_counts() {
        let dep_map = map_with(&[
            ("a", "b", PackageRole::Standard),
            ("b", "c", PackageRole::Db),
        ]);
        let stats = compute_stats(&dep_map, "a");
        let a = stats.iter().find(|s| s.package == "a").unwrap();
        assert_eq!(a.direct_deps, 1);
        assert_eq!(a.all_deps, 2);
    }

    #[test]
    fn usage_count_reflects_importers() {
        let dep_map = map_with(&[
            ("a", "shared", PackageRole::Db),
            ("b", "shared", PackageRole::Db),
        ]);
        let stats = compute_stats(&dep_map, "a");
        assert!(stats.iter().all(|s| s.package != "shared"));
        // "shared" itself isn't a key (no outgoing edges recorded), but
        // usages are still visible on the importer rows via all_deps.
        let a = stats.iter().find(|s| s.package == "a").unwrap();
        assert_eq!(a.all_deps, 1);
    }
}
