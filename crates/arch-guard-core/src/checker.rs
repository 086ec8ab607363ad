//! The dependency checker: role classification, import traversal, and
//! violation reporting.

use crate::config::Configuration;
use crate::pattern::PatternList;
use crate::types::{Classification, DependencyMap, PackageImports, PackageName, PackageRole, Violation};

/// A single import edge as handed to the checker by the parser collaborator:
/// the raw, absolute import path and the display name the compiler would
/// use for it (`"main"` for an executable entry point, otherwise the last
/// path segment is irrelevant to the checker).
#[derive(Debug, Clone)]
pub struct ImportInput {
    /// The import's absolute path (e.g. a module path), as resolved by the
    /// parser.
    pub path: String,
    /// `"main"` if this import names an executable entry point, otherwise
    /// any other string.
    pub display_name: String,
}

/// A package and its imports, as handed to the checker by the parser
/// collaborator.
#[derive(Debug, Clone)]
pub struct PackageInput {
    /// The package's absolute path, as resolved by the parser.
    pub path: String,
    /// `"main"` if this package is an executable entry point.
    pub display_name: String,
    /// The packages this package imports.
    pub imports: Vec<ImportInput>,
}

/// Computes `(loose, strict)` package identity relative to `root_path`,
/// mirroring the original's `RelativePackageName`/`UniquePackageName`.
///
/// Returns the computed [`PackageName`] and whether `path` lies inside the
/// project rooted at `root_path`. A path outside the root is returned
/// verbatim (unsplit) and marked external.
#[must_use]
pub fn relative_package_name(path: &str, display_name: &str, root_path: &str) -> (PackageName, bool) {
    if !path.starts_with(root_path) {
        return (PackageName::new(path.to_string()), false);
    }

    let rel = &path[root_path.len()..];
    let name = if display_name == "main" {
        "main".to_string()
    } else if rel.is_empty() {
        "/".to_string()
    } else if let Some(stripped) = rel.strip_prefix('/') {
        stripped.to_string()
    } else {
        rel.to_string()
    };

    (PackageName::new(name), true)
}

fn full_match(list: &PatternList, name: &PackageName) -> bool {
    if let Some(strict) = &name.strict {
        if list.match_str(strict, &[]).1 {
            return true;
        }
    }
    list.match_str(&name.loose, &[]).1
}

fn partial_depth(list: &PatternList, name: &PackageName) -> Option<usize> {
    name.strict
        .as_deref()
        .and_then(|s| list.last_match_len(s))
        .or_else(|| list.last_match_len(&name.loose))
}

/// Classifies a package into its internal six-way [`Classification`],
/// following spec §4.3 Step 1: a full match against `god`, `db`, then
/// `tool` (checked in that order so `god` always has final say), falling
/// back to a half-DB/half-tool partial-match classification, and finally
/// `Standard`.
pub(crate) fn classify(name: &PackageName, cfg: &Configuration) -> Classification {
    let mut classification = Classification::Standard;

    if full_match(&cfg.tool, name) {
        classification = Classification::Tool;
    }
    if full_match(&cfg.db, name) {
        classification = Classification::Db;
    }
    if full_match(&cfg.god, name) {
        classification = Classification::God;
    }

    if classification == Classification::Standard {
        let tool_depth = partial_depth(&cfg.tool, name);
        let db_depth = partial_depth(&cfg.db, name);
        classification = match (db_depth, tool_depth) {
            (Some(d), Some(t)) if d >= t => Classification::HalfDb,
            (Some(_), Some(_)) => Classification::HalfTool,
            (Some(_), None) => Classification::HalfDb,
            (None, Some(_)) => Classification::HalfTool,
            (None, None) => Classification::Standard,
        };
    }

    classification
}

fn role_violation(
    classification: Classification,
    importer: &str,
    importee: &str,
    importee_name: &PackageName,
    cfg: &Configuration,
) -> Option<Violation> {
    match classification {
        Classification::God => None,
        Classification::Tool => Some(Violation(format!(
            "tool package '{importer}' isn't allowed to import '{importee}'"
        ))),
        Classification::HalfTool => Some(Violation(format!(
            "tool sub-package '{importer}' isn't allowed to import '{importee}'"
        ))),
        Classification::Db => {
            if full_match(&cfg.tool, importee_name) || full_match(&cfg.db, importee_name) {
                None
            } else {
                Some(Violation(format!(
                    "DB package '{importer}' isn't allowed to import '{importee}'"
                )))
            }
        }
        Classification::HalfDb => {
            if full_match(&cfg.tool, importee_name) {
                None
            } else {
                Some(Violation(format!(
                    "DB sub-package '{importer}' isn't allowed to import '{importee}'"
                )))
            }
        }
        Classification::Standard => {
            if full_match(&cfg.tool, importee_name) || full_match(&cfg.db, importee_name) {
                None
            } else {
                Some(Violation(format!(
                    "domain package '{importer}' isn't allowed to import '{importee}'"
                )))
            }
        }
    }
}

/// Checks a single package's imports against `cfg`, recording accepted
/// internal edges into `dep_map` and returning every violation found.
///
/// Implements spec §4.3 Steps 1–3 in full: role classification,
/// `allowOnlyIn`/`allowAdditionally` precedence, the per-role predicate
/// table, and the test-package exemption (scoped to the role check only,
/// per DESIGN.md's Open Question decision).
#[must_use]
pub fn check_package(
    pkg: &PackageInput,
    root_path: &str,
    cfg: &Configuration,
    dep_map: &mut DependencyMap,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let (own_name, _) = relative_package_name(&pkg.path, &pkg.display_name, root_path);
    let own_unique = own_name.unique().to_string();
    let own_loose = own_name.loose.clone();
    let own_strict = own_name.strict.clone().unwrap_or_default();
    let classification = classify(&own_name, cfg);
    let is_test = own_name.is_test_package();

    for import in &pkg.imports {
        let (importee_name, internal) =
            relative_package_name(&import.path, &import.display_name, root_path);
        let importee_unique = importee_name.unique().to_string();
        let importee_loose = importee_name.loose.clone();
        let importee_strict = importee_name.strict.clone().unwrap_or_default();

        // Step 2(b) - allowOnlyIn: a closed list on the importee, checked
        // regardless of internal/external and regardless of test-package
        // status (see DESIGN.md).
        let (has_rule, permitted) = cfg.allow_only_in.has_key_value(
            &importee_loose,
            &importee_strict,
            &own_loose,
            &own_strict,
        );
        if has_rule && !permitted {
            violations.push(Violation(format!(
                "package '{own_unique}' isn't allowed to import '{importee_unique}' (because of allowOnlyIn)"
            )));
            continue;
        }
        // A closed-list rule the importer satisfies fully authorizes the
        // edge: further gating (allowAdditionally, the role table) would
        // be redundant at best and contradictory at worst.
        let allow_only_in_approved = has_rule && permitted;

        if !internal {
            continue;
        }

        // Step 2(c) - record the edge before any further gating, as long
        // as the importer itself isn't a test package.
        if !is_test {
            let importee_role = classify(&importee_name, cfg).role();
            let entry = dep_map.entry(own_unique.clone()).or_insert_with(|| PackageImports {
                role: Some(classification.role()),
                imports: Default::default(),
            });
            entry
                .imports
                .entry(importee_unique.clone())
                .or_insert(Some(importee_role));
        }

        if allow_only_in_approved {
            continue;
        }

        // Step 2(d) - allowAdditionally: keyed by importer, approving a
        // specific extra importee.
        let (_, extra_permitted) = cfg.allow_additionally.has_key_value(
            &own_loose,
            &own_strict,
            &importee_loose,
            &importee_strict,
        );
        if extra_permitted {
            continue;
        }

        // Step 2(e) - role check, exempting test packages.
        if is_test {
            continue;
        }
        if let Some(v) = role_violation(
            classification,
            &own_unique,
            &importee_unique,
            &importee_name,
            cfg,
        ) {
            violations.push(v);
        }
    }

    violations
}

/// Resolves the public [`PackageRole`] for a package identity, for callers
/// that only need the collapsed role (e.g. report generation) rather than
/// the internal six-way classification.
#[must_use]
pub fn resolve_role(name: &PackageName, cfg: &Configuration) -> PackageRole {
    classify(name, cfg).role()
}

/// Checks a package's size (an opaque metric computed by the parser
/// collaborator) against `cfg.size`, the configured budget.
///
/// This is kept separate from [`check_package`] because `checkPackage`'s
/// signature takes only `{path, name, imports}` — the size budget is a
/// second, independent opaque-metric check the core offers, not a step in
/// the import-traversal algorithm.
#[must_use]
pub fn check_size(unique_name: &str, size: u32, cfg: &Configuration) -> Option<Violation> {
    if size > cfg.size {
        Some(Violation(format!(
            "package '{unique_name}' exceeds the size budget ({size} > {})",
            cfg.size
        )))
    } else {
        None
    }
}
