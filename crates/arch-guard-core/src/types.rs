//! Package roles, names, and the dependency graph they populate.

use std::collections::BTreeMap;
use std::fmt;

/// The four architectural roles a package can play.
///
/// Ordering matters: [`PackageRole`] implements `Ord` in ascending
/// permissiveness (`Standard < Tool < Db < God`), mirroring the precedence
/// used when a package matches more than one role's pattern list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageRole {
    /// No special role; may import only tool and database packages.
    Standard,
    /// Foundational package; may not import any other package in the tree.
    Tool,
    /// Database package; may import only tool and other database packages.
    Db,
    /// God package; may import any other package.
    God,
}

impl PackageRole {
    /// Single-letter tag used in the dependency matrix ('S', 'T', 'D', 'G').
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            PackageRole::Standard => 'S',
            PackageRole::Tool => 'T',
            PackageRole::Db => 'D',
            PackageRole::God => 'G',
        }
    }

    /// Markdown emphasis markers wrapped around a role's row header in the
    /// dependency matrix (`**bold**` for God, `` `code` `` for Db, `_italic_`
    /// for Tool, no formatting for Standard).
    #[must_use]
    pub fn markdown_emphasis(self) -> &'static str {
        match self {
            PackageRole::Standard => "",
            PackageRole::Tool => "_",
            PackageRole::Db => "`",
            PackageRole::God => "**",
        }
    }
}

impl fmt::Display for PackageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PackageRole::Standard => "standard",
            PackageRole::Tool => "tool",
            PackageRole::Db => "database",
            PackageRole::God => "god",
        };
        write!(f, "{s}")
    }
}

/// A partial-match-aware role candidate, used internally while classifying
/// a package before it is collapsed to a plain [`PackageRole`].
///
/// The distinction between e.g. `Tool` (full match against a tool pattern)
/// and `HalfTool` (the package's path is itself a sub-package of a pattern
/// that matched, i.e. a *prefix* partial match) lets the classifier apply
/// the tie-break rule from the dependency checker: a full match always
/// outranks a half match of a more permissive role, and on an equal-rank
/// tie between two full matches, Db outranks Tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    Standard,
    HalfTool,
    Tool,
    HalfDb,
    Db,
    God,
}

impl Classification {
    /// Collapses a classification down to the public role it implies.
    pub(crate) fn role(self) -> PackageRole {
        match self {
            Classification::Standard | Classification::HalfTool | Classification::HalfDb => {
                PackageRole::Standard
            }
            Classification::Tool => PackageRole::Tool,
            Classification::Db => PackageRole::Db,
            Classification::God => PackageRole::God,
        }
    }
}

/// A package's loose and strict names.
///
/// `loose` is the name with any trailing `_test` suffix removed; `strict`
/// is `Some` only when the package under analysis is itself a `_test`
/// package (an external test package compiled alongside its production
/// counterpart). Most configuration matching should go through
/// [`PackageName::unique`], which prefers `strict` when present.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName {
    /// The package path with any `_test` suffix stripped.
    pub loose: String,
    /// The package path exactly as declared, when it differs from `loose`.
    pub strict: Option<String>,
}

impl PackageName {
    /// Builds a [`PackageName`] from a relative package path, detecting the
    /// `_test` suffix convention.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if let Some(stripped) = path.strip_suffix("_test") {
            if !stripped.is_empty() && stripped != path {
                return Self {
                    loose: stripped.to_string(),
                    strict: Some(path),
                };
            }
        }
        Self {
            loose: path,
            strict: None,
        }
    }

    /// Returns the strict name if present, otherwise the loose name: the
    /// single name that uniquely identifies this package node in a
    /// [`DependencyMap`].
    #[must_use]
    pub fn unique(&self) -> &str {
        self.strict.as_deref().unwrap_or(&self.loose)
    }

    /// True if this package name carries the `_test` suffix convention.
    #[must_use]
    pub fn is_test_package(&self) -> bool {
        self.strict.is_some()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unique())
    }
}

/// A single architectural-boundary violation: a package importing another
/// package it is not permitted to import.
///
/// Kept as a plain formatted message (rather than a structured type with a
/// source span) because package-graph edges, not source locations, are the
/// unit of diagnosis here: there is no single line in the importing
/// package responsible for an architectural violation, only the edge
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation(pub String);

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for Violation {}

/// The resolved role and import edges for a single package, as recorded
/// into a [`DependencyMap`].
#[derive(Debug, Clone, Default)]
pub struct PackageImports {
    /// The package's resolved role.
    pub role: Option<PackageRole>,
    /// Imported package (strict) names mapped to their resolved role, as
    /// seen from this package's imports. `None` until the checker visits
    /// the imported package.
    pub imports: BTreeMap<String, Option<PackageRole>>,
}

/// The full package graph built up while checking a project: strict
/// package name to its role and import edges.
///
/// Kept as a [`BTreeMap`] rather than a `HashMap` so that the dependency
/// matrix and statistics reports can iterate packages in a stable,
/// alphabetical order without a separate sort pass.
pub type DependencyMap = BTreeMap<String, PackageImports>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_detects_test_suffix() {
        let n = PackageName::new("pkg/foo_test");
        assert_eq!(n.loose, "pkg/foo");
        assert_eq!(n.strict.as_deref(), Some("pkg/foo_test"));
        assert_eq!(n.unique(), "pkg/foo_test");
        assert!(n.is_test_package());
    }

    #[test]
    fn package_name_without_test_suffix_is_plain() {
        let n = PackageName::new("pkg/foo");
        assert_eq!(n.loose, "pkg/foo");
        assert_eq!(n.strict, None);
        assert_eq!(n.unique(), "pkg/foo");
        assert!(!n.is_test_package());
    }

    #[test]
    fn bare_test_suffix_is_not_stripped_to_empty() {
        let n = PackageName::new("_test");
        assert_eq!(n.loose, "_test");
        assert_eq!(n.strict, None);
    }

    #[test]
    fn role_ordering_is_ascending_permissiveness() {
        assert!(PackageRole::Standard < PackageRole::Tool);
        assert!(PackageRole::Tool < PackageRole::Db);
        assert!(PackageRole::Db < PackageRole::God);
    }

    #[test]
    fn classification_collapses_half_matches_to_standard() {
        assert_eq!(Classification::HalfTool.role(), PackageRole::Standard);
        assert_eq!(Classification::HalfDb.role(), PackageRole::Standard);
        assert_eq!(Classification::Tool.role(), PackageRole::Tool);
        assert_eq!(Classification::Db.role(), PackageRole::Db);
        assert_eq!(Classification::God.role(), PackageRole::God);
    }
}
