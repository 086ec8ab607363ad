//! Check command: the core operation — walk the project, classify every
//! package, and report every architectural violation.

use anyhow::{Context, Result};
use arch_guard_core::types::DependencyMap;
use arch_guard_core::{checker, Configuration};
use std::path::Path;

/// Exit code used when the run completes but violations were found.
pub const EXIT_VIOLATIONS: i32 = 1;

/// Walks `root`, checks every package against `cfg`, and returns the
/// accumulated dependency map alongside every violation found (role
/// violations and size-budget overruns alike).
///
/// # Errors
///
/// Returns an error if package discovery or source parsing fails.
pub fn collect_and_check(root: &Path, cfg: &Configuration) -> Result<(DependencyMap, Vec<String>)> {
    let collected = arch_guard_parse::collect_packages(root, root)
        .with_context(|| format!("failed to collect packages under {}", root.display()))?;

    let root_path = root.display().to_string();
    let mut dep_map = DependencyMap::new();
    let mut violations = Vec::new();

    for pkg in &collected {
        for v in checker::check_package(&pkg.input, &root_path, cfg, &mut dep_map) {
            violations.push(v.to_string());
        }
        let (name, _internal) =
            checker::relative_package_name(&pkg.input.path, &pkg.input.display_name, &root_path);
        if let Some(v) = checker::check_size(name.unique(), pkg.size, cfg) {
            violations.push(v.to_string());
        }
    }

    Ok((dep_map, violations))
}

/// Runs the `check` subcommand: prints every violation and exits non-zero
/// if any were found.
///
/// # Errors
///
/// Returns an error if package discovery or source parsing fails.
pub fn run(root: &Path, cfg: &Configuration) -> Result<()> {
    let (_dep_map, violations) = collect_and_check(root, cfg)?;

    for v in &violations {
        println!("{v}");
    }

    if violations.is_empty() {
        tracing::info!("no violations found");
    } else {
        tracing::warn!(count = violations.len(), "violations found");
        std::process::exit(EXIT_VIOLATIONS);
    }

    Ok(())
}
