//! Stats command: render the per-package statistics report for one scope.

use anyhow::Result;
use arch_guard_core::Configuration;
use std::path::Path;

/// Runs the `stats` subcommand.
///
/// # Errors
///
/// Returns an error if package discovery or source parsing fails.
pub fn run(root: &Path, cfg: &Configuration, scope: &str) -> Result<()> {
    let (dep_map, violations) = super::check::collect_and_check(root, cfg)?;
    for v in &violations {
        println!("{v}");
    }

    let rows = arch_guard_report::compute_stats(&dep_map, scope);
    if rows.is_empty() {
        println!("no packages recorded under scope '{scope}'");
    } else {
        println!("{:<40} {:<4} {:>6} {:>6} {:>6} {:>6} {:>6}", "package", "role", "direct", "all", "users", "max", "min");
        for row in &rows {
            println!(
                "{:<40} {:<4} {:>6} {:>6} {:>6} {:>6} {:>6}",
                row.package, row.role_letter, row.direct_deps, row.all_deps, row.usages, row.max_score, row.min_score
            );
        }
    }

    if !violations.is_empty() {
        std::process::exit(super::check::EXIT_VIOLATIONS);
    }
    Ok(())
}
