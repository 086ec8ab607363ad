//! Matrix command: render the Markdown dependency table for one scope.

use anyhow::Result;
use arch_guard_core::Configuration;
use std::path::Path;

/// Runs the `matrix` subcommand.
///
/// # Errors
///
/// Returns an error if package discovery or source parsing fails.
pub fn run(root: &Path, cfg: &Configuration, scope: &str) -> Result<()> {
    let (dep_map, violations) = super::check::collect_and_check(root, cfg)?;
    for v in &violations {
        println!("{v}");
    }

    let root_label = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project");
    match arch_guard_report::generate_table(&dep_map, root_label, scope) {
        Some(table) => println!("{table}"),
        None => println!("no dependencies recorded under scope '{scope}'"),
    }

    if !violations.is_empty() {
        std::process::exit(super::check::EXIT_VIOLATIONS);
    }
    Ok(())
}
