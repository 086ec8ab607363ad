//! Tree command: render the ASCII directory tree with role annotations.

use anyhow::Result;
use arch_guard_core::Configuration;
use std::path::Path;

/// Runs the `tree` subcommand.
///
/// # Errors
///
/// Returns an error if package discovery or source parsing fails.
pub fn run(root: &Path, cfg: &Configuration, exclude: &[String]) -> Result<()> {
    let (dep_map, violations) = super::check::collect_and_check(root, cfg)?;
    for v in &violations {
        println!("{v}");
    }

    let root_label = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project");
    let exclude: Vec<&str> = exclude.iter().map(String::as_str).collect();
    print!("{}", arch_guard_report::generate_tree(root, root_label, &exclude, &dep_map));

    if !violations.is_empty() {
        std::process::exit(super::check::EXIT_VIOLATIONS);
    }
    Ok(())
}
