//! Project-root discovery.
//!
//! Resolution order, the Rust analog of the original's `go env GOMOD`-based
//! lookup:
//!
//! 1. An explicit `--root` flag.
//! 2. A `Cargo.toml` at or above the current directory.
//! 3. The directory containing the resolved config file.
//! 4. A `vendor` or `target` directory at or above the current directory.

use std::path::{Path, PathBuf};

/// Finds the project root, trying each strategy in priority order.
#[must_use]
pub fn discover(explicit: Option<&Path>, cwd: &Path, config_dir: Option<&Path>) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }

    if let Some(dir) = find_upwards(cwd, "Cargo.toml") {
        return dir;
    }

    if let Some(dir) = config_dir {
        return dir.to_path_buf();
    }

    if let Some(dir) = find_upwards(cwd, "vendor").or_else(|| find_upwards(cwd, "target")) {
        return dir;
    }

    cwd.to_path_buf()
}

/// Walks upward from `start`, returning the first ancestor directory that
/// directly contains `marker`.
fn find_upwards(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        if d.join(marker).exists() {
            return Some(d.to_path_buf());
        }
        dir = d.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins_over_everything() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("elsewhere");
        let result = discover(Some(&explicit), tmp.path(), None);
        assert_eq!(result, explicit);
    }

    #[test]
    fn finds_cargo_toml_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Cargo.toml"), "").unwrap();
        let nested = tmp.path().join("crates/foo");
        fs::create_dir_all(&nested).unwrap();

        let result = discover(None, &nested, None);
        assert_eq!(result, tmp.path());
    }

    #[test]
    fn falls_back_to_config_dir_when_no_cargo_toml() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join("cfg");
        fs::create_dir_all(&config_dir).unwrap();

        let result = discover(None, tmp.path(), Some(&config_dir));
        assert_eq!(result, config_dir);
    }

    #[test]
    fn falls_back_to_vendor_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("vendor")).unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let result = discover(None, &nested, None);
        assert_eq!(result, tmp.path());
    }

    #[test]
    fn falls_back_to_cwd_when_nothing_found() {
        let tmp = TempDir::new().unwrap();
        let result = discover(None, tmp.path(), None);
        assert_eq!(result, tmp.path());
    }
}
