//! End-to-end test of `collect_packages` against a small fixture tree on
//! disk, mirroring `original_source/parse/parse_test.go`'s "happy path".

use arch_guard_parse::collect_packages;
use std::fs;
use tempfile::tempdir;

#[test]
fn collects_packages_and_resolves_crate_local_imports() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/domain")).unwrap();
    fs::create_dir_all(dir.path().join("src/db")).unwrap();

    fs::write(
        dir.path().join("src/main.rs"),
        "fn main() { domain::run(); }\nmod domain;\nuse crate::domain;\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("src/domain/mod.rs"),
        "use crate::db::Store;\npub fn run() {}\nstruct State { store: Store }\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("src/db/mod.rs"),
        "pub struct Store;\nimpl Store { pub fn new() -> Self { Store } }\n",
    )
    .unwrap();

    let src_root = dir.path().join("src");
    let collected = collect_packages(&src_root, &src_root).unwrap();

    assert!(collected.iter().any(|p| p.input.display_name == "main"));

    let domain = collected
        .iter()
        .find(|p| p.input.path.ends_with("domain"))
        .unwrap();
    assert!(domain
        .input
        .imports
        .iter()
        .any(|i| i.path.ends_with("db")));
    assert!(domain.size > 0);
}

#[test]
fn external_imports_never_collide_with_project_root() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src/main.rs"),
        "use std::collections::HashMap;\nfn main() {}\n",
    )
    .unwrap();

    let src_root = dir.path().join("src");
    let collected = collect_packages(&src_root, &src_root).unwrap();
    let main_pkg = collected
        .iter()
        .find(|p| p.input.display_name == "main")
        .unwrap();
    assert!(main_pkg
        .input
        .imports
        .iter()
        .all(|i| !i.path.starts_with(&src_root.display().to_string())));
}
