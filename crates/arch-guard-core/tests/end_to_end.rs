//! End-to-end scenarios mirroring the reference implementation's
//! complex-proj/standard-proj fixtures.

use arch_guard_core::checker::{check_package, ImportInput, PackageInput};
use arch_guard_core::config::{ConfigDto, Configuration};
use arch_guard_core::types::{DependencyMap, Violation};
use std::collections::BTreeMap;

const ROOT: &str = "/proj";

fn import(path: &str) -> ImportInput {
    ImportInput {
        path: format!("{ROOT}/{path}"),
        display_name: path.to_string(),
    }
}

fn pkg(name: &str, imports: Vec<ImportInput>) -> PackageInput {
    PackageInput {
        path: format!("{ROOT}/{name}"),
        display_name: name.to_string(),
        imports,
    }
}

fn main_pkg(imports: Vec<ImportInput>) -> PackageInput {
    PackageInput {
        path: format!("{ROOT}/cmd/app"),
        display_name: "main".to_string(),
        imports,
    }
}

fn run_all(packages: &[PackageInput], cfg: &Configuration) -> Vec<Violation> {
    let mut dep_map = DependencyMap::new();
    let mut violations = Vec::new();
    for p in packages {
        violations.extend(check_package(p, ROOT, cfg, &mut dep_map));
    }
    violations
}

#[test]
fn scenario_1_only_tools_no_config() {
    // main imports both tools directly (always allowed: main defaults to
    // the god role), but x/tool2 also imports x/tool internally, and with
    // no tool/db patterns configured neither package is recognized as a
    // tool: that one edge is the fixture's sole violation.
    let main = main_pkg(vec![import("x/tool"), import("x/tool2")]);
    let tool2 = pkg("x/tool2", vec![import("x/tool")]);
    let cfg = Configuration::default_config();
    let violations = run_all(&[main, tool2], &cfg);
    assert_eq!(violations.len(), 1, "{violations:?}");
    assert!(violations[0].0.contains("isn't allowed to import"));
}

#[test]
fn scenario_1_allow_additionally_names_the_real_importer_clears_violation() {
    let main = main_pkg(vec![import("x/tool"), import("x/tool2")]);
    let tool2 = pkg("x/tool2", vec![import("x/tool")]);
    let mut allow_additionally = BTreeMap::new();
    allow_additionally.insert("x/tool2".to_string(), vec!["x/tool".to_string()]);
    let cfg = Configuration::parse(ConfigDto {
        allow_additionally,
        ..Default::default()
    })
    .unwrap();
    let violations = run_all(&[main, tool2], &cfg);
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn scenario_1_tool_config_clears_violations() {
    let main = main_pkg(vec![import("x/tool"), import("x/tool2")]);
    let cfg = Configuration::parse(ConfigDto {
        tool: vec!["x/*".to_string()],
        ..Default::default()
    })
    .unwrap();
    let violations = run_all(&[main], &cfg);
    assert!(violations.is_empty());
}

#[test]
fn scenario_2_standard_project_strict_config() {
    let mut allow_additionally = BTreeMap::new();
    allow_additionally.insert("db/store".to_string(), vec!["db/model".to_string()]);
    let cfg = Configuration::parse(ConfigDto {
        tool: vec!["x/*".to_string()],
        db: vec!["db/*".to_string()],
        allow_additionally,
        ..Default::default()
    })
    .unwrap();

    let packages = vec![
        main_pkg(vec![import("domain1"), import("domain2")]),
        pkg("domain1", vec![import("x/tool"), import("db/store")]),
        pkg("domain2", vec![import("x/tool2"), import("db/store")]),
        pkg("db/store", vec![import("x/tool"), import("db/model")]),
        pkg("db/model", vec![import("x/tool")]),
        pkg("x/tool", vec![]),
        pkg("x/tool2", vec![]),
    ];

    let violations = run_all(&packages, &cfg);
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn scenario_3_allow_only_in() {
    let mut allow_only_in = BTreeMap::new();
    allow_only_in.insert(
        "pkg/domain3".to_string(),
        vec!["pkg/domain4".to_string(), "cmd/exe2".to_string()],
    );
    let cfg = Configuration::parse(ConfigDto {
        allow_only_in,
        tool: vec!["pkg/x/*".to_string()],
        db: vec!["pkg/db/*".to_string()],
        ..Default::default()
    })
    .unwrap();

    let allowed = pkg("pkg/domain4", vec![import("pkg/domain3")]);
    assert!(run_all(&[allowed], &cfg).is_empty());

    let forbidden = pkg("pkg/domain5", vec![import("pkg/domain3")]);
    let violations = run_all(&[forbidden], &cfg);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].0.contains("allowOnlyIn"));
}

#[test]
fn scenario_4_captures_round_trip() {
    let mut allow_only_in = BTreeMap::new();
    allow_only_in.insert(
        "a/$*/b/$**/c".to_string(),
        vec!["d/$2/e/$1/f".to_string()],
    );
    let cfg = Configuration::parse(ConfigDto {
        allow_only_in,
        ..Default::default()
    })
    .unwrap();

    let (has_key, has_value) =
        cfg.allow_only_in
            .has_key_value("a/foo/b/bar/car/c", "", "d/bar/car/e/foo/f", "");
    assert!(has_key);
    assert!(has_value);

    let (has_key, has_value) =
        cfg.allow_only_in
            .has_key_value("a/foo/b/bar/car/c", "", "d/foo/e/bar/f", "");
    assert!(has_key);
    assert!(!has_value);
}

#[test]
fn scenario_5_test_package_exemption() {
    let cfg = Configuration::default_config();
    let importer = PackageInput {
        path: format!("{ROOT}/domain1_test"),
        display_name: "domain1_test".to_string(),
        imports: vec![import("net/http")],
    };
    let mut dep_map = DependencyMap::new();
    let violations = check_package(&importer, ROOT, &cfg, &mut dep_map);
    assert!(violations.is_empty());
}

#[test]
fn scenario_6_size_and_god_defaults() {
    let cfg = Configuration::default_config();
    assert_eq!(cfg.size, 2048);
    assert_eq!(cfg.god.patterns().len(), 1);
    assert_eq!(cfg.god.patterns()[0].text(), "main");

    let no_god_cfg = Configuration::parse(ConfigDto {
        no_god: true,
        ..Default::default()
    })
    .unwrap();
    assert!(no_god_cfg.god.is_empty());
}

#[test]
fn god_may_still_import_a_database_package() {
    let main = main_pkg(vec![import("db/store")]);
    let cfg = Configuration::parse(ConfigDto {
        db: vec!["db/*".to_string()],
        ..Default::default()
    })
    .unwrap();
    assert!(run_all(&[main], &cfg).is_empty());
}
