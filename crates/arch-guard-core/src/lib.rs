//! # arch-guard-core
//!
//! Core data model and dependency checker for a package-role-based
//! architecture linter.
//!
//! This crate holds the two subsystems where the real design lives:
//!
//! - [`pattern`]: the glob/capture pattern language, its compilation to
//!   regular expressions, and the matching engine on top of it.
//! - [`checker`]: role classification of each package, role-aware
//!   traversal of its imports, and violation reporting.
//!
//! It has no I/O, no `syn`, no `clap`: it consumes already-parsed
//! `(package, imports)` tuples from a collaborator crate (`arch-guard-parse`)
//! and hands its findings to another (`arch-guard-report`, `arch-guard-cli`).
//!
//! ## Example
//!
//! ```ignore
//! use arch_guard_core::{checker, config::Configuration, types::DependencyMap};
//!
//! let cfg = Configuration::default_config();
//! let mut dep_map = DependencyMap::new();
//! let violations = checker::check_package(&pkg, "/project/root", &cfg, &mut dep_map);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checker;
pub mod config;
pub mod pattern;
pub mod types;

pub use checker::{
    check_package, check_size, relative_package_name, resolve_role, ImportInput, PackageInput,
};
pub use config::{ConfigDto, ConfigError, Configuration};
pub use pattern::{compile_pattern, CompileError, DollarMode, Pattern, PatternGroup, PatternList, PatternMap};
pub use types::{DependencyMap, PackageImports, PackageName, PackageRole, Violation};
