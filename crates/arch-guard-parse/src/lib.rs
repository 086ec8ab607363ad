//! # arch-guard-parse
//!
//! The parser collaborator named by `arch-guard-core`'s own scope
//! boundary: walks a project's directory tree, groups `.rs` files into
//! packages the way Rust groups files into modules, extracts `use`
//! imports via `syn`, and computes the per-package size metric.
//!
//! Hands `arch_guard_core::checker::PackageInput` values to the core; does
//! not depend on `clap` or any reporting concern.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collect;
pub mod discovery;
pub mod imports;
pub mod resolve;
pub mod size;

pub use collect::{collect_packages, CollectError, CollectedPackage};
pub use discovery::{discover_packages, DiscoveredPackage, DiscoveryError};
pub use imports::{extract_imports, extract_imports_from_file, ImportError, ResolvedImport};
