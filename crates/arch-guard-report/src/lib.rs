//! # arch-guard-report
//!
//! The secondary-output renderers spec names as out of scope for the core:
//! the Markdown dependency matrix, the per-package statistics report, and
//! the ASCII directory tree. Each consumes a finished
//! `arch_guard_core::types::DependencyMap` read-only.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod matrix;
pub mod stats;
pub mod tree;

pub use matrix::{filter_dep_map, generate_table};
pub use stats::{compute_stats, PackageStats};
pub use tree::generate as generate_tree;
