// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Build-time consistency checks between a C API and its language binding
//! INTENT: Export manifest generation, binding usage verification, TOML configuration
//! IDL (target): generate(export_config), check(usage_config)
//! DEPS: walkdir (tree traversal), regex (reference scan), serde/toml (configuration)
//! READINESS: Library ready; consumed by tools/cmake-export and tools/check-used-functions
//! TESTS: Name extraction; manifest layout; missing/ignored names; config loading
//!
//! Both checks are textual. Declarations are found by substring and pattern
//! matching only, so a reference inside a comment still counts as a use and a
//! marker line of unexpected shape still contributes a (possibly odd) name.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use thiserror::Error;

pub mod config;
pub mod export;
pub mod usage;
mod walk;

pub use config::{Config, ExportConfig, ResolvedExport, ResolvedUsage, UsageConfig};
pub use export::{
    exported_functions, extract_export_name, generate, render_manifest, write_manifest,
};
pub use usage::{
    binding_functions, check, expected_functions, missing_functions, reference_pattern,
    UsageReport,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("binding directory not found: {0}")]
    MissingDir(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid reference pattern: {0}")]
    Pattern(#[from] regex::Error),
}
