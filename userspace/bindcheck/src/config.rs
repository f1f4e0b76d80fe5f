// Copyright 2024 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Naming conventions and locations used by both checks.
//!
//! Every field defaults to the chemfiles layout, so an empty `bindcheck.toml`
//! (or none at all) behaves exactly like the built-in conventions:
//!
//! ```toml
//! [export]
//! source_dir = "chemfiles/include/chemfiles/capi"
//! marker = "CHFL_EXPORT"
//! output = "exported.cmake"
//!
//! [usage]
//! declarations = "src/libchemfiles/index.d.ts"
//! binding_dir = "src"
//! extension = ".ts"
//! prefix = "chfl_"
//! ignored = ["_chfl_trajectory_close"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Error;

/// File looked up in the project root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "bindcheck.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportConfig,
    pub usage: UsageConfig,
}

/// Settings for the manifest generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Header tree to scan, relative to the project root.
    pub source_dir: PathBuf,
    pub marker: String,
    /// Manifest location, relative to the project root.
    pub output: PathBuf,
    /// Bare names (no leading underscore) left out of the manifest.
    pub ignored: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("chemfiles/include/chemfiles/capi"),
            marker: "CHFL_EXPORT".to_string(),
            output: PathBuf::from("exported.cmake"),
            ignored: Vec::new(),
        }
    }
}

/// Settings for the binding usage check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    pub declarations: PathBuf,
    pub binding_dir: PathBuf,
    /// File-name suffix of binding sources.
    pub extension: String,
    /// Literal tag every native function name starts with.
    pub prefix: String,
    /// Underscore-prefixed names that are allowed to stay unused.
    pub ignored: Vec<String>,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            declarations: PathBuf::from("src/libchemfiles/index.d.ts"),
            binding_dir: PathBuf::from("src"),
            extension: ".ts".to_string(),
            prefix: "chfl_".to_string(),
            ignored: vec!["_chfl_trajectory_close".to_string()],
        }
    }
}

/// Export settings with every path anchored to a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExport {
    pub source_dir: PathBuf,
    pub marker: String,
    pub output: PathBuf,
    pub ignored: Vec<String>,
}

/// Usage settings with every path anchored to a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUsage {
    pub declarations: PathBuf,
    pub binding_dir: PathBuf,
    pub extension: String,
    pub prefix: String,
    pub ignored: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path)
            .map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&data).map_err(|source| Error::Parse { path: path.to_path_buf(), source })
    }

    /// Loads `explicit` when given, otherwise `<root>/bindcheck.toml` when it
    /// exists, otherwise the built-in conventions.
    pub fn load_or_default(root: &Path, explicit: Option<&Path>) -> Result<Self, Error> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("bindcheck: using {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

impl ExportConfig {
    pub fn resolve(&self, root: &Path) -> ResolvedExport {
        ResolvedExport {
            source_dir: root.join(&self.source_dir),
            marker: self.marker.clone(),
            output: root.join(&self.output),
            ignored: self.ignored.clone(),
        }
    }
}

impl UsageConfig {
    pub fn resolve(&self, root: &Path) -> ResolvedUsage {
        ResolvedUsage {
            declarations: root.join(&self.declarations),
            binding_dir: root.join(&self.binding_dir),
            extension: self.extension.clone(),
            prefix: self.prefix.clone(),
            ignored: self.ignored.clone(),
        }
    }
}
